//! Batch replay of command files.

use std::fs;

use cforce_cli::cli::OutputFormat;
use cforce_cli::commands::{render_transcript, replay_file};
use cforce_cli::CliError;
use cforce_engine::EngineConfig;
use cforce_models::{Context, LineKind};
use tempfile::TempDir;

fn config() -> EngineConfig {
    EngineConfig::default().with_seed(11)
}

fn write_script(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("session.txt");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn replay_module_walkthrough() {
    let dir = TempDir::new().unwrap();
    let path = write_script(
        &dir,
        "# walk into a module and fire it\n\
         msfconsole\n\
         use exploit/multi/http/apache_normalize_path_rce\n\
         set RHOSTS https://demo.local/\n\
         exploit\n\
         sessions -i 1\n",
    );

    let session = replay_file(&path, config()).unwrap();
    let state = session.state();
    assert_eq!(state.context, Context::Interactive);
    assert!(state.open_session.is_some());
    assert!(!state.busy);

    let text = render_transcript(&session, OutputFormat::Text).unwrap();
    assert!(text.contains("[+] Meterpreter session 1 opened"));
}

#[test]
fn replay_host_actions_run_to_completion() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "/target demo.local\n/wpscan\n");

    let session = replay_file(&path, config()).unwrap();
    let text = render_transcript(&session, OutputFormat::Text).unwrap();

    assert!(text.contains("[*] Target set to demo.local"));
    assert!(text.contains("[SUCCESS] Password found!"));
    assert!(!session.is_busy());
}

#[test]
fn replay_flood_clears_screen_and_finishes() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "/target demo.local\n/wpscan\n/flood\n");

    let session = replay_file(&path, config()).unwrap();
    let text = render_transcript(&session, OutputFormat::Text).unwrap();

    // the flood prelude wipes everything printed before it
    assert!(!text.contains("[SUCCESS] Password found!"));
    assert!(!text.contains("python3 exados.py"));
    assert!(text.contains("E X A D O S"));
    assert!(text.contains("[+] SUPER Attack finished. Total requests: 1500"));
    assert!(!session.is_busy());
    assert!(!session.state().is_flooding());
}

#[test]
fn replay_reports_errors_in_transcript() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "/hydra\nmsfconsole\nexploit\n");

    let session = replay_file(&path, config()).unwrap();
    let errors: Vec<&str> = session
        .state()
        .scrollback
        .iter()
        .filter(|l| l.kind == LineKind::Error)
        .map(|l| l.text.as_str())
        .collect();

    assert_eq!(errors, vec!["Error: Set target first.", "[-] No module selected."]);
}

#[test]
fn replay_json_transcript() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "/scan demo.local\n");

    let session = replay_file(&path, config()).unwrap();
    let json = render_transcript(&session, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["target"], "demo.local");
    assert_eq!(value["findings"].as_array().map(Vec::len), Some(4));
    assert!(value["lines"]
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["text"] == "[!] CRITICAL: CVE-2021-41773 CONFIRMED" && l["kind"] == "error"));
}

#[test]
fn replay_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = replay_file(&dir.path().join("missing.txt"), config());
    assert!(matches!(result, Err(CliError::Io(_))));
}
