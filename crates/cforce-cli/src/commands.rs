//! Command handlers for non-interactive subcommands.

use std::fs;
use std::path::Path;

use cforce_engine::{classify, clean_target, EngineConfig, Session};
use cforce_models::{default_findings, Context, Finding, Line};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Commands, OutputFormat};
use crate::error::Result;
use crate::host::HostCommand;
use crate::render;
use crate::report::Report;

/// Execute a CLI command.
pub fn execute(command: Commands, config: EngineConfig) -> Result<()> {
    match command {
        // REPL is handled separately in main
        Commands::Repl => Ok(()),
        Commands::Replay { file, format } => cmd_replay(&file, format, config),
        Commands::Classify { targets } => {
            print!("{}", classify_table(&targets));
            Ok(())
        }
        Commands::Findings { format } => {
            let findings = default_findings();
            let report = Report::new(&findings);
            match format {
                OutputFormat::Text => println!("{}", report.to_text()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
            Ok(())
        }
    }
}

fn cmd_replay(file: &str, format: OutputFormat, config: EngineConfig) -> Result<()> {
    let path = shellexpand::tilde(file).into_owned();
    let session = replay_file(Path::new(&path), config)?;
    println!("{}", render_transcript(&session, format)?);
    Ok(())
}

/// Reads a command file and plays it through a fresh session.
pub fn replay_file(path: &Path, config: EngineConfig) -> Result<Session> {
    let script = fs::read_to_string(path)?;
    info!(path = %path.display(), "replaying command file");
    Ok(replay(&script, config))
}

/// Plays every input of `script` to completion, instantly.
///
/// Blank lines and lines starting with `#` are skipped. Slash commands run
/// their host action; `/quit` stops reading.
pub fn replay(script: &str, config: EngineConfig) -> Session {
    let mut session = Session::new(config);

    for raw in script.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match HostCommand::parse(line) {
            HostCommand::Input(text) => session.run(&text),
            HostCommand::Quit => break,
            command => {
                let actions = command.actions();
                if actions.is_empty() {
                    debug!(?command, "host command has no effect in replay");
                }
                for action in actions {
                    session.run_action(action);
                }
            }
        }
    }

    session
}

/// JSON shape of a replayed session.
#[derive(Debug, Serialize)]
pub struct Transcript<'a> {
    pub replayed_at: DateTime<Utc>,
    pub context: Context,
    pub prompt: String,
    pub target: Option<&'a str>,
    pub active_module: Option<&'a str>,
    pub findings: &'a [Finding],
    pub lines: &'a [Line],
}

impl<'a> Transcript<'a> {
    pub fn new(session: &'a Session) -> Self {
        let state = session.state();
        Self {
            replayed_at: Utc::now(),
            context: state.context,
            prompt: state.prompt_label(),
            target: state.target.as_deref(),
            active_module: state.active_module.as_deref(),
            findings: &state.findings,
            lines: &state.scrollback,
        }
    }
}

/// Renders a session's scrollback in the requested format.
pub fn render_transcript(session: &Session, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(session
            .state()
            .scrollback
            .iter()
            .map(render::plain)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&Transcript::new(session))?),
    }
}

/// One row per target: normalized host and classification.
pub fn classify_table(targets: &[String]) -> String {
    targets
        .iter()
        .map(|t| format!("{:<32} {}\n", clean_target(t), classify(t)))
        .collect()
}
