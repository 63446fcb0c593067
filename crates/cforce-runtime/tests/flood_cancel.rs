//! Flood loop cancellation and self-cancel under a paused clock.

use std::time::Duration;

use cforce_engine::{sequences, Action, EngineConfig};
use cforce_runtime::{Terminal, TerminalEvent};
use tokio::time::sleep;

const TICK: Duration = Duration::from_millis(60);

fn config() -> EngineConfig {
    EngineConfig::default()
        .with_seed(77)
        .with_flood_tick(TICK)
        .with_flood_duration(Duration::from_secs(6))
}

fn prelude_length(config: &EngineConfig) -> Duration {
    sequences::flood("demo.local", config).prelude.duration()
}

fn is_thread_line(text: &str) -> bool {
    text.starts_with("[Thread ")
}

#[tokio::test(start_paused = true)]
async fn stop_halts_emission_immediately() {
    let config = config();
    let prelude = prelude_length(&config);
    let terminal = Terminal::new(config);

    assert!(terminal.submit("exados demo.local").await);
    sleep(prelude + TICK * 10 + Duration::from_millis(30)).await;

    let running = terminal.snapshot().await;
    assert!(running.busy);
    let emitted = running
        .scrollback
        .iter()
        .filter(|l| is_thread_line(&l.text))
        .count();
    assert_eq!(emitted, 10);

    assert!(terminal.stop().await.unwrap());
    let stopped = terminal.snapshot().await;
    assert!(!stopped.busy);
    assert!(stopped.flood.is_none());

    let stop_notices = stopped
        .scrollback
        .iter()
        .filter(|l| l.text.starts_with("[+] Attack stopped by user."))
        .count();
    assert_eq!(stop_notices, 1);
    assert!(stopped
        .scrollback
        .last()
        .is_some_and(|l| l.text == "[+] Attack stopped by user. Total requests: 150"));

    // Nothing else arrives once stopped.
    let mut events = terminal.subscribe();
    sleep(Duration::from_secs(10)).await;
    assert!(events.try_recv().is_err());
    assert_eq!(terminal.snapshot().await.scrollback, stopped.scrollback);
}

#[tokio::test(start_paused = true)]
async fn stop_during_prelude() {
    let terminal = Terminal::new(config());
    terminal.submit("ddos demo.local").await;
    sleep(Duration::from_millis(900)).await;

    assert!(terminal.stop().await.unwrap());
    let state = terminal.snapshot().await;
    assert!(!state.busy);
    assert!(!state.scrollback.iter().any(|l| is_thread_line(&l.text)));
}

#[tokio::test(start_paused = true)]
async fn flood_cancels_itself() {
    let config = config().with_flood_duration(Duration::from_millis(600));
    let terminal = Terminal::new(config);
    terminal
        .launch(Action::SetTarget("10.0.0.9".to_string()))
        .await
        .unwrap();
    assert!(terminal.launch(Action::Flood).await.unwrap());

    terminal.wait().await.unwrap();
    let state = terminal.snapshot().await;
    assert!(!state.busy);
    assert!(state
        .scrollback
        .iter()
        .any(|l| l.text == "[+] SUPER Attack finished. Total requests: 150"));
    assert!(!state
        .scrollback
        .iter()
        .any(|l| l.text.starts_with("[+] Attack stopped")));
}

#[tokio::test(start_paused = true)]
async fn clear_screen_event_during_prelude() {
    let terminal = Terminal::new(config());
    let mut events = terminal.subscribe();
    terminal.submit("hping3 demo.local").await;
    sleep(Duration::from_millis(1000)).await;
    terminal.stop().await.unwrap();

    let mut seen_clear = false;
    while let Ok(event) = events.try_recv() {
        if event == TerminalEvent::Cleared {
            seen_clear = true;
        }
    }
    assert!(seen_clear);
}

#[tokio::test(start_paused = true)]
async fn dropping_terminal_ends_playback() {
    let terminal = Terminal::new(config());
    let mut events = terminal.subscribe();
    terminal.submit("exados demo.local").await;
    sleep(Duration::from_millis(100)).await;
    drop(terminal);

    sleep(Duration::from_secs(20)).await;
    // Drain whatever was sent before the drop; the channel then closes.
    loop {
        match events.try_recv() {
            Ok(_) => continue,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(err) => {
                assert_eq!(err, tokio::sync::broadcast::error::TryRecvError::Closed);
                break;
            }
        }
    }
}
