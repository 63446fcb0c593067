//! Terminal: a session plus its playback task.

use std::sync::Arc;

use cforce_engine::{Action, EngineConfig, Event, Script, Session, SessionState};
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};
use crate::event::TerminalEvent;
use crate::player;

/// State shared between a terminal and its playback task.
pub(crate) struct Shared {
    session: Mutex<Session>,
    config: EngineConfig,
    events: broadcast::Sender<TerminalEvent>,
    busy: watch::Sender<bool>,
}

impl Shared {
    pub(crate) fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs `f` against the session and publishes whatever it changed.
    ///
    /// This is the only place the session is mutated.
    pub(crate) async fn update<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut session = self.session.lock().await;
        let epoch = session.state().epoch;
        let len = session.state().scrollback.len();

        let out = f(&mut *session);
        self.publish(session.state(), epoch, len);
        out
    }

    pub(crate) async fn apply(&self, event: Event) -> Option<Script> {
        self.update(|session| session.apply(event)).await
    }

    fn publish(&self, state: &SessionState, epoch: u64, len: usize) {
        let start = if state.epoch != epoch {
            let _ = self.events.send(TerminalEvent::Cleared);
            0
        } else {
            len.min(state.scrollback.len())
        };
        for line in &state.scrollback[start..] {
            let _ = self.events.send(TerminalEvent::Line(line.clone()));
        }

        let busy = state.busy;
        let changed = self.busy.send_if_modified(|current| {
            if *current == busy {
                return false;
            }
            *current = busy;
            true
        });
        if changed {
            let _ = self.events.send(TerminalEvent::Busy(busy));
        }
    }
}

struct Playback {
    handle: JoinHandle<()>,
    cancel: watch::Sender<bool>,
}

/// A terminal session with real-time playback.
pub struct Terminal {
    shared: Arc<Shared>,
    playback: Mutex<Option<Playback>>,
}

impl Terminal {
    /// Creates a terminal showing the greeting banner.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_session(Session::new(config))
    }

    /// Wraps an existing session.
    pub fn with_session(session: Session) -> Self {
        let (events, _) = broadcast::channel(1024);
        let (busy, _) = watch::channel(session.is_busy());
        let config = session.config().clone();

        Self {
            shared: Arc::new(Shared {
                session: Mutex::new(session),
                config,
                events,
                busy,
            }),
            playback: Mutex::new(None),
        }
    }

    /// Subscribe to terminal events.
    pub fn subscribe(&self) -> broadcast::Receiver<TerminalEvent> {
        self.shared.events.subscribe()
    }

    pub fn config(&self) -> &EngineConfig {
        self.shared.config()
    }

    /// Returns true while a sequence is playing.
    pub fn is_busy(&self) -> bool {
        *self.shared.busy.borrow()
    }

    /// Submits a typed line. Returns true if it started a sequence.
    ///
    /// Input while busy is ignored, as is blank input.
    pub async fn submit(&self, line: &str) -> bool {
        let script = self.shared.update(|s| s.submit(line)).await;
        self.start(script).await
    }

    /// Runs a host action. Returns true if it started a sequence.
    pub async fn launch(&self, action: Action) -> Result<bool> {
        if self.is_busy() && !matches!(action, Action::SetTarget(_)) {
            return Err(RuntimeError::Busy);
        }
        let script = self.shared.update(|s| s.launch(action)).await;
        Ok(self.start(script).await)
    }

    /// Empties the scrollback.
    pub async fn clear(&self) {
        self.shared.update(|s| s.clear()).await;
    }

    /// Copy of the current session state.
    pub async fn snapshot(&self) -> SessionState {
        self.shared.update(|s| s.state().clone()).await
    }

    /// Prompt for the current context.
    pub async fn prompt(&self) -> String {
        self.shared.update(|s| s.prompt_label()).await
    }

    /// Stops the running sequence. Returns true if one was interrupted.
    pub async fn stop(&self) -> Result<bool> {
        let Some(playback) = self.playback.lock().await.take() else {
            return Ok(false);
        };

        if playback.handle.is_finished() {
            playback.handle.await?;
            return Ok(false);
        }

        info!("stopping playback");
        let _ = playback.cancel.send(true);
        playback.handle.await?;
        debug!("playback stopped");
        Ok(true)
    }

    /// Waits for the running sequence to play through.
    pub async fn wait(&self) -> Result<()> {
        let playback = self.playback.lock().await.take();
        if let Some(playback) = playback {
            playback.handle.await?;
        }
        Ok(())
    }

    /// Stops playback before the terminal goes away.
    pub async fn shutdown(&self) -> Result<()> {
        self.stop().await?;
        Ok(())
    }

    async fn start(&self, script: Option<Script>) -> bool {
        let Some(script) = script else {
            return false;
        };

        debug!(script = script.name(), "spawning playback");
        let (cancel, cancel_rx) = watch::channel(false);
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(player::play(shared, script, cancel_rx));

        let mut slot = self.playback.lock().await;
        if let Some(previous) = slot.replace(Playback { handle, cancel }) {
            // Busy gating means the previous task has already finished.
            previous.handle.abort();
        }
        true
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Some(playback) = self.playback.get_mut().take() {
            let _ = playback.cancel.send(true);
            playback.handle.abort();
        }
    }
}
