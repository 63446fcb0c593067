//! Session state, events and transitions.

use cforce_models::{Context, Finding, Line};
use serde::{Deserialize, Serialize};

use crate::flood::{FloodEnd, FloodProgress};
use crate::script::{Finish, Script};

/// Lines shown when a session starts.
pub fn greeting() -> Vec<Line> {
    vec![
        Line::system("C-FORCE OFFENSIVE SECURITY SUITE [v2.4.0]"),
        Line::warning("Authorized Access Only. All actions logged."),
        Line::system("Type \"help\" for available commands."),
    ]
}

/// Everything the engine knows about one terminal session.
///
/// `Default` is an empty session with no greeting; use [`SessionState::new`]
/// for a freshly mounted one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current command-interpretation mode.
    pub context: Context,
    /// Selected module path. Only set while `context` is `Module`.
    pub active_module: Option<String>,
    /// Last target as typed (normalized on use).
    pub target: Option<String>,
    /// Output lines, oldest first.
    pub scrollback: Vec<Line>,
    /// True while a scripted sequence is playing.
    pub busy: bool,
    /// Findings from the last completed scan.
    pub findings: Vec<Finding>,
    /// Id of the session opened by a successful exploit.
    pub open_session: Option<String>,
    /// Counters of a running flood.
    pub flood: Option<FloodProgress>,
    /// Bumped every time the scrollback is cleared.
    pub epoch: u64,
}

impl SessionState {
    /// Creates a session showing the greeting banner.
    pub fn new() -> Self {
        Self {
            scrollback: greeting(),
            ..Self::default()
        }
    }

    /// Prompt for the current context.
    pub fn prompt_label(&self) -> String {
        match self.context {
            Context::Root => "root@cforce:~#".to_string(),
            Context::Framework => "msf6 >".to_string(),
            Context::Module => {
                let module = self.active_module.as_deref().unwrap_or_default();
                let short = module.rsplit('/').next().unwrap_or(module);
                format!("msf6 exploit({}) >", short)
            }
            Context::Interactive => "meterpreter >".to_string(),
        }
    }

    pub fn push(&mut self, line: Line) {
        self.scrollback.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.scrollback.extend(lines);
    }

    /// Empties the scrollback.
    pub fn clear_scrollback(&mut self) {
        self.scrollback.clear();
        self.epoch += 1;
    }

    /// Moves to `context`, dropping the active module when leaving `Module`.
    pub fn set_context(&mut self, context: Context) {
        self.context = context;
        if context != Context::Module {
            self.active_module = None;
        }
    }

    /// Selects a module and enters the module console.
    pub fn select_module(&mut self, module: impl Into<String>) {
        self.context = Context::Module;
        self.active_module = Some(module.into());
    }

    /// True while the flood loop is active.
    pub fn is_flooding(&self) -> bool {
        self.flood.is_some()
    }
}

/// Host actions, the equivalent of the dashboard's buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Passive scan of the current target.
    Scan,
    /// Scripted end-to-end exploit run.
    ExploitChain,
    /// Web login brute force.
    Wpscan,
    /// SSH brute force.
    Hydra,
    /// Flood simulation.
    Flood,
    /// Replace the current target.
    SetTarget(String),
}

/// Inputs to [`crate::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A line typed by the user. Ignored while busy.
    Submit(String),
    /// A line replayed by a running sequence. Bypasses the busy gate.
    Scripted(String),
    /// A host action.
    Launch(Action),
    /// Explicit clear, allowed in any state.
    Clear,
    /// A cue emitting a line.
    Emit(Line),
    /// A cue recording an interactive session.
    SessionOpened(String),
    /// The running sequence played through.
    Finish(Finish),
    /// One flood tick elapsed.
    FloodTick,
    /// The flood loop ended.
    FloodEnd(FloodEnd),
}

/// Result of a reduction: the next state and any work for a player.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub script: Option<Script>,
}
