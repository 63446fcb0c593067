//! Scripted terminal session engine.
//!
//! A session moves between four prompt contexts (root shell, framework
//! console, module console, interactive session). Every input, host action
//! and timed cue is an [`Event`] fed to the pure [`reduce`] function, which
//! returns the next [`SessionState`] and optionally a declarative [`Script`]
//! for a player to run.
//!
//! Two players exist: [`Session::drain`] plays scripts instantly (tests and
//! batch replay), and the async player in `cforce-runtime` honors the
//! authored delays.

pub mod command;
pub mod config;
pub mod flood;
pub mod help;
pub mod reduce;
pub mod script;
pub mod sequences;
pub mod session;
pub mod state;
pub mod target;

// Re-export main types
pub use command::{Command, CommandKind};
pub use config::EngineConfig;
pub use flood::{FloodEnd, FloodProgress};
pub use reduce::reduce;
pub use script::{Cue, Effect, Finish, FloodPlan, Script, Sequence};
pub use session::Session;
pub use state::{greeting, Action, Event, SessionState, Transition};
pub use target::{classify, clean_target, derive_username};
