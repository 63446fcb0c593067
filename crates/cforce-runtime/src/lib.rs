//! Timed playback for C-Force terminal sessions.
//!
//! The engine's [`cforce_engine::Session`] is pure: it returns declarative
//! scripts and never waits. This crate plays those scripts in real time:
//!
//! - `Terminal` - owns the session behind one mutex and runs at most one
//!   playback task at a time
//! - `player` - walks cues with their delays and drives the flood loop
//! - `TerminalEvent` - broadcast to hosts as lines are appended
//!
//! # Example
//!
//! ```ignore
//! use cforce_engine::EngineConfig;
//! use cforce_runtime::{Terminal, TerminalEvent};
//!
//! #[tokio::main]
//! async fn main() -> cforce_runtime::Result<()> {
//!     let terminal = Terminal::new(EngineConfig::default());
//!     let mut events = terminal.subscribe();
//!
//!     tokio::spawn(async move {
//!         while let Ok(TerminalEvent::Line(line)) = events.recv().await {
//!             println!("{}", line.text);
//!         }
//!     });
//!
//!     terminal.submit("scan demo.local").await;
//!     terminal.wait().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Cancellation
//!
//! `Terminal::stop` signals the playback task through a watch channel and
//! waits for it to exit. The flood loop checks the signal before every tick,
//! so no line is appended once the stop has been observed. Dropping the
//! terminal aborts any task still running.

pub mod error;
pub mod event;
mod player;
pub mod terminal;

pub use error::{Result, RuntimeError};
pub use event::TerminalEvent;
pub use terminal::Terminal;
