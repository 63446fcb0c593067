//! Terminal events.

use cforce_models::Line;

/// Events broadcast to hosts rendering a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A line was appended to the scrollback.
    Line(Line),
    /// The scrollback was emptied.
    Cleared,
    /// A scripted sequence started or finished.
    Busy(bool),
}

impl TerminalEvent {
    /// Returns the appended line, if this is a line event.
    pub fn line(&self) -> Option<&Line> {
        match self {
            TerminalEvent::Line(line) => Some(line),
            _ => None,
        }
    }
}
