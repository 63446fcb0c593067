//! Scrollback lines.

use serde::{Deserialize, Serialize};

/// Styling class of a scrollback line.
///
/// Hosts map this to colors; it carries no other meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Echo of a submitted or simulated input line.
    Input,
    /// Console/system announcement.
    System,
    /// Positive result.
    Success,
    /// Failure or error.
    Error,
    /// Warning.
    Warning,
    /// Ordinary output.
    #[default]
    Plain,
}

impl LineKind {
    /// Every kind, in declaration order.
    pub const ALL: [LineKind; 6] = [
        LineKind::Input,
        LineKind::System,
        LineKind::Success,
        LineKind::Error,
        LineKind::Warning,
        LineKind::Plain,
    ];
}

/// One line of terminal output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Text, possibly spanning several physical lines (banners).
    pub text: String,
    /// Styling class.
    pub kind: LineKind,
}

impl Line {
    /// Creates a new line.
    pub fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn input(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::Input)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::System)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::Error)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::Warning)
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::Plain)
    }
}
