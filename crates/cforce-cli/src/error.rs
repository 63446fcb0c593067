//! Error types for the CLI.

use thiserror::Error;

/// Errors surfaced by the `cforce` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Line editor failure.
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// File or terminal I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Playback failure.
    #[error(transparent)]
    Runtime(#[from] cforce_runtime::RuntimeError),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
