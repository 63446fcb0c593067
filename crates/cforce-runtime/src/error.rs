//! Error types for the runtime crate.

use thiserror::Error;

/// Errors that can occur while playing a session.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The playback task panicked or was aborted.
    #[error("playback task failed: {0}")]
    Playback(#[from] tokio::task::JoinError),

    /// Another sequence is still playing.
    #[error("terminal is busy")]
    Busy,
}

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
