//! Error types for the sync engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during client-side sync.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Network or transport error.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the operation can be retried.
        retryable: bool,
    },

    /// The server rejected the request with a failure response.
    #[error("server rejected request: {0}")]
    Rejected(String),

    /// The server answered with a shape the protocol does not define.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The conflict loop did not converge within the configured attempts.
    #[error("document not committed after {attempts} attempts")]
    RetriesExhausted {
        /// Number of submit attempts made.
        attempts: u32,
    },
}

impl EngineError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if this error can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::Transport { retryable, .. } => *retryable,
            EngineError::RetriesExhausted { .. } => true,
            _ => false,
        }
    }
}
