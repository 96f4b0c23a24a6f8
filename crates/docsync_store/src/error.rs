//! Error types for store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// Store errors are always distinct from version conflicts: a conflicting
/// compare-and-swap is a normal [`CasOutcome`](crate::CasOutcome), not an
/// error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The persisted snapshot could not be decoded.
    #[error("store corrupted: {0}")]
    Corrupted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Corrupted("truncated snapshot".into());
        assert!(err.to_string().contains("truncated snapshot"));
    }
}
