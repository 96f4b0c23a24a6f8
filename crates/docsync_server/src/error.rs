//! Error types for the sync server.

use docsync_protocol::RequestError;
use docsync_store::StoreError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the sync server.
///
/// Version conflicts are deliberately absent: a superseded write is a
/// negotiation outcome carried in a success response, never an error.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The request failed boundary validation.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    /// The caller may not access the resource. Deliberately generic: the
    /// denial reason is logged, not returned.
    #[error("you do not have permission to access this resource")]
    Forbidden,

    /// The document payload failed opaque validation.
    #[error("invalid document payload: {0}")]
    InvalidPayload(String),

    /// The document store failed. Retryable by the caller.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ServerError {
    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServerError::InvalidRequest(_)
                | ServerError::Forbidden
                | ServerError::InvalidPayload(_)
        )
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self, ServerError::Storage(_))
    }
}
