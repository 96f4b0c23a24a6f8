//! Request validation errors.

use thiserror::Error;

/// Errors produced while validating raw request parameters.
///
/// These are always client-fixable: the message carries enough detail to
/// correct the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The sync object type is not in `kind/name` form.
    #[error("invalid sync object type {0:?}: expected kind/name")]
    MalformedObjectType(String),

    /// The sync object type names a kind this service does not serve.
    #[error("unsupported sync object kind {0:?}")]
    UnsupportedKind(String),

    /// The sync object id is not a positive integer.
    #[error("invalid sync object id {0:?}: expected a positive integer")]
    InvalidObjectId(String),

    /// A required request field was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
