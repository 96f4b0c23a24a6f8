//! # DocSync Engine
//!
//! Client-side document sync session engine for DocSync.
//!
//! The server never merges: a write that loses its version race comes back
//! as a success response carrying the authoritative document, and the
//! client is expected to merge and resubmit. This crate packages that loop:
//!
//! 1. Submit the local document, asserting the last known version
//! 2. Accepted: commit the new version locally
//! 3. Superseded: merge the returned document into the local state through
//!    the caller-supplied [`DocMerger`], adopt the returned version, back
//!    off, and resubmit
//!
//! The merge function is opaque to the engine, exactly as document payloads
//! are opaque to the server; any CRDT library can sit behind [`DocMerger`].
//!
//! # Example
//!
//! ```rust
//! use docsync_engine::{DocSession, EngineConfig, MockTransport, PreferAuthoritative};
//! use docsync_protocol::DocResponse;
//! use std::sync::Arc;
//!
//! let transport = Arc::new(MockTransport::new());
//! transport.push_submit_response(DocResponse::accepted(1));
//!
//! let session = DocSession::new(
//!     EngineConfig::default(),
//!     transport,
//!     Arc::new(PreferAuthoritative),
//!     "postType/post",
//!     7,
//! );
//! let version = session.publish("my-doc").unwrap();
//! assert_eq!(version, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
// Production code MUST NOT use panic!/unwrap()/expect()
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod merge;
mod session;
mod transport;

pub use config::{EngineConfig, RetryConfig};
pub use error::{EngineError, EngineResult};
pub use merge::{DocMerger, MergeFn, PreferAuthoritative};
pub use session::{DocSession, SessionStats};
pub use transport::{DocTransport, MockTransport};
