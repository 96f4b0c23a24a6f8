//! # DocSync Server
//!
//! CRDT document synchronization core for DocSync.
//!
//! This crate provides:
//! - A permission gate over injected authentication and capability traits
//! - Document persistence with optimistic concurrency control
//! - Request handlers for the get/put sync endpoints
//! - The `SyncServer` facade wiring the pieces together
//!
//! # Architecture
//!
//! The server is a per-object write arbiter, not a merge engine. Documents
//! are opaque CRDT blobs; the client editor owns merging. Every update
//! asserts the version it believes is current, and the store's atomic
//! compare-and-swap decides the race: the winner's write is accepted at the
//! next version, every loser gets the authoritative stored document back to
//! merge against and resubmit.
//!
//! Each call is short-lived and stateless apart from the store: there are
//! no background tasks, no sessions, and no server-side retries.
//!
//! # Wiring
//!
//! ```rust
//! use std::sync::Arc;
//! use docsync_server::{AllowAll, ServerConfig, StaticAuth, SyncServer};
//! use docsync_store::InMemoryStore;
//!
//! let server = SyncServer::new(
//!     ServerConfig::default(),
//!     Arc::new(InMemoryStore::new()),
//!     Arc::new(StaticAuth::actor(1)),
//!     Arc::new(AllowAll),
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
// Production code MUST NOT use panic!/unwrap()/expect()
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod auth;
mod config;
mod error;
mod handler;
mod persistence;
mod server;

pub use auth::{
    AccessError, ActorId, AllowAll, AuthContext, CapabilityCheck, DenyAll, PermissionGate,
    StaticAuth,
};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::SyncHandler;
pub use persistence::{DocPersistence, PayloadValidator, SizeLimitValidator, UpdateOutcome};
pub use server::SyncServer;
