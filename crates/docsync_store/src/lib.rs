//! # DocSync Store
//!
//! Document store trait and implementations for DocSync.
//!
//! This crate provides the lowest-level persistence abstraction for the
//! sync service. Stores hold **one versioned, opaque document per key** and
//! expose exactly two operations: a read of the latest state and an atomic
//! compare-and-swap write.
//!
//! ## Design Principles
//!
//! - Stores never interpret document payloads
//! - The compare-and-swap is indivisible: version comparison and the write
//!   are evaluated as one step, so two racing writers can never both pass
//!   the version check
//! - Versions only grow; documents are never deleted by this layer
//! - Must be `Send + Sync` for concurrent access
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral use
//! - [`FileStore`] - For persistent storage backed by a JSON snapshot
//!
//! ## Example
//!
//! ```rust
//! use docsync_store::{CasOutcome, DocumentStore, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! let outcome = store.compare_and_swap("postType/7", 0, "doc".into()).unwrap();
//! assert!(matches!(outcome, CasOutcome::Accepted { version: 1 }));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use store::{CasOutcome, DocumentStore, StoredDoc};
