//! # DocSync Protocol
//!
//! Sync protocol types and request validation for DocSync.
//!
//! This crate provides:
//! - Sync-object addressing (`SyncObject`, `SyncObjectType`, `SyncObjectId`)
//! - Wire parameter types and their typed, validated counterparts
//! - The `DocResponse` envelope returned by every sync endpoint
//! - `RequestError` for boundary validation failures
//!
//! This is a pure protocol crate with no I/O operations. Document payloads
//! are opaque strings throughout: the protocol layer never inspects the
//! serialized CRDT state it carries.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod messages;
mod sync_object;

pub use error::RequestError;
pub use messages::{DocResponse, GetDocParams, PutDocParams};
pub use sync_object::{SyncObject, SyncObjectId, SyncObjectKind, SyncObjectType};
