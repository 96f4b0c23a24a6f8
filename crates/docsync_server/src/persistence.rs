//! Document persistence with optimistic concurrency control.
//!
//! This is the write arbiter of the sync service. It maintains exactly one
//! current document per sync object and decides concurrent write races
//! through the store's atomic compare-and-swap. Losers are never dropped
//! silently: every update call returns either the caller's accepted state
//! or the authoritative stored document for client-side merge and retry.

use crate::error::{ServerError, ServerResult};
use docsync_protocol::SyncObject;
use docsync_store::{CasOutcome, DocumentStore, StoreError, StoredDoc};
use std::sync::Arc;

/// Opaque validation of incoming document payloads.
///
/// The sync core never interprets the serialized CRDT state; validators may
/// only impose shape-agnostic constraints such as size.
pub trait PayloadValidator: Send + Sync {
    /// Validates a raw payload, returning the rejection reason on failure.
    fn validate(&self, raw: &str) -> Result<(), String>;
}

/// The default validator: payloads must be non-empty and within a byte cap.
#[derive(Debug, Clone, Copy)]
pub struct SizeLimitValidator {
    max_bytes: usize,
}

impl SizeLimitValidator {
    /// Creates a validator with the given payload cap.
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl PayloadValidator for SizeLimitValidator {
    fn validate(&self, raw: &str) -> Result<(), String> {
        if raw.is_empty() {
            return Err("document payload must not be empty".into());
        }
        if raw.len() > self.max_bytes {
            return Err(format!(
                "document payload of {} bytes exceeds the {} byte limit",
                raw.len(),
                self.max_bytes
            ));
        }
        Ok(())
    }
}

/// The outcome of an update attempt.
///
/// All three variants are negotiation-level results, not errors; storage
/// failures surface separately as [`ServerError::Storage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The write was accepted; the submitted payload is now stored at
    /// `version`.
    Accepted {
        /// The new stored version.
        version: u64,
    },
    /// A stored document superseded the submitted one: another writer holds
    /// the version the caller asserted, or already initialized the object.
    /// The caller merges against `current` and resubmits.
    ServerWins {
        /// The authoritative stored document.
        current: StoredDoc,
    },
    /// An incremental update addressed an object with no document. Nothing
    /// was stored; the caller must resubmit as an initial update.
    NoDocument,
}

/// Maintains the authoritative document per sync object.
///
/// Sole mutator of the document store; the handler never writes to the
/// store directly.
pub struct DocPersistence {
    store: Arc<dyn DocumentStore>,
    validator: Arc<dyn PayloadValidator>,
}

impl DocPersistence {
    /// Creates a persistence layer over the given store and validator.
    pub fn new(store: Arc<dyn DocumentStore>, validator: Arc<dyn PayloadValidator>) -> Self {
        Self { store, validator }
    }

    /// Returns the current document for the sync object.
    ///
    /// `expected_version` is accepted for symmetry with updates but does
    /// not gate the read: the latest stored state is always returned. An
    /// object that has never been written yields `Ok(None)`.
    pub fn get(
        &self,
        object: &SyncObject,
        expected_version: u64,
    ) -> ServerResult<Option<StoredDoc>> {
        let doc = self.store.read(&object.storage_key())?;
        tracing::trace!(
            object = %object,
            expected_version,
            stored_version = doc.as_ref().map(|d| d.version).unwrap_or(0),
            "document read"
        );
        Ok(doc)
    }

    /// Attempts to persist `payload` for the sync object.
    ///
    /// Initial updates (`is_initial = true`) claim first-write: they are
    /// accepted at version 1 only when no document exists; otherwise the
    /// existing document is returned unmodified. Incremental updates are
    /// accepted only when `version` matches the stored version exactly; a
    /// stale assertion returns the current document for merge and retry.
    pub fn update(
        &self,
        object: &SyncObject,
        payload: String,
        version: u64,
        is_initial: bool,
    ) -> ServerResult<UpdateOutcome> {
        self.validator
            .validate(&payload)
            .map_err(ServerError::InvalidPayload)?;

        let key = object.storage_key();

        if is_initial {
            return match self.store.compare_and_swap(&key, 0, payload)? {
                CasOutcome::Accepted { version } => {
                    tracing::debug!(object = %object, version, "initial document accepted");
                    Ok(UpdateOutcome::Accepted { version })
                }
                CasOutcome::Conflict {
                    current: Some(current),
                } => {
                    tracing::debug!(
                        object = %object,
                        stored_version = current.version,
                        "initial update collided with existing document"
                    );
                    Ok(UpdateOutcome::ServerWins { current })
                }
                // A zero expectation can only conflict with an existing
                // document.
                CasOutcome::Conflict { current: None } => Err(ServerError::Storage(
                    StoreError::Corrupted(format!(
                        "compare-and-swap for {key} conflicted without a stored document"
                    )),
                )),
            };
        }

        // Incremental updates require a document to exist: accepting one
        // against an empty store would let a writer that never fetched the
        // document claim it.
        if self.store.read(&key)?.is_none() {
            tracing::debug!(object = %object, "incremental update against empty store");
            return Ok(UpdateOutcome::NoDocument);
        }

        match self.store.compare_and_swap(&key, version, payload)? {
            CasOutcome::Accepted { version } => {
                tracing::debug!(object = %object, version, "document update accepted");
                Ok(UpdateOutcome::Accepted { version })
            }
            CasOutcome::Conflict {
                current: Some(current),
            } => {
                tracing::debug!(
                    object = %object,
                    asserted_version = version,
                    stored_version = current.version,
                    "stale update superseded by stored document"
                );
                Ok(UpdateOutcome::ServerWins { current })
            }
            // Documents are never deleted, so a vanished document between
            // the read and the swap is unreachable; report it as the empty
            // store it claims to be.
            CasOutcome::Conflict { current: None } => Ok(UpdateOutcome::NoDocument),
        }
    }
}
