//! Document store trait definition.

use crate::error::StoreResult;
use serde::{Deserialize, Serialize};

/// A stored document: an opaque payload at a version.
///
/// Version 0 never appears in a stored document; absence of a document is
/// the "version 0" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDoc {
    /// The version of this document. Starts at 1 and increments by exactly
    /// 1 per accepted write.
    pub version: u64,
    /// The serialized document state. Opaque: the store never inspects it.
    pub payload: String,
}

impl StoredDoc {
    /// Creates a stored document.
    pub fn new(version: u64, payload: impl Into<String>) -> Self {
        Self {
            version,
            payload: payload.into(),
        }
    }
}

/// The outcome of a compare-and-swap write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasOutcome {
    /// The expected version matched; the payload is now stored at
    /// `version` (the expected version plus one).
    Accepted {
        /// The new stored version.
        version: u64,
    },
    /// The expected version was stale. `current` carries the stored
    /// document, or `None` when the expectation was non-zero but no
    /// document exists.
    Conflict {
        /// The authoritative stored document, if any.
        current: Option<StoredDoc>,
    },
}

impl CasOutcome {
    /// Returns true if the write was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, CasOutcome::Accepted { .. })
    }
}

/// A versioned document store.
///
/// Stores hold at most one current document per key. Keys are opaque
/// strings derived from sync-object addressing; stores impose no structure
/// on them.
///
/// # Invariants
///
/// - `compare_and_swap` accepts iff `expected_version` equals the stored
///   version, where an absent document counts as version 0
/// - An accepted write stores `expected_version + 1`; versions never skip
///   or decrement
/// - The comparison and the write are one indivisible step: two concurrent
///   callers asserting the same version cannot both be accepted
/// - `read` returns the latest stored state and never fails on an absent
///   document
/// - Implementations must be `Send + Sync`
pub trait DocumentStore: Send + Sync {
    /// Reads the current document for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure; an absent document is
    /// `Ok(None)`.
    fn read(&self, key: &str) -> StoreResult<Option<StoredDoc>>;

    /// Atomically writes `payload` at `expected_version + 1` if the stored
    /// version equals `expected_version`.
    ///
    /// An expectation of 0 claims first-write: it is accepted only when no
    /// document exists for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure; a version mismatch is a
    /// normal [`CasOutcome::Conflict`].
    fn compare_and_swap(
        &self,
        key: &str,
        expected_version: u64,
        payload: String,
    ) -> StoreResult<CasOutcome>;
}
