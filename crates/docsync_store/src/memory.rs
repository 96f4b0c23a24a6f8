//! In-memory document store for testing and ephemeral use.

use crate::error::StoreResult;
use crate::store::{CasOutcome, DocumentStore, StoredDoc};
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory document store.
///
/// Suitable for unit tests, integration tests, and ephemeral deployments
/// that do not need documents to survive a restart.
///
/// # Thread Safety
///
/// The store is thread-safe. The compare-and-swap holds the write lock for
/// the whole compare-then-write step, so racing writers serialize on it.
///
/// # Example
///
/// ```rust
/// use docsync_store::{DocumentStore, InMemoryStore};
///
/// let store = InMemoryStore::new();
/// store.compare_and_swap("postType/7", 0, "doc".into()).unwrap();
/// assert_eq!(store.read("postType/7").unwrap().unwrap().version, 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    docs: RwLock<HashMap<String, StoredDoc>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with documents.
    ///
    /// Useful for testing recovery and conflict scenarios.
    #[must_use]
    pub fn with_docs(docs: HashMap<String, StoredDoc>) -> Self {
        Self {
            docs: RwLock::new(docs),
        }
    }

    /// Returns the number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// Returns true if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Removes all documents.
    pub fn clear(&self) {
        self.docs.write().clear();
    }
}

impl DocumentStore for InMemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<StoredDoc>> {
        Ok(self.docs.read().get(key).cloned())
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected_version: u64,
        payload: String,
    ) -> StoreResult<CasOutcome> {
        let mut docs = self.docs.write();
        let current_version = docs.get(key).map(|doc| doc.version).unwrap_or(0);

        if current_version != expected_version {
            return Ok(CasOutcome::Conflict {
                current: docs.get(key).cloned(),
            });
        }

        let version = expected_version + 1;
        docs.insert(key.to_string(), StoredDoc::new(version, payload));
        Ok(CasOutcome::Accepted { version })
    }
}
