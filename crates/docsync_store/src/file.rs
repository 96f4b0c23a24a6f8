//! File-backed document store for persistent storage.

use crate::error::{StoreError, StoreResult};
use crate::store::{CasOutcome, DocumentStore, StoredDoc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A file-backed document store.
///
/// Documents survive process restarts. The full document map is kept in
/// memory and persisted as a JSON snapshot after every accepted write; the
/// snapshot is written to a sibling temp file and renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
///
/// # Thread Safety
///
/// The store is thread-safe. The compare-and-swap holds the write lock
/// across the compare, the snapshot write, and the in-memory commit, so the
/// persisted snapshot never runs ahead of or behind the accepted state.
///
/// # Example
///
/// ```no_run
/// use docsync_store::{DocumentStore, FileStore};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("docs.json")).unwrap();
/// store.compare_and_swap("postType/7", 0, "doc".into()).unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    docs: RwLock<HashMap<String, StoredDoc>>,
}

impl FileStore {
    /// Opens or creates a file store at the given path.
    ///
    /// An existing snapshot is loaded; a missing file starts an empty
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents cannot
    /// be decoded.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let docs = match fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Corrupted(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            docs: RwLock::new(docs),
        })
    }

    /// Opens or creates a file store, creating parent directories if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the snapshot
    /// cannot be read.
    pub fn open_with_create_dirs(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the underlying snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// Returns true if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    fn persist(&self, docs: &HashMap<String, StoredDoc>) -> StoreResult<()> {
        let bytes = serde_json::to_vec(docs)
            .map_err(|e| StoreError::Corrupted(format!("snapshot encode: {e}")))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl DocumentStore for FileStore {
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

        // Persist before committing in memory: a failed snapshot must not
        // leave the in-memory state ahead of disk.
        let mut next = docs.clone();
        next.insert(key.to_string(), StoredDoc::new(version, payload));
        self.persist(&next)?;

        *docs = next;
        Ok(CasOutcome::Accepted { version })
    }
}
