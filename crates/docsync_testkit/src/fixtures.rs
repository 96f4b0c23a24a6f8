//! Server and store fixtures for tests.

use docsync_protocol::SyncObject;
use docsync_server::{AllowAll, ServerConfig, StaticAuth, SyncServer};
use docsync_store::{CasOutcome, DocumentStore, InMemoryStore, StoreResult, StoredDoc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Builds a `postType/post` sync object with the given id.
///
/// # Panics
///
/// Panics on id 0; fixtures are for valid objects.
pub fn post_object(id: u64) -> SyncObject {
    SyncObject::parse("postType/post", &id.to_string()).expect("valid post object")
}

/// A server over an empty in-memory store that authenticates actor 1 and
/// grants every capability.
pub fn allow_all_server() -> SyncServer {
    allow_all_server_with_store(Arc::new(InMemoryStore::new()))
}

/// A grant-everything server over the given store.
pub fn allow_all_server_with_store(store: Arc<dyn DocumentStore>) -> SyncServer {
    SyncServer::new(
        ServerConfig::default(),
        store,
        Arc::new(StaticAuth::actor(1)),
        Arc::new(AllowAll),
    )
}

/// A server that sees every caller as anonymous.
pub fn anonymous_server_with_store(store: Arc<dyn DocumentStore>) -> SyncServer {
    SyncServer::new(
        ServerConfig::default(),
        store,
        Arc::new(StaticAuth::anonymous()),
        Arc::new(AllowAll),
    )
}

/// An in-memory store pre-seeded with `(key, doc)` pairs.
pub fn seeded_store(docs: impl IntoIterator<Item = (String, StoredDoc)>) -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::with_docs(docs.into_iter().collect()))
}

/// A store wrapper that records how often it is reached.
///
/// Wrap the store a server is built over, then assert
/// [`SpyStore::total_calls`] stayed at zero to prove authorization happened
/// before persistence.
pub struct SpyStore {
    inner: Arc<dyn DocumentStore>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl SpyStore {
    /// Wraps a store, counting every call through it.
    pub fn wrap(inner: Arc<dyn DocumentStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        })
    }

    /// Wraps a fresh in-memory store.
    pub fn new() -> Arc<Self> {
        Self::wrap(Arc::new(InMemoryStore::new()))
    }

    /// Number of reads observed.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of compare-and-swap attempts observed.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Total store calls observed.
    pub fn total_calls(&self) -> usize {
        self.reads() + self.writes()
    }
}

impl DocumentStore for SpyStore {
    fn read(&self, key: &str) -> StoreResult<Option<StoredDoc>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(key)
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected_version: u64,
        payload: String,
    ) -> StoreResult<CasOutcome> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.compare_and_swap(key, expected_version, payload)
    }
}
