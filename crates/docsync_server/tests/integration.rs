//! End-to-end tests of the sync server over real stores.

use docsync_protocol::{DocResponse, GetDocParams, PutDocParams};
use docsync_server::{
    AllowAll, ServerConfig, ServerError, StaticAuth, SyncServer,
};
use docsync_store::{CasOutcome, DocumentStore, FileStore, InMemoryStore, StoreResult, StoredDoc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn server_with_store(store: Arc<dyn DocumentStore>, auth: StaticAuth) -> SyncServer {
    // Surface server logs under RUST_LOG when debugging test failures.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    SyncServer::new(
        ServerConfig::default(),
        store,
        Arc::new(auth),
        Arc::new(AllowAll),
    )
}

fn put(id: &str, version: u64, doc: &str, initial: bool) -> PutDocParams {
    PutDocParams::new("postType/post", id, version, doc, initial)
}

fn get(id: &str, version: u64) -> GetDocParams {
    GetDocParams::new("postType/post", id, version)
}

/// A store wrapper that counts every call it receives.
struct CountingStore {
    inner: InMemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    fn new() -> Self {
        Self {
            inner: InMemoryStore::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentStore for CountingStore {
    fn read(&self, key: &str) -> StoreResult<Option<StoredDoc>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.read(key)
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected_version: u64,
        payload: String,
    ) -> StoreResult<CasOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compare_and_swap(key, expected_version, payload)
    }
}

#[test]
fn initial_write_then_conflict_then_read() {
    let server = server_with_store(Arc::new(InMemoryStore::new()), StaticAuth::actor(1));

    // No prior document: the initial update lands at version 1.
    let response = server.put_document(&put("7", 0, "A", true)).unwrap();
    assert_eq!(response, DocResponse::accepted(1));

    // Client B advances to version 2.
    let response = server.put_document(&put("7", 1, "B", false)).unwrap();
    assert_eq!(response, DocResponse::accepted(2));

    // Client A still thinks the version is 1 and receives B's document.
    let response = server.put_document(&put("7", 1, "A2", false)).unwrap();
    assert_eq!(response, DocResponse::document("B", 2));

    // Reads return the authoritative state.
    let response = server.get_document(&get("7", 0)).unwrap();
    assert_eq!(response, DocResponse::document("B", 2));
}

#[test]
fn colliding_initial_updates_are_idempotent() {
    let server = server_with_store(Arc::new(InMemoryStore::new()), StaticAuth::actor(1));

    let response = server.put_document(&put("7", 0, "A", true)).unwrap();
    assert_eq!(response, DocResponse::accepted(1));

    // A second initializer loses and gets the first document, unmodified.
    let response = server.put_document(&put("7", 0, "B", true)).unwrap();
    assert_eq!(response, DocResponse::document("A", 1));

    let response = server.get_document(&get("7", 0)).unwrap();
    assert_eq!(response, DocResponse::document("A", 1));
}

#[test]
fn read_of_never_written_object_is_empty() {
    let server = server_with_store(Arc::new(InMemoryStore::new()), StaticAuth::actor(1));
    let response = server.get_document(&get("999", 0)).unwrap();
    assert_eq!(response, DocResponse::empty());
}

#[test]
fn invalid_id_never_reaches_the_store() {
    let store = Arc::new(CountingStore::new());
    let server = server_with_store(
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        StaticAuth::actor(1),
    );

    let err = server.put_document(&put("-1", 0, "A", true)).unwrap_err();
    assert!(matches!(err, ServerError::InvalidRequest(_)));
    assert_eq!(store.calls(), 0);
}

#[test]
fn anonymous_caller_never_reaches_the_store() {
    let store = Arc::new(CountingStore::new());

    // A document exists for the object the anonymous caller will ask for.
    store
        .compare_and_swap("postType/7", 0, "secret".into())
        .unwrap();
    let seeded_calls = store.calls();

    let server = server_with_store(
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        StaticAuth::anonymous(),
    );

    // Valid identifiers and payload; the actor is the only problem.
    let err = server.get_document(&get("7", 0)).unwrap_err();
    assert!(matches!(err, ServerError::Forbidden));
    assert!(!err.to_string().contains("secret"));

    let err = server.put_document(&put("7", 0, "A", true)).unwrap_err();
    assert!(matches!(err, ServerError::Forbidden));

    assert_eq!(store.calls(), seeded_calls);
}

#[test]
fn racing_writers_converge_through_merge_and_retry() {
    let server = Arc::new(server_with_store(
        Arc::new(InMemoryStore::new()),
        StaticAuth::actor(1),
    ));
    server.put_document(&put("7", 0, "base", true)).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let server = Arc::clone(&server);
            std::thread::spawn(move || {
                // Each writer starts from version 1 and resubmits against
                // whatever the server returns until accepted.
                let mut version = 1u64;
                let mut payload = format!("writer-{i}");
                loop {
                    let response = server
                        .put_document(&put("7", version, &payload, false))
                        .unwrap();
                    match (response.crdt_doc, response.crdt_version) {
                        (None, Some(accepted)) => return accepted,
                        (Some(current), Some(current_version)) => {
                            payload = format!("{current}+{payload}");
                            version = current_version;
                        }
                        _ => panic!("unexpected response shape"),
                    }
                }
            })
        })
        .collect();

    let mut accepted_versions: Vec<u64> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    accepted_versions.sort_unstable();

    // Every writer eventually committed, each at its own version.
    assert_eq!(accepted_versions, vec![2, 3, 4, 5]);

    let final_doc = server.get_document(&get("7", 0)).unwrap();
    assert_eq!(final_doc.crdt_version, Some(5));
}

#[test]
fn documents_survive_server_restart_on_file_store() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("docs.json");

    {
        let store = Arc::new(FileStore::open(&path).unwrap());
        let server = server_with_store(store, StaticAuth::actor(1));
        server.put_document(&put("7", 0, "A", true)).unwrap();
        server.put_document(&put("7", 1, "B", false)).unwrap();
    }

    let store = Arc::new(FileStore::open(&path).unwrap());
    let server = server_with_store(store, StaticAuth::actor(1));
    let response = server.get_document(&get("7", 0)).unwrap();
    assert_eq!(response, DocResponse::document("B", 2));
}
