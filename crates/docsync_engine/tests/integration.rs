//! Client engine against a real in-process sync server.

use docsync_engine::{
    DocSession, DocTransport, EngineConfig, EngineError, EngineResult, MergeFn, RetryConfig,
};
use docsync_protocol::{DocResponse, GetDocParams, PutDocParams};
use docsync_server::{AllowAll, ServerConfig, StaticAuth, SyncServer};
use docsync_store::InMemoryStore;
use std::sync::Arc;
use std::time::Duration;

/// Transport adapter that calls the server directly, the way an HTTP
/// binding would.
struct InProcessTransport {
    server: Arc<SyncServer>,
}

impl DocTransport for InProcessTransport {
    fn fetch(&self, request: &GetDocParams) -> EngineResult<DocResponse> {
        self.server.get_document(request).map_err(map_error)
    }

    fn submit(&self, request: &PutDocParams) -> EngineResult<DocResponse> {
        self.server.put_document(request).map_err(map_error)
    }
}

fn map_error(err: docsync_server::ServerError) -> EngineError {
    if err.is_server_error() {
        EngineError::transport_retryable(err.to_string())
    } else {
        EngineError::transport_fatal(err.to_string())
    }
}

fn harness() -> (Arc<SyncServer>, Arc<InProcessTransport>) {
    let server = Arc::new(SyncServer::new(
        ServerConfig::default(),
        Arc::new(InMemoryStore::new()),
        Arc::new(StaticAuth::actor(1)),
        Arc::new(AllowAll),
    ));
    let transport = Arc::new(InProcessTransport {
        server: Arc::clone(&server),
    });
    (server, transport)
}

fn quick_retry() -> EngineConfig {
    EngineConfig::new().with_retry(RetryConfig::new(5).with_initial_delay(Duration::ZERO))
}

#[test]
fn initialize_edit_and_reload() {
    let (_server, transport) = harness();

    let merger = MergeFn(|local: &str, authoritative: &str| format!("{authoritative}+{local}"));
    let session = DocSession::new(
        quick_retry(),
        Arc::clone(&transport),
        Arc::new(merger),
        "postType/post",
        7,
    );

    assert_eq!(session.load().unwrap(), None);
    assert_eq!(session.publish("draft-1").unwrap(), 1);
    assert_eq!(session.publish("draft-2").unwrap(), 2);

    // A second session sees the committed state.
    let reader = DocSession::new(
        quick_retry(),
        transport,
        Arc::new(merger),
        "postType/post",
        7,
    );
    assert_eq!(reader.load().unwrap(), Some("draft-2".into()));
    assert_eq!(reader.version(), 2);
}

#[test]
fn two_sessions_converge_after_conflict() {
    let (_server, transport) = harness();
    let merger = MergeFn(|local: &str, authoritative: &str| format!("{authoritative}+{local}"));

    let alice = DocSession::new(
        quick_retry(),
        Arc::clone(&transport),
        Arc::new(merger),
        "postType/post",
        7,
    );
    let bob = DocSession::new(
        quick_retry(),
        Arc::clone(&transport),
        Arc::new(merger),
        "postType/post",
        7,
    );

    // Both start from the same version 1 state.
    alice.publish("base").unwrap();
    bob.load().unwrap();

    // Alice commits version 2 first; Bob's write is stale and merges.
    alice.publish("alice-edit").unwrap();
    let version = bob.publish("bob-edit").unwrap();

    assert_eq!(version, 3);
    assert_eq!(bob.document(), Some("alice-edit+bob-edit".into()));
    assert_eq!(bob.stats().conflicts, 1);

    // Alice reloads and sees the merged result.
    assert_eq!(alice.load().unwrap(), Some("alice-edit+bob-edit".into()));
}

#[test]
fn colliding_initializers_converge() {
    let (_server, transport) = harness();
    let merger = MergeFn(|local: &str, authoritative: &str| format!("{authoritative}+{local}"));

    let first = DocSession::new(
        quick_retry(),
        Arc::clone(&transport),
        Arc::new(merger),
        "postType/post",
        7,
    );
    let second = DocSession::new(
        quick_retry(),
        Arc::clone(&transport),
        Arc::new(merger),
        "postType/post",
        7,
    );

    // Neither session has loaded; both believe they are first.
    assert_eq!(first.publish("one").unwrap(), 1);
    let version = second.publish("two").unwrap();

    // The second initializer lost the claim, merged, and committed on top.
    assert_eq!(version, 2);
    assert_eq!(second.document(), Some("one+two".into()));
}

#[test]
fn forbidden_server_is_a_fatal_transport_error() {
    let server = Arc::new(SyncServer::new(
        ServerConfig::default(),
        Arc::new(InMemoryStore::new()),
        Arc::new(StaticAuth::anonymous()),
        Arc::new(AllowAll),
    ));
    let transport = Arc::new(InProcessTransport { server });

    let session = DocSession::new(
        quick_retry(),
        transport,
        Arc::new(docsync_engine::PreferAuthoritative),
        "postType/post",
        7,
    );

    let err = session.load().unwrap_err();
    assert!(matches!(err, EngineError::Transport { retryable: false, .. }));
}
