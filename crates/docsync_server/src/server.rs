//! Main sync server facade.

use crate::auth::{AuthContext, CapabilityCheck, PermissionGate};
use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::handler::SyncHandler;
use crate::persistence::{DocPersistence, PayloadValidator, SizeLimitValidator};
use docsync_protocol::{DocResponse, GetDocParams, PutDocParams};
use docsync_store::DocumentStore;
use std::sync::Arc;

/// The document sync server.
///
/// Wires a permission gate, a payload validator, and the persistence layer
/// over an injected document store. The HTTP transport is an external
/// concern: expose endpoints that call [`SyncServer::get_document`] and
/// [`SyncServer::put_document`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use docsync_protocol::PutDocParams;
/// use docsync_server::{AllowAll, ServerConfig, StaticAuth, SyncServer};
/// use docsync_store::InMemoryStore;
///
/// let server = SyncServer::new(
///     ServerConfig::default(),
///     Arc::new(InMemoryStore::new()),
///     Arc::new(StaticAuth::actor(1)),
///     Arc::new(AllowAll),
/// );
///
/// let params = PutDocParams::new("postType/post", "7", 0, "doc", true);
/// let response = server.put_document(&params).unwrap();
/// assert!(response.success);
/// ```
pub struct SyncServer {
    handler: SyncHandler,
}

impl SyncServer {
    /// Creates a sync server with the default payload validator derived
    /// from the configuration.
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthContext>,
        capabilities: Arc<dyn CapabilityCheck>,
    ) -> Self {
        let validator = Arc::new(SizeLimitValidator::new(config.max_payload_bytes));
        Self::with_validator(store, auth, capabilities, validator)
    }

    /// Creates a sync server with a custom payload validator.
    pub fn with_validator(
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthContext>,
        capabilities: Arc<dyn CapabilityCheck>,
        validator: Arc<dyn PayloadValidator>,
    ) -> Self {
        let gate = PermissionGate::new(auth, capabilities);
        let persistence = DocPersistence::new(store, validator);
        Self {
            handler: SyncHandler::new(gate, persistence),
        }
    }

    /// Fetches the current document for a sync object.
    pub fn get_document(&self, params: &GetDocParams) -> ServerResult<DocResponse> {
        self.handler.handle_get(params)
    }

    /// Submits a document write for a sync object.
    pub fn put_document(&self, params: &PutDocParams) -> ServerResult<DocResponse> {
        self.handler.handle_put(params)
    }
}
