//! Request handlers for the sync endpoints.

use crate::auth::PermissionGate;
use crate::error::{ServerError, ServerResult};
use crate::persistence::{DocPersistence, UpdateOutcome};
use docsync_protocol::{DocResponse, GetDocParams, PutDocParams};

/// Handler for document sync requests.
///
/// Every request is authorized before persistence is touched; the gate
/// performs the unauthenticated fast-fail and identifier validation as part
/// of the authorize step. Negotiation outcomes come back as success-shaped
/// responses; client-fixable payload rejections use the `success: false`
/// shape; authorization and storage failures propagate as [`ServerError`]
/// for the transport layer to map onto status codes.
///
/// [`ServerError`]: crate::ServerError
pub struct SyncHandler {
    gate: PermissionGate,
    persistence: DocPersistence,
}

impl SyncHandler {
    /// Creates a handler over the given gate and persistence layer.
    pub fn new(gate: PermissionGate, persistence: DocPersistence) -> Self {
        Self { gate, persistence }
    }

    /// Handles a document fetch.
    ///
    /// Always answers with the latest stored state; an object that has
    /// never been written yields an empty success, not an error.
    pub fn handle_get(&self, params: &GetDocParams) -> ServerResult<DocResponse> {
        let (_actor, object) = self
            .gate
            .authorize_read(&params.sync_object_type, &params.sync_object_id)?;

        let response = match self.persistence.get(&object, params.crdt_version)? {
            Some(doc) => DocResponse::document(doc.payload, doc.version),
            None => DocResponse::empty(),
        };
        Ok(response)
    }

    /// Handles a document update.
    pub fn handle_put(&self, params: &PutDocParams) -> ServerResult<DocResponse> {
        let (_actor, object) = self
            .gate
            .authorize_write(&params.sync_object_type, &params.sync_object_id)?;

        let outcome = match self.persistence.update(
            &object,
            params.crdt_doc.clone(),
            params.crdt_version,
            params.is_initial_update,
        ) {
            Ok(outcome) => outcome,
            // Payload rejections are client-fixable: keep the transport
            // success shape and carry the validator's reason.
            Err(ServerError::InvalidPayload(reason)) => {
                return Ok(DocResponse::failure(reason));
            }
            Err(e) => return Err(e),
        };

        let response = match outcome {
            UpdateOutcome::Accepted { version } => DocResponse::accepted(version),
            UpdateOutcome::ServerWins { current } => {
                DocResponse::document(current.payload, current.version)
            }
            UpdateOutcome::NoDocument => DocResponse::failure(
                "no document exists for this sync object; submit an initial update",
            ),
        };
        Ok(response)
    }
}
