//! Wire parameter and response types for the sync endpoints.
//!
//! Parameter structs mirror the wire field names exactly
//! (`syncObjectType`, `syncObjectId`, `crdtVersion`, `crdtDoc`,
//! `isInitialUpdate`) and carry identifiers in their unvalidated string
//! form; identifier validation happens through
//! [`SyncObject::parse`](crate::SyncObject::parse) once the caller is
//! authenticated.

use serde::{Deserialize, Serialize};

/// Raw parameters of a document fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetDocParams {
    /// The sync object type in `kind/name` form.
    pub sync_object_type: String,
    /// The sync object id as received on the wire.
    pub sync_object_id: String,
    /// The caller's last known document version.
    pub crdt_version: u64,
}

impl GetDocParams {
    /// Creates fetch parameters.
    pub fn new(
        sync_object_type: impl Into<String>,
        sync_object_id: impl Into<String>,
        crdt_version: u64,
    ) -> Self {
        Self {
            sync_object_type: sync_object_type.into(),
            sync_object_id: sync_object_id.into(),
            crdt_version,
        }
    }
}

/// Raw parameters of a document update.
///
/// `isInitialUpdate` has no default on purpose: a missing flag is a
/// deserialization error, never a silently-assumed incremental or initial
/// write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PutDocParams {
    /// The sync object type in `kind/name` form.
    pub sync_object_type: String,
    /// The sync object id as received on the wire.
    pub sync_object_id: String,
    /// The version the caller asserts as current.
    pub crdt_version: u64,
    /// The serialized CRDT document to persist. Opaque to the server.
    pub crdt_doc: String,
    /// Whether this write claims to create the first document for the
    /// object.
    pub is_initial_update: bool,
}

impl PutDocParams {
    /// Creates update parameters.
    pub fn new(
        sync_object_type: impl Into<String>,
        sync_object_id: impl Into<String>,
        crdt_version: u64,
        crdt_doc: impl Into<String>,
        is_initial_update: bool,
    ) -> Self {
        Self {
            sync_object_type: sync_object_type.into(),
            sync_object_id: sync_object_id.into(),
            crdt_version,
            crdt_doc: crdt_doc.into(),
            is_initial_update,
        }
    }
}

/// The response envelope for both sync endpoints.
///
/// Negotiation outcomes (a stored document superseding the submitted one)
/// are successes carrying the authoritative document; only client-fixable
/// rejections use the `success: false` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocResponse {
    /// Whether the call succeeded at the negotiation level.
    pub success: bool,
    /// The authoritative document payload, when one is returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crdt_doc: Option<String>,
    /// The authoritative document version, when one is returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crdt_version: Option<u64>,
    /// The failure reason, for `success: false` responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocResponse {
    /// A write was accepted as submitted; the caller's document is now the
    /// stored state at `version`.
    pub fn accepted(version: u64) -> Self {
        Self {
            success: true,
            crdt_doc: None,
            crdt_version: Some(version),
            error: None,
        }
    }

    /// The authoritative stored document, returned by fetches and by
    /// superseded writes.
    pub fn document(payload: impl Into<String>, version: u64) -> Self {
        Self {
            success: true,
            crdt_doc: Some(payload.into()),
            crdt_version: Some(version),
            error: None,
        }
    }

    /// A fetch of an object with no stored document. An empty result, not
    /// an error: the client starts a new document.
    pub fn empty() -> Self {
        Self {
            success: true,
            crdt_doc: None,
            crdt_version: None,
            error: None,
        }
    }

    /// A client-fixable rejection.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            crdt_doc: None,
            crdt_version: None,
            error: Some(message.into()),
        }
    }

    /// Returns true if this response carries a document.
    pub fn has_document(&self) -> bool {
        self.crdt_doc.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync_object::SyncObject;

    #[test]
    fn get_params_wire_names() {
        let params = GetDocParams::new("postType/post", "7", 3);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["syncObjectType"], "postType/post");
        assert_eq!(json["syncObjectId"], "7");
        assert_eq!(json["crdtVersion"], 3);
    }

    #[test]
    fn get_params_identifiers_stay_raw() {
        // Identifier validation is the gate's job; params carry the wire
        // strings untouched, including invalid ones.
        let params = GetDocParams::new("postType", "-1", 0);
        assert_eq!(params.sync_object_type, "postType");
        assert_eq!(params.sync_object_id, "-1");
        assert!(SyncObject::parse(&params.sync_object_type, &params.sync_object_id).is_err());
    }

    #[test]
    fn put_params_wire_roundtrip() {
        let params = PutDocParams::new("postType/post", "7", 1, "doc-state", true);
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"crdtDoc\":\"doc-state\""));
        assert!(json.contains("\"isInitialUpdate\":true"));

        let decoded: PutDocParams = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn put_params_initial_flag_is_required() {
        let json = r#"{
            "syncObjectType": "postType/post",
            "syncObjectId": "7",
            "crdtVersion": 0,
            "crdtDoc": "doc-state"
        }"#;
        let result: Result<PutDocParams, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn put_params_doc_is_required() {
        let json = r#"{
            "syncObjectType": "postType/post",
            "syncObjectId": "7",
            "crdtVersion": 0,
            "isInitialUpdate": true
        }"#;
        let result: Result<PutDocParams, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn response_accepted_shape() {
        let json = serde_json::to_value(DocResponse::accepted(2)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["crdtVersion"], 2);
        assert!(json.get("crdtDoc").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn response_document_shape() {
        let response = DocResponse::document("state", 4);
        assert!(response.has_document());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["crdtDoc"], "state");
        assert_eq!(json["crdtVersion"], 4);
    }

    #[test]
    fn response_empty_omits_fields() {
        let json = serde_json::to_string(&DocResponse::empty()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn response_failure_shape() {
        let json = serde_json::to_value(DocResponse::failure("bad payload")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "bad payload");
    }
}
