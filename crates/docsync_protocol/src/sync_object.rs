//! Sync-object addressing.
//!
//! A sync object is the editable resource a CRDT document is attached to.
//! It is addressed by a type (`kind/name`, e.g. `postType/post`) and a
//! positive integer id. The storage key is derived from the kind and the id
//! only; the entity name routes capability checks but does not address the
//! document.

use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The capability domain of a sync object.
///
/// Only post-type entities are served today. The wire format always carries
/// `kind/name`, so new kinds can be introduced without changing the
/// identifier shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncObjectKind {
    /// An editable post-type entity (`postType` on the wire).
    PostType,
}

impl SyncObjectKind {
    /// Returns the wire representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncObjectKind::PostType => "postType",
        }
    }

    /// Parses a kind from its wire representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "postType" => Some(SyncObjectKind::PostType),
            _ => None,
        }
    }
}

impl fmt::Display for SyncObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `kind/name` sync object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncObjectType {
    /// The capability domain.
    pub kind: SyncObjectKind,
    /// The entity name within the kind (e.g. `post`). Advisory: it selects
    /// capability routing, not the storage key.
    pub name: String,
}

impl SyncObjectType {
    /// Parses a sync object type from its `kind/name` wire form.
    ///
    /// The string must split into exactly two non-empty segments, and the
    /// kind must be one this service serves. Anything else is an
    /// invalid-request failure, distinct from an authorization failure.
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        if raw.is_empty() {
            return Err(RequestError::MalformedObjectType(raw.to_string()));
        }

        let mut parts = raw.splitn(2, '/');
        let kind_raw = parts.next().unwrap_or_default();
        let name = match parts.next() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(RequestError::MalformedObjectType(raw.to_string())),
        };

        if kind_raw.is_empty() {
            return Err(RequestError::MalformedObjectType(raw.to_string()));
        }

        let kind = SyncObjectKind::parse(kind_raw)
            .ok_or_else(|| RequestError::UnsupportedKind(kind_raw.to_string()))?;

        Ok(Self {
            kind,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for SyncObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// A positive, non-zero sync object id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SyncObjectId(u64);

impl SyncObjectId {
    /// Creates an id from a known-positive integer.
    ///
    /// Returns `None` for zero.
    pub fn new(id: u64) -> Option<Self> {
        if id == 0 {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Parses an id from its wire string form.
    ///
    /// Rejects non-numeric input, zero, and negative values.
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        raw.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| RequestError::InvalidObjectId(raw.to_string()))
    }

    /// Returns the numeric id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SyncObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The addressable editable resource a document is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncObject {
    /// The parsed `kind/name` type.
    pub object_type: SyncObjectType,
    /// The resource id within the kind.
    pub id: SyncObjectId,
}

impl SyncObject {
    /// Creates a sync object.
    pub fn new(object_type: SyncObjectType, id: SyncObjectId) -> Self {
        Self { object_type, id }
    }

    /// Parses a sync object from raw type and id strings.
    pub fn parse(raw_type: &str, raw_id: &str) -> Result<Self, RequestError> {
        let object_type = SyncObjectType::parse(raw_type)?;
        let id = SyncObjectId::parse(raw_id)?;
        Ok(Self { object_type, id })
    }

    /// Returns the storage key for this object's document.
    ///
    /// Kind and id are the sole addressing key; the entity name is excluded.
    pub fn storage_key(&self) -> String {
        format!("{}/{}", self.object_type.kind, self.id)
    }
}

impl fmt::Display for SyncObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.object_type, self.id)
    }
}
