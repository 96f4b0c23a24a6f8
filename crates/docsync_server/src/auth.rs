//! Permission gate for sync objects.
//!
//! The gate decides whether the requesting actor may touch a sync object.
//! Authentication and the capability decision are injected as trait
//! objects, so the transport's auth middleware and the host application's
//! permission model both stay outside this crate and tests can substitute
//! either side.
//!
//! ## Check order
//!
//! 1. Unauthenticated callers fail before any other validation
//! 2. The object type must parse as a supported `kind/name`
//! 3. The object id must parse as a positive integer
//! 4. The capability check must grant sync access
//!
//! Steps 2 and 3 produce invalid-request failures; steps 1 and 4 produce
//! authorization failures. Callers can always tell a malformed identifier
//! from a denied one.

use crate::error::ServerError;
use docsync_protocol::{RequestError, SyncObject};
use std::fmt;
use std::sync::Arc;

/// An authenticated actor's identity.
///
/// Id 0 is reserved for "no actor" and never authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Returns true for a usable, non-reserved identity.
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

/// The request's authentication context.
///
/// Implemented by the (external) transport layer; `None` means the call is
/// anonymous.
pub trait AuthContext: Send + Sync {
    /// Returns the actor making the current request, if any.
    fn current_actor(&self) -> Option<ActorId>;
}

/// The host application's sync capability decision.
pub trait CapabilityCheck: Send + Sync {
    /// Returns true if `actor` may sync `object`.
    fn can_sync(&self, actor: ActorId, object: &SyncObject) -> bool;
}

/// A failed gate check.
#[derive(Debug)]
pub enum AccessError {
    /// The identifier failed validation. Carries detail for the caller.
    Invalid(RequestError),
    /// The call was anonymous or carried a reserved actor id.
    Unauthenticated,
    /// The actor lacks the sync capability for the object.
    Denied {
        /// The denied actor.
        actor: ActorId,
    },
}

impl From<AccessError> for ServerError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Invalid(e) => ServerError::InvalidRequest(e),
            // Both authorization failures collapse into the same generic
            // response; the distinction stays in the logs.
            AccessError::Unauthenticated => {
                tracing::debug!("sync denied: unauthenticated caller");
                ServerError::Forbidden
            }
            AccessError::Denied { actor } => {
                tracing::debug!(%actor, "sync denied: capability check failed");
                ServerError::Forbidden
            }
        }
    }
}

/// The permission gate consulted before every persistence operation.
#[derive(Clone)]
pub struct PermissionGate {
    auth: Arc<dyn AuthContext>,
    capabilities: Arc<dyn CapabilityCheck>,
}

impl PermissionGate {
    /// Creates a gate over the given authentication context and capability
    /// check.
    pub fn new(auth: Arc<dyn AuthContext>, capabilities: Arc<dyn CapabilityCheck>) -> Self {
        Self { auth, capabilities }
    }

    /// Authorizes a read of the given sync object.
    ///
    /// Read access runs the identical check as write access.
    pub fn authorize_read(
        &self,
        raw_type: &str,
        raw_id: &str,
    ) -> Result<(ActorId, SyncObject), AccessError> {
        self.authorize_write(raw_type, raw_id)
    }

    /// Authorizes a write to the given sync object.
    pub fn authorize_write(
        &self,
        raw_type: &str,
        raw_id: &str,
    ) -> Result<(ActorId, SyncObject), AccessError> {
        let actor = match self.auth.current_actor() {
            Some(actor) if actor.is_valid() => actor,
            _ => return Err(AccessError::Unauthenticated),
        };

        let object = SyncObject::parse(raw_type, raw_id).map_err(AccessError::Invalid)?;

        if !self.capabilities.can_sync(actor, &object) {
            return Err(AccessError::Denied { actor });
        }

        Ok((actor, object))
    }
}

/// An authentication context fixed at construction time.
///
/// Useful for tests and single-tenant embeddings.
#[derive(Debug, Clone, Copy)]
pub struct StaticAuth {
    actor: Option<ActorId>,
}

impl StaticAuth {
    /// A context authenticated as the given actor id.
    pub fn actor(id: u64) -> Self {
        Self {
            actor: Some(ActorId(id)),
        }
    }

    /// An anonymous context.
    pub fn anonymous() -> Self {
        Self { actor: None }
    }
}

impl AuthContext for StaticAuth {
    fn current_actor(&self) -> Option<ActorId> {
        self.actor
    }
}

/// A capability check that grants every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CapabilityCheck for AllowAll {
    fn can_sync(&self, _actor: ActorId, _object: &SyncObject) -> bool {
        true
    }
}

/// A capability check that denies every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl CapabilityCheck for DenyAll {
    fn can_sync(&self, _actor: ActorId, _object: &SyncObject) -> bool {
        false
    }
}
