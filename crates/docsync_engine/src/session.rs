//! Per-object client sync session.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::merge::DocMerger;
use crate::transport::DocTransport;
use docsync_protocol::{DocResponse, GetDocParams, PutDocParams};
use parking_lot::RwLock;
use std::sync::Arc;

/// Statistics about a session's sync activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Total submit attempts sent to the server.
    pub submissions: u64,
    /// Submits that came back superseded by the stored document.
    pub conflicts: u64,
    /// Writes accepted by the server.
    pub commits: u64,
}

#[derive(Debug, Default)]
struct LocalDoc {
    version: u64,
    payload: Option<String>,
}

/// A client-side sync session for one sync object.
///
/// The session tracks the last server version it has seen and drives the
/// submit / merge / resubmit loop on behalf of the editor. It holds no
/// connection: each call is a single request through the transport.
pub struct DocSession<T: DocTransport, M: DocMerger> {
    config: EngineConfig,
    transport: Arc<T>,
    merger: Arc<M>,
    object_type: String,
    object_id: String,
    local: RwLock<LocalDoc>,
    stats: RwLock<SessionStats>,
}

impl<T: DocTransport, M: DocMerger> DocSession<T, M> {
    /// Creates a session for the given sync object.
    pub fn new(
        config: EngineConfig,
        transport: Arc<T>,
        merger: Arc<M>,
        object_type: impl Into<String>,
        object_id: u64,
    ) -> Self {
        Self {
            config,
            transport,
            merger,
            object_type: object_type.into(),
            object_id: object_id.to_string(),
            local: RwLock::new(LocalDoc::default()),
            stats: RwLock::new(SessionStats::default()),
        }
    }

    /// Returns the last server version this session has seen.
    ///
    /// 0 means no document is known to exist yet.
    pub fn version(&self) -> u64 {
        self.local.read().version
    }

    /// Returns the last document this session has seen or committed.
    pub fn document(&self) -> Option<String> {
        self.local.read().payload.clone()
    }

    /// Returns the session statistics.
    pub fn stats(&self) -> SessionStats {
        *self.stats.read()
    }

    /// Fetches the current server document into the session.
    ///
    /// Returns the payload, or `None` when no document exists yet (the
    /// editor starts a new one and the next publish is an initial update).
    pub fn load(&self) -> EngineResult<Option<String>> {
        let request = GetDocParams::new(
            self.object_type.clone(),
            self.object_id.clone(),
            self.version(),
        );
        let response = self.transport.fetch(&request)?;

        if !response.success {
            return Err(EngineError::Rejected(
                response.error.unwrap_or_else(|| "fetch failed".into()),
            ));
        }

        let mut local = self.local.write();
        match (response.crdt_doc, response.crdt_version) {
            (Some(payload), Some(version)) => {
                local.version = version;
                local.payload = Some(payload.clone());
                Ok(Some(payload))
            }
            (None, _) => {
                local.version = 0;
                local.payload = None;
                Ok(None)
            }
            (Some(_), None) => Err(EngineError::Protocol(
                "document response missing its version".into(),
            )),
        }
    }

    /// Publishes a document, merging and resubmitting until the server
    /// accepts it or the retry budget runs out.
    ///
    /// Returns the committed version. The first publish of a session that
    /// has seen no document is sent as an initial update.
    pub fn publish(&self, payload: impl Into<String>) -> EngineResult<u64> {
        let mut payload = payload.into();
        let max_attempts = self.config.retry.max_attempts;

        for attempt in 0..max_attempts {
            let delay = self.config.retry.delay_for_attempt(attempt);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }

            let version = self.version();
            let request = PutDocParams::new(
                self.object_type.clone(),
                self.object_id.clone(),
                version,
                payload.clone(),
                version == 0,
            );

            self.stats.write().submissions += 1;
            let response = self.transport.submit(&request)?;

            if !response.success {
                return Err(EngineError::Rejected(
                    response.error.unwrap_or_else(|| "submit failed".into()),
                ));
            }

            match (response.crdt_doc, response.crdt_version) {
                // Accepted: our payload is the stored document now.
                (None, Some(committed)) => {
                    let mut local = self.local.write();
                    local.version = committed;
                    local.payload = Some(payload);
                    self.stats.write().commits += 1;
                    tracing::debug!(version = committed, "document committed");
                    return Ok(committed);
                }
                // Superseded: merge and go again from the server's state.
                (Some(authoritative), Some(server_version)) => {
                    self.stats.write().conflicts += 1;
                    tracing::debug!(
                        attempt,
                        server_version,
                        "write superseded, merging and retrying"
                    );

                    payload = self.merger.merge(&payload, &authoritative);
                    let mut local = self.local.write();
                    local.version = server_version;
                    local.payload = Some(authoritative);
                }
                _ => {
                    return Err(EngineError::Protocol(
                        "submit response missing its version".into(),
                    ))
                }
            }
        }

        Err(EngineError::RetriesExhausted {
            attempts: max_attempts,
        })
    }
}
