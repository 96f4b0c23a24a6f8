//! Transport layer abstraction for the sync endpoints.

use crate::error::{EngineError, EngineResult};
use docsync_protocol::{DocResponse, GetDocParams, PutDocParams};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A transport that carries sync requests to the server.
///
/// Abstracts the network layer so sessions can run over HTTP, an in-process
/// server, or a mock in tests.
pub trait DocTransport: Send + Sync {
    /// Fetches the current document for a sync object.
    fn fetch(&self, request: &GetDocParams) -> EngineResult<DocResponse>;

    /// Submits a document write.
    fn submit(&self, request: &PutDocParams) -> EngineResult<DocResponse>;
}

/// A mock transport scripted with queued responses.
///
/// Responses are consumed in order, one per call, so a test can script an
/// entire conflict-retry conversation up front.
#[derive(Debug, Default)]
pub struct MockTransport {
    fetch_responses: Mutex<VecDeque<DocResponse>>,
    submit_responses: Mutex<VecDeque<DocResponse>>,
    submitted: Mutex<Vec<PutDocParams>>,
}

impl MockTransport {
    /// Creates a new mock transport with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a fetch response.
    pub fn push_fetch_response(&self, response: DocResponse) {
        if let Ok(mut queue) = self.fetch_responses.lock() {
            queue.push_back(response);
        }
    }

    /// Queues a submit response.
    pub fn push_submit_response(&self, response: DocResponse) {
        if let Ok(mut queue) = self.submit_responses.lock() {
            queue.push_back(response);
        }
    }

    /// Returns every submit request seen so far.
    pub fn submitted(&self) -> Vec<PutDocParams> {
        self.submitted
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl DocTransport for MockTransport {
    fn fetch(&self, _request: &GetDocParams) -> EngineResult<DocResponse> {
        self.fetch_responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .ok_or_else(|| EngineError::Protocol("no scripted fetch response".into()))
    }

    fn submit(&self, request: &PutDocParams) -> EngineResult<DocResponse> {
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(request.clone());
        }
        self.submit_responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .ok_or_else(|| EngineError::Protocol("no scripted submit response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_consumes_responses_in_order() {
        let transport = MockTransport::new();
        transport.push_submit_response(DocResponse::document("server", 2));
        transport.push_submit_response(DocResponse::accepted(3));

        let request = PutDocParams::new("postType/post", "7", 1, "local", false);
        let first = transport.submit(&request).unwrap();
        assert!(first.has_document());

        let second = transport.submit(&request).unwrap();
        assert_eq!(second, DocResponse::accepted(3));

        assert!(transport.submit(&request).is_err());
        assert_eq!(transport.submitted().len(), 3);
    }

    #[test]
    fn mock_fetch_without_script_errors() {
        let transport = MockTransport::new();
        let request = GetDocParams::new("postType/post", "7", 0);
        assert!(matches!(
            transport.fetch(&request),
            Err(EngineError::Protocol(_))
        ));
    }
}
