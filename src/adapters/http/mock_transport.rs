//! Mock transport for testing.
//!
//! Records every outgoing request and replays canned response bodies.
//! Supports:
//! - Queued responses (consumed in order)
//! - A fallback response once the queue is empty
//! - Error injection

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::merchant::{xml, MerchantPayError, ResponseMap};
use crate::ports::{OutgoingRequest, PayTransport};

const DEFAULT_RESPONSE: &str =
    "<xml><return_code><![CDATA[SUCCESS]]></return_code><result_code><![CDATA[SUCCESS]]></result_code></xml>";

/// Mock transport for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockTransport::new();
/// mock.push_response("<xml><return_code>SUCCESS</return_code></xml>");
///
/// let client = MerchantPayClient::new(credentials, Arc::new(mock.clone()), keys);
/// client.query("100000982").await?;
///
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Responses returned in order.
    queued: VecDeque<Result<Vec<u8>, MerchantPayError>>,

    /// Response once the queue is drained.
    fallback: Option<Vec<u8>>,

    /// Every request received.
    requests: Vec<OutgoingRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers every call with `body`.
    pub fn always(body: impl Into<Vec<u8>>) -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().fallback = Some(body.into());
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Queue a response body.
    pub fn push_response(&self, body: impl Into<Vec<u8>>) {
        self.inner.lock().unwrap().queued.push_back(Ok(body.into()));
    }

    /// Queue an error.
    pub fn push_error(&self, error: MerchantPayError) {
        self.inner.lock().unwrap().queued.push_back(Err(error));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertion Helpers
    // ════════════════════════════════════════════════════════════════════════════

    /// All requests received so far.
    pub fn requests(&self) -> Vec<OutgoingRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Option<OutgoingRequest> {
        self.inner.lock().unwrap().requests.last().cloned()
    }

    /// Parsed body of the most recent request.
    pub fn last_params(&self) -> Option<ResponseMap> {
        self.last_request().and_then(|r| xml::parse(&r.body).ok())
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }
}

#[async_trait]
impl PayTransport for MockTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<Vec<u8>, MerchantPayError> {
        let mut state = self.inner.lock().unwrap();
        state.requests.push(request);

        match state.queued.pop_front() {
            Some(result) => result,
            None => Ok(state
                .fallback
                .clone()
                .unwrap_or_else(|| DEFAULT_RESPONSE.as_bytes().to_vec())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::merchant::{Endpoint, HttpMethod};

    fn request(body: &str) -> OutgoingRequest {
        OutgoingRequest {
            endpoint: Endpoint::QueryBank,
            method: HttpMethod::Post,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn replays_queue_then_default() {
        let mock = MockTransport::new();
        mock.push_response("<xml><a>1</a></xml>");
        mock.push_error(MerchantPayError::transport("reset"));

        assert_eq!(mock.send(request("<xml/>")).await.unwrap(), b"<xml><a>1</a></xml>");
        assert!(mock.send(request("<xml/>")).await.is_err());
        assert_eq!(
            mock.send(request("<xml/>")).await.unwrap(),
            DEFAULT_RESPONSE.as_bytes()
        );
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn always_uses_fallback() {
        let mock = MockTransport::always("<xml><b>2</b></xml>");
        for _ in 0..2 {
            assert_eq!(mock.send(request("<xml/>")).await.unwrap(), b"<xml><b>2</b></xml>");
        }
    }

    #[tokio::test]
    async fn records_parsed_params() {
        let mock = MockTransport::new();
        mock.send(request("<xml><mch_id><![CDATA[10000100]]></mch_id></xml>"))
            .await
            .unwrap();

        let params = mock.last_params().unwrap();
        assert_eq!(params.get("mch_id").and_then(|v| v.as_str()), Some("10000100"));
    }
}
