//! Pay Transport Port - delivers signed XML bodies to the provider.
//!
//! The client builds and signs the document; a transport only moves bytes.
//! Every provider endpoint expects the merchant's client certificate;
//! implementations decide how it is attached.

use async_trait::async_trait;

use crate::domain::merchant::{Endpoint, HttpMethod, MerchantPayError};

/// A fully built request, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// Target endpoint; the transport resolves it to a URL.
    pub endpoint: Endpoint,

    pub method: HttpMethod,

    /// Signed XML document.
    pub body: String,
}

/// Port for sending requests to the payment provider.
///
/// # Contract
///
/// Implementations must:
/// - Return the raw response body for any 2xx status
/// - Map network failures and non-2xx statuses to `MerchantPayError::Transport`
/// - Map timeouts to `MerchantPayError::Timeout`
/// - Never inspect or alter the body
#[async_trait]
pub trait PayTransport: Send + Sync {
    /// Send a request and return the raw response body.
    async fn send(&self, request: OutgoingRequest) -> Result<Vec<u8>, MerchantPayError>;
}
