//! Merchant pay error types.

use std::path::PathBuf;

use thiserror::Error;

use super::endpoint::Endpoint;

/// Errors surfaced by merchant pay operations.
///
/// Nothing is retried internally; callers decide on retry policy using
/// [`MerchantPayError::is_retryable`].
#[derive(Debug, Error)]
pub enum MerchantPayError {
    /// Network failure or a non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The transport gave up waiting for the provider.
    #[error("request to {endpoint} timed out after {timeout_secs}s")]
    Timeout { endpoint: Endpoint, timeout_secs: u64 },

    /// The provider answered with a business-level failure.
    #[error("provider returned {code}: {message}")]
    Provider { code: String, message: String },

    /// Certificate, private key or public key material could not be loaded.
    #[error("failed to load key material from {}: {reason}", path.display())]
    KeyLoad { path: PathBuf, reason: String },

    /// Public-key encryption failed.
    #[error("encryption failed: {0}")]
    Crypto(String),

    /// XML could not be built or parsed.
    #[error("xml serialization error: {0}")]
    Serialization(String),

    /// A parameter the endpoint requires was absent or empty.
    #[error("missing required parameter `{param}` for {endpoint}")]
    MissingParameter {
        endpoint: Endpoint,
        param: &'static str,
    },
}

impl MerchantPayError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a key loading error.
    pub fn key_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::KeyLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Whether the failure happened on the wire (including timeouts).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }

    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        self.is_transport()
    }
}

impl From<quick_xml::Error> for MerchantPayError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
