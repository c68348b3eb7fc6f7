//! Reqwest transport - Implementation of PayTransport over HTTPS.
//!
//! Attaches the merchant's client certificate (mutual TLS) loaded from PEM
//! files at construction time. One `reqwest::Client` is shared by every
//! call; it is cheap to clone and safe to use from many tasks.
//!
//! # Configuration
//!
//! ```ignore
//! let identity = ClientIdentity::from_files(cert_path, key_path)?;
//! let config = TransportConfig::default().with_timeout(Duration::from_secs(10));
//! let transport = ReqwestTransport::new(config, Some(identity))?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Identity, Method};

use crate::domain::merchant::{Endpoint, EndpointHosts, HttpMethod, MerchantPayError};
use crate::ports::{OutgoingRequest, PayTransport};

const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Configuration for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Hosts endpoints are resolved against.
    pub hosts: EndpointHosts,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// TCP/TLS connect timeout.
    pub connect_timeout: Duration,
}

impl TransportConfig {
    /// Sets the endpoint hosts.
    pub fn with_hosts(mut self, hosts: EndpointHosts) -> Self {
        self.hosts = hosts;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            hosts: EndpointHosts::default(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Client certificate and private key for mutual TLS.
pub struct ClientIdentity {
    cert_path: PathBuf,
    identity: Identity,
}

impl ClientIdentity {
    /// Load a PEM certificate and its PEM private key.
    ///
    /// # Errors
    ///
    /// `MerchantPayError::KeyLoad` if either file is unreadable or the pair
    /// does not form a usable identity.
    pub fn from_files(cert_path: &Path, key_path: &Path) -> Result<Self, MerchantPayError> {
        let cert = std::fs::read(cert_path)
            .map_err(|e| MerchantPayError::key_load(cert_path, e.to_string()))?;
        let key = std::fs::read(key_path)
            .map_err(|e| MerchantPayError::key_load(key_path, e.to_string()))?;

        let mut pem = cert;
        pem.push(b'\n');
        pem.extend_from_slice(&key);

        let identity = Identity::from_pem(&pem).map_err(|e| {
            MerchantPayError::key_load(cert_path, format!("invalid client identity: {}", e))
        })?;

        Ok(Self {
            cert_path: cert_path.to_path_buf(),
            identity,
        })
    }

    pub fn cert_path(&self) -> &Path {
        &self.cert_path
    }
}

/// HTTPS transport backed by `reqwest`.
pub struct ReqwestTransport {
    config: TransportConfig,
    client: Client,
    has_identity: bool,
}

impl ReqwestTransport {
    /// Build the transport. Without an identity requests go out with no
    /// client certificate, which only sandboxes and local tests accept.
    pub fn new(
        config: TransportConfig,
        identity: Option<ClientIdentity>,
    ) -> Result<Self, MerchantPayError> {
        let mut builder = Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        let has_identity = identity.is_some();
        if let Some(identity) = identity {
            tracing::debug!(cert = %identity.cert_path.display(), "Using client certificate");
            builder = builder.identity(identity.identity);
        }

        let client = builder.build().map_err(|e| {
            MerchantPayError::transport(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            config,
            client,
            has_identity,
        })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn map_error(&self, endpoint: Endpoint, err: reqwest::Error) -> MerchantPayError {
        if err.is_timeout() {
            MerchantPayError::Timeout {
                endpoint,
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if err.is_connect() {
            MerchantPayError::transport(format!("connection failed: {}", err))
        } else {
            MerchantPayError::transport(err.to_string())
        }
    }
}

#[async_trait]
impl PayTransport for ReqwestTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<Vec<u8>, MerchantPayError> {
        let endpoint = request.endpoint;
        let url = self.config.hosts.url(endpoint);

        if !self.has_identity {
            tracing::warn!(%endpoint, "Sending without client certificate");
        }

        let method = match request.method {
            HttpMethod::Post => Method::POST,
            HttpMethod::Get => Method::GET,
        };

        let response = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.map_error(endpoint, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(endpoint, e))?;

        if !status.is_success() {
            tracing::error!(%endpoint, status = status.as_u16(), "Provider returned HTTP error");
            return Err(MerchantPayError::transport(format!(
                "HTTP {} from {}: {}",
                status,
                endpoint,
                String::from_utf8_lossy(&body)
            )));
        }

        tracing::debug!(%endpoint, bytes = body.len(), "Provider responded");
        Ok(body.to_vec())
    }
}
