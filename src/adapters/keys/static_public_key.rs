//! In-memory public key provider.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::merchant::{MerchantPayError, PublicKeyPem};
use crate::ports::PublicKeyProvider;

/// Serves a PEM held in memory, or fails every call when empty.
#[derive(Debug, Clone, Default)]
pub struct StaticPublicKeyProvider {
    pem: Option<String>,
}

impl StaticPublicKeyProvider {
    pub fn new(pem: impl Into<String>) -> Self {
        Self {
            pem: Some(pem.into()),
        }
    }

    /// Provider with no key; every lookup is a `KeyLoad` error.
    pub fn missing() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PublicKeyProvider for StaticPublicKeyProvider {
    async fn public_key_pem(&self) -> Result<PublicKeyPem, MerchantPayError> {
        self.pem
            .as_ref()
            .map(|pem| PublicKeyPem::new("<inline>", pem.clone()))
            .ok_or_else(|| {
                MerchantPayError::key_load(PathBuf::from("<inline>"), "no public key configured")
            })
    }
}
