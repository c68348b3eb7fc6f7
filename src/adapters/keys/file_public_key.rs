//! File-backed public key provider.
//!
//! Reads the bank encryption key from disk on every call, so a rotated key
//! file is picked up without restarting the host application.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::merchant::{MerchantPayError, PublicKeyPem};
use crate::ports::PublicKeyProvider;

/// Conventional location of the key, relative to the application root.
pub const DEFAULT_RELATIVE_KEY_PATH: &str = "../certs/wxpay.pcks8.pem";

/// Reads a PEM public key from a file.
#[derive(Debug, Clone)]
pub struct FilePublicKeyProvider {
    path: PathBuf,
}

impl FilePublicKeyProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Provider for `<app_root>/../certs/wxpay.pcks8.pem`.
    pub fn for_app_root(app_root: impl AsRef<Path>) -> Self {
        Self::new(app_root.as_ref().join(DEFAULT_RELATIVE_KEY_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PublicKeyProvider for FilePublicKeyProvider {
    async fn public_key_pem(&self) -> Result<PublicKeyPem, MerchantPayError> {
        let pem = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to read public key");
            MerchantPayError::key_load(&self.path, e.to_string())
        })?;

        Ok(PublicKeyPem::new(&self.path, pem))
    }
}
