//! Merchant credentials.

use std::fmt;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

/// Identity and shared secret a merchant authenticates with.
///
/// Immutable once built; the signing key never appears in `Debug` output.
#[derive(Clone)]
pub struct MerchantCredentials {
    app_id: String,
    merchant_id: String,
    signing_key: SecretString,
    cert_path: PathBuf,
    key_path: PathBuf,
}

impl MerchantCredentials {
    pub fn new(
        app_id: impl Into<String>,
        merchant_id: impl Into<String>,
        signing_key: impl Into<String>,
        cert_path: impl Into<PathBuf>,
        key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            merchant_id: merchant_id.into(),
            signing_key: SecretString::new(signing_key.into()),
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub(crate) fn signing_key(&self) -> &str {
        self.signing_key.expose_secret()
    }

    /// PEM client certificate used for mutual TLS.
    pub fn cert_path(&self) -> &Path {
        &self.cert_path
    }

    /// PEM private key matching [`Self::cert_path`].
    pub fn key_path(&self) -> &Path {
        &self.key_path
    }
}

impl fmt::Debug for MerchantCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerchantCredentials")
            .field("app_id", &self.app_id)
            .field("merchant_id", &self.merchant_id)
            .field("signing_key", &"[REDACTED]")
            .field("cert_path", &self.cert_path)
            .field("key_path", &self.key_path)
            .finish()
    }
}
