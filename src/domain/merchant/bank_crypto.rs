//! RSA-OAEP encryption of bank payout fields.
//!
//! The bank payout API takes the card number and account holder name
//! encrypted with the provider's RSA public key (OAEP, SHA-1) and base64
//! encoded. The provider hands out that key in PKCS#1 form; files on disk
//! are usually converted to PKCS#8 first, so both are accepted here.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPublicKey};
use sha1::Sha1;

use super::errors::MerchantPayError;

/// PEM text of the bank encryption key, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyPem {
    pub origin: PathBuf,
    pub pem: String,
}

impl PublicKeyPem {
    pub fn new(origin: impl Into<PathBuf>, pem: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            pem: pem.into(),
        }
    }
}

/// Encrypts sensitive bank fields with the provider's public key.
#[derive(Debug, Clone)]
pub struct BankFieldEncryptor {
    key: RsaPublicKey,
}

impl BankFieldEncryptor {
    /// Parse a PKCS#8 (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`) PEM.
    pub fn from_pem(key: &PublicKeyPem) -> Result<Self, MerchantPayError> {
        let pem = key.pem.trim();
        if pem.is_empty() {
            return Err(MerchantPayError::key_load(&key.origin, "public key PEM is empty"));
        }

        let parsed = if pem.contains("BEGIN RSA PUBLIC KEY") {
            RsaPublicKey::from_pkcs1_pem(pem).map_err(|e| e.to_string())
        } else {
            RsaPublicKey::from_public_key_pem(pem).map_err(|e| e.to_string())
        };

        parsed
            .map(|rsa_key| Self { key: rsa_key })
            .map_err(|reason| MerchantPayError::key_load(&key.origin, reason))
    }

    /// Encrypt with OAEP padding and base64-encode the ciphertext.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, MerchantPayError> {
        let mut rng = rand::thread_rng();
        let ciphertext = self
            .key
            .encrypt(&mut rng, Oaep::new::<Sha1>(), plaintext.as_bytes())
            .map_err(|e| MerchantPayError::Crypto(e.to_string()))?;

        Ok(STANDARD.encode(ciphertext))
    }
}

/// Convert a PKCS#1 `RSA PUBLIC KEY` PEM into PKCS#8 `PUBLIC KEY` form.
///
/// The public key endpoint returns PKCS#1; store the converted key where
/// the bank payout flow reads it.
pub fn pkcs1_to_pkcs8_pem(pkcs1_pem: &str) -> Result<String, MerchantPayError> {
    let key = RsaPublicKey::from_pkcs1_pem(pkcs1_pem.trim())
        .map_err(|e| MerchantPayError::key_load(Path::new("<pkcs1>"), e.to_string()))?;

    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| MerchantPayError::Crypto(e.to_string()))
}
