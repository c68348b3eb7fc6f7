//! Request signing.
//!
//! The provider's scheme: join every non-empty parameter as `key=value`
//! in ascending key order with `&`, append `&key=<signing key>`, digest,
//! and uppercase the hex. The `sign` field itself never takes part.
//!
//! # Security
//!
//! - Signature comparison is constant-time
//! - The signing key is held in a `secrecy::SecretString`

use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::params::RequestParams;

type HmacSha256 = Hmac<Sha256>;

/// Name of the signature field.
pub const SIGN_FIELD: &str = "sign";

/// Name of the optional signature-type field.
pub const SIGN_TYPE_FIELD: &str = "sign_type";

/// Digest used to produce `sign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignType {
    /// MD5 over the canonical string (the provider's default).
    #[default]
    Md5,
    /// HMAC-SHA256 keyed with the signing key over the canonical string.
    HmacSha256,
}

impl SignType {
    /// Value the provider expects in `sign_type`.
    pub fn as_param(&self) -> &'static str {
        match self {
            SignType::Md5 => "MD5",
            SignType::HmacSha256 => "HMAC-SHA256",
        }
    }
}

/// Signs outgoing parameter maps and verifies signed responses.
#[derive(Clone)]
pub struct RequestSigner {
    key: SecretString,
    sign_type: SignType,
}

impl RequestSigner {
    pub fn new(key: impl Into<String>, sign_type: SignType) -> Self {
        Self {
            key: SecretString::new(key.into()),
            sign_type,
        }
    }

    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    /// Signature for a parameter map.
    pub fn sign(&self, params: &RequestParams) -> String {
        self.sign_pairs(params.iter().map(|(k, v)| (k.as_str(), v.to_string())))
    }

    /// Signature over arbitrary key/value pairs.
    pub fn sign_pairs<'a, I>(&self, pairs: I) -> String
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let payload = self.signed_payload(pairs);
        match self.sign_type {
            SignType::Md5 => {
                let digest = Md5::digest(payload.as_bytes());
                hex::encode_upper(digest)
            }
            SignType::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
                    .expect("HMAC can take key of any size");
                mac.update(payload.as_bytes());
                hex::encode_upper(mac.finalize().into_bytes())
            }
        }
    }

    /// Check `provided` against the signature of `pairs` in constant time.
    ///
    /// Hex case is ignored.
    pub fn verify<'a, I>(&self, pairs: I, provided: &str) -> bool
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let expected = self.sign_pairs(pairs);
        let provided = provided.to_ascii_uppercase();
        expected.as_bytes().ct_eq(provided.as_bytes()).unwrap_u8() == 1
    }

    /// `k=v&k=v...&key=<secret>` over the non-empty pairs, sorted by key.
    fn signed_payload<'a, I>(&self, pairs: I) -> String
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let mut payload = canonical_string(pairs);
        if !payload.is_empty() {
            payload.push('&');
        }
        payload.push_str("key=");
        payload.push_str(self.key.expose_secret());
        payload
    }
}

/// Sorted `key=value` pairs joined with `&`, skipping empty values and `sign`.
pub fn canonical_string<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut pairs: Vec<(&str, String)> = pairs
        .into_iter()
        .filter(|(k, v)| *k != SIGN_FIELD && !v.is_empty())
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}
