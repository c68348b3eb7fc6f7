//! Parsed provider responses.
//!
//! A response is kept exactly as the provider sent it. Helpers read the
//! provider's conventional status fields, but nothing here is applied
//! automatically: [`ResponseResult::ensure_success`] is opt-in.

use std::collections::BTreeMap;

use serde::Serialize;

use super::errors::MerchantPayError;
use super::signer::{RequestSigner, SIGN_FIELD};

/// Map of element name to value.
pub type ResponseMap = BTreeMap<String, ResponseValue>;

/// Provider status value for success.
pub const SUCCESS: &str = "SUCCESS";

/// A value in a parsed response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// Leaf element text (numbers included).
    Text(String),
    /// Element with child elements.
    Map(ResponseMap),
    /// Repeated sibling elements sharing one name.
    List(Vec<ResponseValue>),
}

impl ResponseValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResponseValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Leaf text parsed as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_str().and_then(|s| s.trim().parse().ok())
    }
}

/// Generic key/value view of a provider response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResponseResult(ResponseMap);

impl ResponseResult {
    pub fn new(fields: ResponseMap) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&ResponseValue> {
        self.0.get(key)
    }

    /// Leaf text of a field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ResponseValue::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(ResponseValue::as_i64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResponseValue)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> ResponseMap {
        self.0
    }

    /// Communication-level status (`return_code`).
    pub fn return_code(&self) -> Option<&str> {
        self.get_str("return_code")
    }

    pub fn return_msg(&self) -> Option<&str> {
        self.get_str("return_msg")
    }

    /// Business-level status (`result_code`).
    pub fn result_code(&self) -> Option<&str> {
        self.get_str("result_code")
    }

    pub fn err_code(&self) -> Option<&str> {
        self.get_str("err_code")
    }

    pub fn err_code_des(&self) -> Option<&str> {
        self.get_str("err_code_des")
    }

    /// Both `return_code` and, when present, `result_code` are `SUCCESS`.
    pub fn is_success(&self) -> bool {
        self.return_code() == Some(SUCCESS)
            && self.result_code().map_or(true, |code| code == SUCCESS)
    }

    /// Convert a business failure into [`MerchantPayError::Provider`].
    pub fn ensure_success(self) -> Result<Self, MerchantPayError> {
        if self.is_success() {
            return Ok(self);
        }

        let (code, message) = if self.return_code() != Some(SUCCESS) {
            (
                self.return_code().unwrap_or("UNKNOWN"),
                self.return_msg().unwrap_or_default(),
            )
        } else {
            (
                self.err_code().or(self.result_code()).unwrap_or("UNKNOWN"),
                self.err_code_des().or(self.return_msg()).unwrap_or_default(),
            )
        };

        Err(MerchantPayError::Provider {
            code: code.to_string(),
            message: message.to_string(),
        })
    }

    /// Check the response's own `sign` field. Unsigned responses fail.
    ///
    /// Only leaf text fields take part in the signature.
    pub fn verify_signature(&self, signer: &RequestSigner) -> bool {
        let Some(provided) = self.get_str(SIGN_FIELD) else {
            return false;
        };

        let pairs = self
            .0
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s.to_string())));
        signer.verify(pairs, provided)
    }
}

impl From<ResponseMap> for ResponseResult {
    fn from(fields: ResponseMap) -> Self {
        Self(fields)
    }
}

impl From<ResponseResult> for serde_json::Value {
    fn from(result: ResponseResult) -> Self {
        serde_json::to_value(result.0).unwrap_or(serde_json::Value::Null)
    }
}
