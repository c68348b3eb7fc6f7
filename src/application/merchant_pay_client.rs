//! Merchant pay client.
//!
//! Each public operation assembles its parameters and funnels through
//! [`MerchantPayClient::request`], which is the only place requests are
//! filtered, signed and serialized. Responses are returned exactly as the
//! provider sent them; inspecting `return_code`/`result_code` is up to the
//! caller (see [`ResponseResult::ensure_success`]).
//!
//! # Security
//!
//! - Bank card numbers and account names are RSA-OAEP encrypted before
//!   they enter the parameter map
//! - The signing key, signatures and bank plaintext are never logged

use std::sync::Arc;

use crate::adapters::{ClientIdentity, ReqwestTransport};
use crate::config::MerchantPayConfig;
use crate::domain::merchant::{
    generate_nonce, xml, BankFieldEncryptor, Endpoint, HttpMethod, MerchantCredentials,
    MerchantPayError, RequestParams, RequestSigner, ResponseResult, SignType, SIGN_FIELD,
    SIGN_TYPE_FIELD,
};
use crate::ports::{OutgoingRequest, PayTransport, PublicKeyProvider};

/// Bank fields that must be encrypted before transmission.
pub const ENCRYPTED_BANK_FIELDS: [&str; 2] = ["enc_bank_no", "enc_true_name"];

/// Client for the merchant transfer and bank payout APIs.
///
/// Holds only immutable state; share it behind an `Arc` across tasks.
pub struct MerchantPayClient {
    credentials: MerchantCredentials,
    signer: RequestSigner,
    transport: Arc<dyn PayTransport>,
    public_keys: Arc<dyn PublicKeyProvider>,
}

impl MerchantPayClient {
    /// Create a client signing with MD5.
    pub fn new(
        credentials: MerchantCredentials,
        transport: Arc<dyn PayTransport>,
        public_keys: Arc<dyn PublicKeyProvider>,
    ) -> Self {
        Self::with_sign_type(credentials, SignType::Md5, transport, public_keys)
    }

    pub fn with_sign_type(
        credentials: MerchantCredentials,
        sign_type: SignType,
        transport: Arc<dyn PayTransport>,
        public_keys: Arc<dyn PublicKeyProvider>,
    ) -> Self {
        let signer = RequestSigner::new(credentials.signing_key(), sign_type);
        Self {
            credentials,
            signer,
            transport,
            public_keys,
        }
    }

    /// Build a production client: reqwest transport with the merchant's
    /// client certificate, public key read from the configured file.
    ///
    /// # Errors
    ///
    /// `MerchantPayError::KeyLoad` if the certificate or private key cannot
    /// be loaded.
    pub fn from_config(config: &MerchantPayConfig) -> Result<Self, MerchantPayError> {
        let credentials = config.merchant.credentials();
        let identity =
            ClientIdentity::from_files(credentials.cert_path(), credentials.key_path())?;
        let transport = ReqwestTransport::new(config.http.transport(), Some(identity))?;

        Ok(Self::with_sign_type(
            credentials,
            config.merchant.sign_type,
            Arc::new(transport),
            Arc::new(config.bank.key_provider()),
        ))
    }

    pub fn credentials(&self) -> &MerchantCredentials {
        &self.credentials
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Operations
    // ════════════════════════════════════════════════════════════════════════════

    /// Query a wallet transfer by merchant bill number.
    ///
    /// The query API names the merchant field `mch_id`; sending uses `mchid`.
    pub async fn query(&self, bill_number: &str) -> Result<ResponseResult, MerchantPayError> {
        let params = RequestParams::new()
            .with("appid", self.credentials.app_id())
            .with("mch_id", self.credentials.merchant_id())
            .with("partner_trade_no", bill_number);

        self.request(Endpoint::QueryTransfer, params, HttpMethod::Post)
            .await
    }

    /// Transfer to a user's wallet. `mchid` and `mch_appid` are injected.
    pub async fn send(&self, mut params: RequestParams) -> Result<ResponseResult, MerchantPayError> {
        params.insert("mchid", self.credentials.merchant_id());
        params.insert("mch_appid", self.credentials.app_id());

        self.request(Endpoint::SendTransfer, params, HttpMethod::Post)
            .await
    }

    /// Download the provider's RSA public key.
    ///
    /// The `pub_key` field comes back in PKCS#1 form and is returned
    /// untouched; see [`crate::domain::merchant::pkcs1_to_pkcs8_pem`].
    pub async fn get_public_key(&self) -> Result<ResponseResult, MerchantPayError> {
        let params = RequestParams::new().with("mch_id", self.credentials.merchant_id());

        self.request(Endpoint::GetPublicKey, params, HttpMethod::Post)
            .await
    }

    /// Pay out to a bank card.
    ///
    /// `enc_bank_no` and `enc_true_name` arrive as plaintext and leave as
    /// base64 RSA-OAEP ciphertext. `mch_id` is injected.
    ///
    /// # Errors
    ///
    /// - `KeyLoad` if the public key cannot be obtained or parsed
    /// - `Crypto` if encryption fails
    /// - `MissingParameter` if either bank field is absent
    ///
    /// Nothing is sent when any of these occur.
    pub async fn send_bank(
        &self,
        mut params: RequestParams,
    ) -> Result<ResponseResult, MerchantPayError> {
        for field in ENCRYPTED_BANK_FIELDS {
            if !params.has_value(field) {
                return Err(MerchantPayError::MissingParameter {
                    endpoint: Endpoint::PayBank,
                    param: field,
                });
            }
        }

        let pem = self.public_keys.public_key_pem().await?;
        let encryptor = BankFieldEncryptor::from_pem(&pem)?;

        for field in ENCRYPTED_BANK_FIELDS {
            let plaintext = params
                .remove(field)
                .map(|value| value.to_string())
                .unwrap_or_default();
            params.insert(field, encryptor.encrypt(&plaintext)?);
        }

        params.insert("mch_id", self.credentials.merchant_id());

        self.request(Endpoint::PayBank, params, HttpMethod::Post)
            .await
    }

    /// Query a bank card payout by merchant bill number.
    pub async fn query_bank(&self, bill_number: &str) -> Result<ResponseResult, MerchantPayError> {
        let params = RequestParams::new()
            .with("mch_id", self.credentials.merchant_id())
            .with("partner_trade_no", bill_number);

        self.request(Endpoint::QueryBank, params, HttpMethod::Post)
            .await
    }

    /// Check a response's `sign` against this merchant's key.
    pub fn verify_response(&self, response: &ResponseResult) -> bool {
        response.verify_signature(&self.signer)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Shared plumbing
    // ════════════════════════════════════════════════════════════════════════════

    /// Drop empty params, add nonce and signature, send, parse.
    pub(crate) async fn request(
        &self,
        endpoint: Endpoint,
        params: RequestParams,
        method: HttpMethod,
    ) -> Result<ResponseResult, MerchantPayError> {
        let params = self.prepare(endpoint, params)?;
        let body = xml::build(&params)?;

        tracing::debug!(
            %endpoint,
            nonce = params.get_text("nonce_str").unwrap_or_default(),
            param_count = params.len(),
            "Sending merchant pay request"
        );

        let raw = self
            .transport
            .send(OutgoingRequest {
                endpoint,
                method,
                body,
            })
            .await
            .map_err(|e| {
                tracing::warn!(%endpoint, error = %e, "Merchant pay request failed");
                e
            })?;

        let response = Self::parse_response(&raw)?;

        tracing::info!(
            %endpoint,
            return_code = response.return_code().unwrap_or("-"),
            result_code = response.result_code().unwrap_or("-"),
            "Merchant pay response received"
        );

        Ok(response)
    }

    /// The exact parameters `request` would transmit: empty values dropped,
    /// required fields checked, `nonce_str` and `sign` appended.
    pub(crate) fn prepare(
        &self,
        endpoint: Endpoint,
        params: RequestParams,
    ) -> Result<RequestParams, MerchantPayError> {
        let mut params = params.without_empty();
        params.remove(SIGN_FIELD);

        if let Some(param) = endpoint
            .required_params()
            .iter()
            .copied()
            .find(|name| !params.has_value(name))
        {
            return Err(MerchantPayError::MissingParameter { endpoint, param });
        }

        if self.signer.sign_type() != SignType::Md5 {
            params.insert(SIGN_TYPE_FIELD, self.signer.sign_type().as_param());
        }
        params.insert("nonce_str", generate_nonce());

        let signature = self.signer.sign(&params);
        params.insert(SIGN_FIELD, signature);

        Ok(params)
    }

    /// Parse a full response body into a generic map.
    pub(crate) fn parse_response(raw: &[u8]) -> Result<ResponseResult, MerchantPayError> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| MerchantPayError::serialization(format!("response is not UTF-8: {}", e)))?;

        xml::parse(text).map(ResponseResult::from)
    }
}
