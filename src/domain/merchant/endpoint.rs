//! Provider endpoint descriptors.
//!
//! Every remote operation is one [`Endpoint`] variant carrying its host,
//! path and the parameters the provider insists on. URLs are resolved
//! against [`EndpointHosts`] so sandboxes and tests can redirect traffic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default host for transfer and bank payout APIs.
pub const DEFAULT_API_HOST: &str = "https://api.mch.weixin.qq.com";

/// Default host for the risk-control API (public key download).
pub const DEFAULT_RISK_HOST: &str = "https://fraud.mch.weixin.qq.com";

/// Which provider host an endpoint lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Api,
    Risk,
}

/// HTTP method used for a provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Post,
    Get,
}

/// A fixed provider endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Transfer funds to a user's wallet.
    SendTransfer,
    /// Look up a wallet transfer by merchant bill number.
    QueryTransfer,
    /// Download the RSA public key used for bank field encryption.
    GetPublicKey,
    /// Pay out to a bank card.
    PayBank,
    /// Look up a bank card payout by merchant bill number.
    QueryBank,
}

impl Endpoint {
    /// All endpoints, in declaration order.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::SendTransfer,
        Endpoint::QueryTransfer,
        Endpoint::GetPublicKey,
        Endpoint::PayBank,
        Endpoint::QueryBank,
    ];

    pub fn host_kind(&self) -> HostKind {
        match self {
            Endpoint::GetPublicKey => HostKind::Risk,
            _ => HostKind::Api,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::SendTransfer => "/mmpaymkttransfers/promotion/transfers",
            Endpoint::QueryTransfer => "/mmpaymkttransfers/gettransferinfo",
            Endpoint::GetPublicKey => "/risk/getpublickey",
            Endpoint::PayBank => "/mmpaysptrans/pay_bank",
            Endpoint::QueryBank => "/mmpaysptrans/query_bank",
        }
    }

    /// Parameters the provider rejects the call without.
    ///
    /// `nonce_str` and `sign` are added by the client and not listed here.
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            Endpoint::SendTransfer => &[
                "mch_appid",
                "mchid",
                "partner_trade_no",
                "openid",
                "check_name",
                "amount",
                "desc",
            ],
            Endpoint::QueryTransfer => &["appid", "mch_id", "partner_trade_no"],
            Endpoint::GetPublicKey => &["mch_id"],
            Endpoint::PayBank => &[
                "mch_id",
                "partner_trade_no",
                "enc_bank_no",
                "enc_true_name",
                "bank_code",
                "amount",
            ],
            Endpoint::QueryBank => &["mch_id", "partner_trade_no"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::SendTransfer => "send_transfer",
            Endpoint::QueryTransfer => "query_transfer",
            Endpoint::GetPublicKey => "get_public_key",
            Endpoint::PayBank => "pay_bank",
            Endpoint::QueryBank => "query_bank",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base URLs the endpoints are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointHosts {
    pub api: String,
    pub risk: String,
}

impl EndpointHosts {
    pub fn new(api: impl Into<String>, risk: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            risk: risk.into(),
        }
    }

    /// Route every endpoint to a single base URL (local test servers).
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            api: base.clone(),
            risk: base,
        }
    }

    /// Full URL for an endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        let host = match endpoint.host_kind() {
            HostKind::Api => &self.api,
            HostKind::Risk => &self.risk,
        };
        format!("{}{}", host.trim_end_matches('/'), endpoint.path())
    }
}

impl Default for EndpointHosts {
    fn default() -> Self {
        Self::new(DEFAULT_API_HOST, DEFAULT_RISK_HOST)
    }
}
