//! Merchant pay domain: credentials, parameters, signing and the XML codec.
//!
//! Everything here is pure and synchronous; I/O lives behind the ports.

pub mod bank_crypto;
mod credentials;
mod endpoint;
mod errors;
mod nonce;
mod params;
mod response;
pub mod signer;
pub mod xml;

pub use bank_crypto::{pkcs1_to_pkcs8_pem, BankFieldEncryptor, PublicKeyPem};
pub use credentials::MerchantCredentials;
pub use endpoint::{
    Endpoint, EndpointHosts, HostKind, HttpMethod, DEFAULT_API_HOST, DEFAULT_RISK_HOST,
};
pub use errors::MerchantPayError;
pub use nonce::generate_nonce;
pub use params::{ParamValue, RequestParams};
pub use response::{ResponseMap, ResponseResult, ResponseValue, SUCCESS};
pub use signer::{RequestSigner, SignType, SIGN_FIELD, SIGN_TYPE_FIELD};
