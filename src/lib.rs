//! Merchant Pay - client for the merchant transfer and bank payout APIs.
//!
//! Builds signed XML requests, sends them over mutual TLS and parses the
//! XML responses into generic key/value maps.
//!
//! ```no_run
//! use merchant_pay::application::MerchantPayClient;
//! use merchant_pay::config::MerchantPayConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MerchantPayConfig::load_validated()?;
//! let client = MerchantPayClient::from_config(&config)?;
//!
//! let response = client.query("100000982").await?;
//! println!("{:?}", response.result_code());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use application::MerchantPayClient;
pub use domain::merchant::{MerchantCredentials, MerchantPayError, RequestParams, ResponseResult};
