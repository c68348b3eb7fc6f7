//! Client configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MERCHANT_PAY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use merchant_pay::config::MerchantPayConfig;
//!
//! let config = MerchantPayConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Merchant {}", config.merchant.merchant_id);
//! ```

mod bank;
mod error;
mod http;
mod logging;
mod merchant;

pub use bank::BankConfig;
pub use error::{ConfigError, ValidationError};
pub use http::HttpConfig;
pub use logging::LoggingConfig;
pub use merchant::MerchantConfig;

use serde::Deserialize;

/// Root client configuration
///
/// Load using [`MerchantPayConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantPayConfig {
    /// Merchant credentials
    pub merchant: MerchantConfig,

    /// Provider hosts and timeouts
    #[serde(default)]
    pub http: HttpConfig,

    /// Bank payout public key location
    #[serde(default)]
    pub bank: BankConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MerchantPayConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MERCHANT_PAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MERCHANT_PAY__MERCHANT__MERCHANT_ID=10000100` -> `merchant.merchant_id`
    /// - `MERCHANT_PAY__HTTP__TIMEOUT_SECS=15` -> `http.timeout_secs = 15`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MERCHANT_PAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.merchant.validate()?;
        self.http.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::merchant::SignType;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("MERCHANT_PAY__MERCHANT__APP_ID", "wxd930ea5d5a258f4f");
        env::set_var("MERCHANT_PAY__MERCHANT__MERCHANT_ID", "10000100");
        env::set_var(
            "MERCHANT_PAY__MERCHANT__KEY",
            "192006250b4c09247ec02edce69f6a2d",
        );
        env::set_var("MERCHANT_PAY__MERCHANT__CERT_PATH", "/certs/apiclient_cert.pem");
        env::set_var("MERCHANT_PAY__MERCHANT__KEY_PATH", "/certs/apiclient_key.pem");
    }

    fn clear_env() {
        for var in [
            "MERCHANT_PAY__MERCHANT__APP_ID",
            "MERCHANT_PAY__MERCHANT__MERCHANT_ID",
            "MERCHANT_PAY__MERCHANT__KEY",
            "MERCHANT_PAY__MERCHANT__CERT_PATH",
            "MERCHANT_PAY__MERCHANT__KEY_PATH",
            "MERCHANT_PAY__MERCHANT__SIGN_TYPE",
            "MERCHANT_PAY__HTTP__TIMEOUT_SECS",
            "MERCHANT_PAY__BANK__PUBLIC_KEY_PATH",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = MerchantPayConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.merchant.app_id, "wxd930ea5d5a258f4f");
        assert_eq!(config.merchant.merchant_id, "10000100");
        assert_eq!(config.merchant.sign_type, SignType::Md5);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = MerchantPayConfig::load_validated();
        clear_env();

        assert!(result.is_ok(), "{:?}", result.err());
    }

    #[test]
    fn test_section_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = MerchantPayConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.api_host, "https://api.mch.weixin.qq.com");
        assert!(config.bank.public_key_path.is_none());
        assert!(!config.logging.json);
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MERCHANT_PAY__HTTP__TIMEOUT_SECS", "15");
        env::set_var("MERCHANT_PAY__MERCHANT__SIGN_TYPE", "hmac_sha256");
        env::set_var("MERCHANT_PAY__BANK__PUBLIC_KEY_PATH", "/etc/wxpay/pub.pem");
        let result = MerchantPayConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.http.timeout_secs, 15);
        assert_eq!(config.merchant.sign_type, SignType::HmacSha256);
        assert_eq!(
            config.bank.public_key_path.as_deref(),
            Some(std::path::Path::new("/etc/wxpay/pub.pem"))
        );
    }

    #[test]
    fn test_missing_merchant_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = MerchantPayConfig::load();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
