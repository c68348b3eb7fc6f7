//! Merchant credential configuration

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::merchant::{MerchantCredentials, SignType};

/// Length of the provider-issued API signing key
const SIGNING_KEY_LEN: usize = 32;

/// Merchant account configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantConfig {
    /// Application ID the merchant account is bound to
    pub app_id: String,

    /// Merchant ID issued by the provider
    pub merchant_id: String,

    /// API signing key
    pub key: SecretString,

    /// PEM client certificate for mutual TLS
    pub cert_path: PathBuf,

    /// PEM private key for mutual TLS
    pub key_path: PathBuf,

    /// Signature digest
    #[serde(default)]
    pub sign_type: SignType,
}

impl MerchantConfig {
    /// Build the immutable credentials a client is constructed from
    pub fn credentials(&self) -> MerchantCredentials {
        MerchantCredentials::new(
            self.app_id.clone(),
            self.merchant_id.clone(),
            self.key.expose_secret().clone(),
            self.cert_path.clone(),
            self.key_path.clone(),
        )
    }

    /// Validate merchant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.app_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "MERCHANT_PAY__MERCHANT__APP_ID",
            ));
        }
        if self.merchant_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "MERCHANT_PAY__MERCHANT__MERCHANT_ID",
            ));
        }
        if !self.merchant_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidMerchantId);
        }

        let key = self.key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired(
                "MERCHANT_PAY__MERCHANT__KEY",
            ));
        }
        if key.chars().count() != SIGNING_KEY_LEN {
            return Err(ValidationError::InvalidSigningKey);
        }

        if self.cert_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired(
                "MERCHANT_PAY__MERCHANT__CERT_PATH",
            ));
        }
        if self.key_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired(
                "MERCHANT_PAY__MERCHANT__KEY_PATH",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> MerchantConfig {
        MerchantConfig {
            app_id: "wxd930ea5d5a258f4f".to_string(),
            merchant_id: "10000100".to_string(),
            key: SecretString::new("192006250b4c09247ec02edce69f6a2d".to_string()),
            cert_path: PathBuf::from("/certs/apiclient_cert.pem"),
            key_path: PathBuf::from("/certs/apiclient_key.pem"),
            sign_type: SignType::Md5,
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_app_id() {
        let config = MerchantConfig {
            app_id: " ".to_string(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("MERCHANT_PAY__MERCHANT__APP_ID"))
        );
    }

    #[test]
    fn test_validation_non_numeric_merchant_id() {
        let config = MerchantConfig {
            merchant_id: "mch-100".to_string(),
            ..valid()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMerchantId));
    }

    #[test]
    fn test_validation_short_signing_key() {
        let config = MerchantConfig {
            key: SecretString::new("short".to_string()),
            ..valid()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSigningKey));
    }

    #[test]
    fn test_validation_missing_cert_path() {
        let config = MerchantConfig {
            cert_path: PathBuf::new(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("MERCHANT_PAY__MERCHANT__CERT_PATH"))
        );
    }

    #[test]
    fn test_missing_fields_name_full_env_vars() {
        let config = MerchantConfig {
            key: SecretString::new(String::new()),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("MERCHANT_PAY__MERCHANT__KEY"))
        );

        let config = MerchantConfig {
            key_path: PathBuf::new(),
            ..valid()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("MERCHANT_PAY__MERCHANT__KEY_PATH"), "{message}");
    }

    #[test]
    fn test_credentials_carry_config_values() {
        let creds = valid().credentials();
        assert_eq!(creds.app_id(), "wxd930ea5d5a258f4f");
        assert_eq!(creds.merchant_id(), "10000100");
        assert_eq!(creds.cert_path(), PathBuf::from("/certs/apiclient_cert.pem"));
    }
}
