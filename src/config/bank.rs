//! Bank payout configuration

use std::path::PathBuf;

use serde::Deserialize;

use crate::adapters::FilePublicKeyProvider;

/// Where the bank encryption public key lives
#[derive(Debug, Clone, Deserialize)]
pub struct BankConfig {
    /// Application root; the key defaults to `<app_root>/../certs/wxpay.pcks8.pem`
    #[serde(default = "default_app_root")]
    pub app_root: PathBuf,

    /// Explicit key path, overriding the app-root convention
    pub public_key_path: Option<PathBuf>,
}

impl BankConfig {
    /// Key provider for the configured location
    pub fn key_provider(&self) -> FilePublicKeyProvider {
        match &self.public_key_path {
            Some(path) => FilePublicKeyProvider::new(path),
            None => FilePublicKeyProvider::for_app_root(&self.app_root),
        }
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            app_root: default_app_root(),
            public_key_path: None,
        }
    }
}

fn default_app_root() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_key_location() {
        let provider = BankConfig::default().key_provider();
        assert_eq!(provider.path(), Path::new("./../certs/wxpay.pcks8.pem"));
    }

    #[test]
    fn test_explicit_key_path_wins() {
        let config = BankConfig {
            app_root: PathBuf::from("/srv/app"),
            public_key_path: Some(PathBuf::from("/etc/wxpay/pub.pem")),
        };
        assert_eq!(config.key_provider().path(), Path::new("/etc/wxpay/pub.pem"));
    }
}
