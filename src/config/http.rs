//! Provider HTTP configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::TransportConfig;
use crate::domain::merchant::{EndpointHosts, DEFAULT_API_HOST, DEFAULT_RISK_HOST};

/// Upper bound for any configured timeout, in seconds
const MAX_TIMEOUT_SECS: u64 = 300;

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Host for transfer and bank payout endpoints
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Host for the public key endpoint
    #[serde(default = "default_risk_host")]
    pub risk_host: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Permit plain `http://` hosts (local sandboxes only)
    #[serde(default)]
    pub allow_insecure_hosts: bool,
}

impl HttpConfig {
    pub fn hosts(&self) -> EndpointHosts {
        EndpointHosts::new(self.api_host.clone(), self.risk_host.clone())
    }

    /// Transport settings derived from this section
    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default()
            .with_hosts(self.hosts())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }

    /// Validate HTTP configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for host in [&self.api_host, &self.risk_host] {
            let url = reqwest::Url::parse(host)
                .map_err(|_| ValidationError::InvalidHost(host.clone()))?;
            match url.scheme() {
                "https" => {}
                "http" if self.allow_insecure_hosts => {}
                "http" => return Err(ValidationError::HostMustBeHttps),
                _ => return Err(ValidationError::InvalidHost(host.clone())),
            }
        }

        for secs in [self.timeout_secs, self.connect_timeout_secs] {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                return Err(ValidationError::InvalidTimeout);
            }
        }

        Ok(())
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            risk_host: default_risk_host(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            allow_insecure_hosts: false,
        }
    }
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_risk_host() -> String {
    DEFAULT_RISK_HOST.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.api_host, "https://api.mch.weixin.qq.com");
        assert_eq!(config.risk_host, "https://fraud.mch.weixin.qq.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_transport_uses_configured_timeouts() {
        let config = HttpConfig {
            timeout_secs: 12,
            connect_timeout_secs: 3,
            ..Default::default()
        };
        let transport = config.transport();
        assert_eq!(transport.timeout, Duration::from_secs(12));
        assert_eq!(transport.connect_timeout, Duration::from_secs(3));
        assert_eq!(transport.hosts, EndpointHosts::default());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = HttpConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_excessive_timeout_rejected() {
        let config = HttpConfig {
            connect_timeout_secs: 301,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_http_host_requires_opt_in() {
        let config = HttpConfig {
            api_host: "http://localhost:8080".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::HostMustBeHttps));

        let config = HttpConfig {
            allow_insecure_hosts: true,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_host_rejected() {
        let config = HttpConfig {
            risk_host: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHost(_))
        ));
    }
}
