//! Application configuration

use std::env;
use std::time::Duration;

use subwatch_billing::BillingConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,

    // Billing API
    pub billing_api_base_url: String,
    pub billing_api_timeout_secs: u64,

    // Where /subscription/expired sends the browser
    pub subscription_expired_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let billing_api_base_url = {
            let url = env::var("BILLING_API_BASE_URL")
                .map_err(|_| ConfigError::Missing("BILLING_API_BASE_URL"))?;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(
                    "BILLING_API_BASE_URL must start with http:// or https://",
                ));
            }
            url.trim_end_matches('/').to_string()
        };

        let billing_api_timeout_secs = match env::var("BILLING_API_TIMEOUT_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid(
                        "BILLING_API_TIMEOUT_SECS must be a positive integer",
                    ))
                }
            },
            Err(_) => 10,
        };

        let subscription_expired_url = env::var("SUBSCRIPTION_EXPIRED_URL")
            .unwrap_or_else(|_| BillingConfig::new(&billing_api_base_url).expired_page_url());

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            billing_api_base_url,
            billing_api_timeout_secs,
            subscription_expired_url,
        })
    }

    /// Billing client settings derived from this config
    pub fn billing(&self) -> BillingConfig {
        BillingConfig::new(&self.billing_api_base_url)
            .with_timeout(Duration::from_secs(self.billing_api_timeout_secs))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
