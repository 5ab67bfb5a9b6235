//! Widget configuration

use std::env;
use std::time::Duration;

/// Poller configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Endpoint polled for the tenant's subscription envelope
    pub check_url: String,
    /// Time between two checks (30 minutes by default)
    pub poll_interval: Duration,
    /// Show the warning alert when this many days or fewer remain
    pub warning_days: f64,
    /// Target of the "renew" action in both alerts
    pub renew_url: String,
    /// Timeout for a single poll request
    pub request_timeout: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            check_url: "http://localhost:3000/subscription/check".to_string(),
            poll_interval: Duration::from_secs(30 * 60),
            warning_days: 7.0,
            renew_url: "http://localhost:3000/subscription/expired".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, WidgetConfigError> {
        let defaults = Self::default();

        let poll_interval = match env::var("WIDGET_POLL_INTERVAL_SECS") {
            Ok(raw) => Duration::from_secs(positive_secs(&raw).ok_or(
                WidgetConfigError::Invalid("WIDGET_POLL_INTERVAL_SECS must be a positive integer"),
            )?),
            Err(_) => defaults.poll_interval,
        };

        let request_timeout = match env::var("WIDGET_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(positive_secs(&raw).ok_or(
                WidgetConfigError::Invalid("WIDGET_REQUEST_TIMEOUT_SECS must be a positive integer"),
            )?),
            Err(_) => defaults.request_timeout,
        };

        let warning_days = match env::var("WIDGET_WARNING_DAYS") {
            Ok(raw) => match raw.trim().parse::<f64>() {
                Ok(days) if days.is_finite() && days >= 0.0 => days,
                _ => {
                    return Err(WidgetConfigError::Invalid(
                        "WIDGET_WARNING_DAYS must be a non-negative number",
                    ))
                }
            },
            Err(_) => defaults.warning_days,
        };

        Ok(Self {
            check_url: env::var("WIDGET_CHECK_URL").unwrap_or(defaults.check_url),
            poll_interval,
            warning_days,
            renew_url: env::var("WIDGET_RENEW_URL").unwrap_or(defaults.renew_url),
            request_timeout,
        })
    }
}

fn positive_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

#[derive(Debug, thiserror::Error)]
pub enum WidgetConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
