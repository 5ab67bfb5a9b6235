//! Billing error types

use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the billing API
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Billing API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Billing API returned status {status}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Billing API returned an unusable response body")]
    InvalidResponse { status: StatusCode, body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BillingError {
    /// HTTP status and raw body of a bad response, if the API answered at all
    pub fn response_context(&self) -> Option<(StatusCode, &str)> {
        match self {
            BillingError::UnexpectedStatus { status, body }
            | BillingError::InvalidResponse { status, body } => Some((*status, body.as_str())),
            BillingError::Http(_) | BillingError::Config(_) => None,
        }
    }

    /// Returns true if the request never produced a response (network error or timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, BillingError::Http(_))
    }
}

pub type BillingResult<T> = Result<T, BillingError>;
