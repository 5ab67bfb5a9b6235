//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use subwatch_shared::ApiEnvelope;

/// Application error type
///
/// Every variant renders as a failure envelope (`success: false, data: null`);
/// the HTTP status is the only discriminator clients get.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Host has no derivable tenant label
    #[error("cannot derive tenant")]
    TenantNotDerivable,

    /// Billing API unreachable, timed out, or answered with something unusable
    #[error("verification error")]
    VerificationFailed,

    /// Upstream middleware did not attach a subscription status
    #[error("status unavailable")]
    StatusUnavailable,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::TenantNotDerivable => StatusCode::BAD_REQUEST,
            ApiError::VerificationFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StatusUnavailable => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: ApiEnvelope = ApiEnvelope::failure(self.to_string());
        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::TenantNotDerivable.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::VerificationFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::StatusUnavailable.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::TenantNotDerivable.to_string(), "cannot derive tenant");
        assert_eq!(ApiError::VerificationFailed.to_string(), "verification error");
        assert_eq!(ApiError::StatusUnavailable.to_string(), "status unavailable");
    }
}
