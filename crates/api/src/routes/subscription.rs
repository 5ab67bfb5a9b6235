//! Subscription status routes
//!
//! - `GET /subscription/check`: live lookup against the billing API
//! - `GET /subscription/status`: status precomputed by upstream middleware
//! - `GET /subscription/expired`: redirect to the billing host's expired page

use axum::{
    extract::{Extension, Host, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use subwatch_billing::BillingClient;
use subwatch_shared::{ApiEnvelope, SubscriptionStatus};
use tracing::debug;

use crate::{
    error::{ApiError, ApiResult},
    routing::derive_tenant_identifier,
    state::AppState,
};

/// Subscription status attached to the request extensions by upstream middleware
#[derive(Debug, Clone)]
pub struct PrecomputedStatus(pub SubscriptionStatus);

/// Resolve the tenant from `host` and ask the billing API for its status
pub async fn check_subscription_for_host(
    billing: &BillingClient,
    host: &str,
) -> ApiResult<ApiEnvelope> {
    let tenant = derive_tenant_identifier(host).ok_or(ApiError::TenantNotDerivable)?;

    let status = billing
        .fetch_remote_status(&tenant)
        .await
        .ok_or(ApiError::VerificationFailed)?;

    debug!(
        tenant = %tenant,
        is_expired = status.is_expired,
        days_until_expiry = ?status.days_until_expiry_f64(),
        "Subscription checked"
    );

    let message = if status.is_expired { "expired" } else { "active" };
    Ok(ApiEnvelope::ok(message, status))
}

/// Check the current tenant's subscription
pub async fn check_subscription(
    State(state): State<AppState>,
    host: Option<Host>,
) -> ApiResult<Json<ApiEnvelope>> {
    let host = host.map(|Host(h)| h).unwrap_or_default();
    check_subscription_for_host(&state.billing, &host).await.map(Json)
}

/// Return the status upstream middleware already looked up for this request
pub async fn get_subscription_status(
    precomputed: Option<Extension<PrecomputedStatus>>,
) -> ApiResult<Json<ApiEnvelope>> {
    let Extension(PrecomputedStatus(status)) = precomputed.ok_or(ApiError::StatusUnavailable)?;
    Ok(Json(ApiEnvelope::ok("status retrieved", status)))
}

/// Send the browser to the billing host's "subscription expired" page
pub async fn redirect_to_expired_page(State(state): State<AppState>) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, state.config.subscription_expired_url.clone())],
    )
        .into_response()
}
