//! API routes

pub mod health;
pub mod subscription;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create all API routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness));

    // Subscription routes, resolved per tenant from the Host header
    let subscription_routes = Router::new()
        .route("/check", get(subscription::check_subscription))
        .route("/status", get(subscription::get_subscription_status))
        .route("/expired", get(subscription::redirect_to_expired_page));

    Router::new()
        .merge(health_routes)
        .nest("/subscription", subscription_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
