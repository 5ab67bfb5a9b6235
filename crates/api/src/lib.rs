//! Subwatch API Library
//!
//! Per-tenant subscription status endpoints backed by the central billing API.

pub mod config;
pub mod error;
pub mod routes;
pub mod routing;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::subscription::PrecomputedStatus;
pub use routing::derive_tenant_identifier;
pub use state::AppState;
