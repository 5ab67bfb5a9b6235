//! Subwatch Billing
//!
//! Client for the central billing host that owns tenant subscriptions.

pub mod client;
pub mod error;

pub use client::{BillingClient, BillingConfig, CHECK_BY_SUBDOMAIN_PATH, DEFAULT_TIMEOUT};
pub use error::{BillingError, BillingResult};
