//! Common types used across Subwatch

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// =============================================================================
// ID Wrappers
// =============================================================================

/// Tenant identifier (the leftmost label of a tenant host name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Wrap a tenant label. Returns `None` for an empty label.
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        if label.is_empty() {
            None
        } else {
            Some(Self(label))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Subscription Status
// =============================================================================

/// Subscription status as reported by the billing API.
///
/// Relayed to callers unchanged: fields the billing API adds beyond the
/// three we interpret are kept in `extra` and serialized back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub is_expired: bool,
    /// Days until expiry as billing sent it (integer or fractional), `None`
    /// for subscriptions without an end date
    #[serde(default)]
    pub days_until_expiry: Option<Number>,
    /// Billing-defined status text (e.g. "active", "trial", "expired")
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubscriptionStatus {
    /// Build a status. A non-finite `days_until_expiry` is stored as `None`.
    pub fn new(is_expired: bool, days_until_expiry: Option<f64>, status: impl Into<String>) -> Self {
        Self {
            is_expired,
            days_until_expiry: days_until_expiry.and_then(Number::from_f64),
            status: Some(status.into()),
            extra: Map::new(),
        }
    }

    /// `days_until_expiry` as a float, for threshold comparisons
    pub fn days_until_expiry_f64(&self) -> Option<f64> {
        self.days_until_expiry.as_ref().and_then(Number::as_f64)
    }

    /// Status text, empty when billing sent none
    pub fn status_text(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Uniform `{success, message, data}` wrapper returned by the subscription endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T = SubscriptionStatus> {
    pub success: bool,
    pub message: String,
    /// Always serialized; `null` means "unknown", never "not expired"
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
