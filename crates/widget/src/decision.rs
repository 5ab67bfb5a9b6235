//! Alert decision
//!
//! Maps a subscription status to the alert that should be on screen. Pure:
//! rendering lives in [`crate::render`].

use subwatch_shared::SubscriptionStatus;

/// Which alert, if any, the widget should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    None,
    /// Expiry is near; `days_left` is the rounded-up day count shown to the user
    Warning { days_left: i64 },
    Expired,
}

/// Decide the alert for `status`.
///
/// Expired wins; otherwise a known expiry at or under `warning_days` warns.
/// The previous state plays no part.
pub fn decide(status: &SubscriptionStatus, warning_days: f64) -> AlertState {
    if status.is_expired {
        return AlertState::Expired;
    }

    match status.days_until_expiry_f64() {
        Some(days) if days <= warning_days => AlertState::Warning {
            days_left: days.ceil() as i64,
        },
        _ => AlertState::None,
    }
}
