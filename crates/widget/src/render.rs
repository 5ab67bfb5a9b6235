//! Alert rendering
//!
//! An [`AlertSurface`] is wherever alerts are displayed: a page's DOM, a log,
//! or an in-memory list in tests. [`render`] keeps at most one alert on it.

use tracing::{info, warn};

use crate::decision::AlertState;

/// Class carried by every alert element
pub const ALERT_CLASS: &str = "subscription-alert";

pub const EXPIRED_ALERT_ID: &str = "subscription-expired-alert";
pub const WARNING_ALERT_ID: &str = "subscription-warning-alert";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Expired,
    Warning,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Warning => "warning",
        }
    }
}

/// A rendered alert, with its HTML fragment ready for injection into a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertElement {
    pub id: &'static str,
    pub kind: AlertKind,
    pub html: String,
}

impl AlertElement {
    pub fn expired(renew_url: &str) -> Self {
        let html = format!(
            r#"<div id="{id}" class="{class}">
  <div class="alert-content">
    <h3>Subscription expired</h3>
    <p>Your subscription has expired. Renew it to keep using the application.</p>
    <a href="{url}" class="btn-renew">Renew subscription</a>
  </div>
</div>"#,
            id = EXPIRED_ALERT_ID,
            class = class_attr(AlertKind::Expired),
            url = escape_attr(renew_url),
        );

        Self {
            id: EXPIRED_ALERT_ID,
            kind: AlertKind::Expired,
            html,
        }
    }

    pub fn warning(days_left: i64, renew_url: &str) -> Self {
        let html = format!(
            r#"<div id="{id}" class="{class}">
  <div class="alert-content">
    <h3>Subscription expiring soon</h3>
    <p>Your subscription expires in {days} day(s).</p>
    <a href="{url}" class="btn-renew">Renew now</a>
    <button type="button" class="btn-dismiss" data-dismiss="{id}">Dismiss</button>
  </div>
</div>"#,
            id = WARNING_ALERT_ID,
            class = class_attr(AlertKind::Warning),
            days = days_left,
            url = escape_attr(renew_url),
        );

        Self {
            id: WARNING_ALERT_ID,
            kind: AlertKind::Warning,
            html,
        }
    }

    /// Full class attribute, e.g. `subscription-alert warning`
    pub fn class_name(&self) -> String {
        class_attr(self.kind)
    }

    /// Whether the user may close this alert themselves
    pub fn is_dismissible(&self) -> bool {
        self.kind == AlertKind::Warning
    }
}

fn class_attr(kind: AlertKind) -> String {
    format!("{} {}", ALERT_CLASS, kind.as_str())
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Somewhere alerts can be shown
pub trait AlertSurface: Send {
    /// Remove every element carrying [`ALERT_CLASS`]
    fn remove_alerts(&mut self);

    /// Insert one alert element
    fn insert_alert(&mut self, alert: AlertElement);

    /// Remove the alert with this id. Returns false if it was not present.
    fn remove_alert(&mut self, id: &str) -> bool;
}

/// Bring `surface` in line with `state`.
///
/// Existing alerts are always removed first, so repeated renders of the same
/// state leave exactly the same single-or-zero alert behind.
pub fn render<S: AlertSurface + ?Sized>(surface: &mut S, state: AlertState, renew_url: &str) {
    surface.remove_alerts();

    match state {
        AlertState::None => {}
        AlertState::Expired => surface.insert_alert(AlertElement::expired(renew_url)),
        AlertState::Warning { days_left } => {
            surface.insert_alert(AlertElement::warning(days_left, renew_url))
        }
    }
}

// =============================================================================
// Surfaces
// =============================================================================

/// In-memory element list
#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: Vec<AlertElement>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> &[AlertElement] {
        &self.elements
    }

    /// The alert on screen, if exactly one is present
    pub fn current(&self) -> Option<&AlertElement> {
        match self.elements.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Number of elements whose class list contains `class`
    pub fn count_with_class(&self, class: &str) -> usize {
        self.elements
            .iter()
            .filter(|el| el.class_name().split(' ').any(|c| c == class))
            .count()
    }
}

impl AlertSurface for MemorySurface {
    fn remove_alerts(&mut self) {
        self.elements.clear();
    }

    fn insert_alert(&mut self, alert: AlertElement) {
        self.elements.push(alert);
    }

    fn remove_alert(&mut self, id: &str) -> bool {
        let before = self.elements.len();
        self.elements.retain(|el| el.id != id);
        self.elements.len() != before
    }
}

/// Surface for headless runs: reports alert changes through `tracing`
#[derive(Debug, Default)]
pub struct LogSurface {
    shown: Option<AlertElement>,
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertSurface for LogSurface {
    fn remove_alerts(&mut self) {
        self.shown = None;
    }

    fn insert_alert(&mut self, alert: AlertElement) {
        match alert.kind {
            AlertKind::Expired => warn!(alert = alert.id, "Subscription expired"),
            AlertKind::Warning => info!(alert = alert.id, "Subscription expiring soon"),
        }
        self.shown = Some(alert);
    }

    fn remove_alert(&mut self, id: &str) -> bool {
        if self.shown.as_ref().is_some_and(|el| el.id == id) {
            info!(alert = id, "Alert dismissed");
            self.shown = None;
            true
        } else {
            false
        }
    }
}
