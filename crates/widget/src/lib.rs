//! Subwatch Widget
//!
//! Client side of the subscription check: polls `/subscription/check` and
//! shows an expiry warning or an "expired" alert.
//!
//! ```no_run
//! use subwatch_widget::{MemorySurface, SubscriptionPoller, WidgetConfig};
//!
//! # async fn run() -> Result<(), subwatch_widget::PollError> {
//! let mut poller = SubscriptionPoller::new(WidgetConfig::default(), MemorySurface::new())?;
//! poller.start();
//! // ...
//! poller.stop().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decision;
pub mod poller;
pub mod render;

pub use config::{WidgetConfig, WidgetConfigError};
pub use decision::{decide, AlertState};
pub use poller::{PollError, SubscriptionPoller};
pub use render::{render, AlertElement, AlertKind, AlertSurface, LogSurface, MemorySurface};
