//! Subwatch Shared Types
//!
//! Wire types and logging setup shared by the subscription check service and
//! the alert widget.

pub mod observability;
pub mod types;

pub use types::*;
