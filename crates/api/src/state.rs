//! Shared application state

use std::sync::Arc;

use subwatch_billing::{BillingClient, BillingResult};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub billing: BillingClient,
}

impl AppState {
    pub fn new(config: Config) -> BillingResult<Self> {
        let billing = BillingClient::new(config.billing())?;
        Ok(Self {
            config: Arc::new(config),
            billing,
        })
    }
}
