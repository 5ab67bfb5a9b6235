//! Billing API client
//!
//! Looks up a tenant's subscription on the central billing host with
//! `POST /api/tenant/check-by-subdomain`.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use subwatch_shared::{SubscriptionStatus, TenantId};
use tracing::{debug, error};

use crate::error::{BillingError, BillingResult};

/// Path of the subdomain lookup on the billing host
pub const CHECK_BY_SUBDOMAIN_PATH: &str = "/api/tenant/check-by-subdomain";

/// Path of the public "subscription expired" page on the billing host
pub const EXPIRED_PAGE_PATH: &str = "/tenant/subscription-expired";

/// Default timeout for billing API calls (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the billing API
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// Base URL of the billing host, e.g. `https://billing.example.com`
    pub base_url: String,
    /// Timeout applied to the whole request (connect + response)
    pub timeout: Duration,
}

impl BillingConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the subdomain lookup endpoint
    pub fn check_url(&self) -> String {
        format!("{}{}", self.base_url, CHECK_BY_SUBDOMAIN_PATH)
    }

    /// Full URL of the expired-subscription page
    pub fn expired_page_url(&self) -> String {
        format!("{}{}", self.base_url, EXPIRED_PAGE_PATH)
    }
}

#[derive(Debug, Serialize)]
struct CheckBySubdomainRequest<'a> {
    subdomain: &'a str,
}

#[derive(Debug, Deserialize)]
struct CheckBySubdomainResponse {
    #[serde(default)]
    success: bool,
    data: Option<SubscriptionStatus>,
}

/// Billing API client
#[derive(Clone)]
pub struct BillingClient {
    client: Client,
    config: BillingConfig,
}

impl BillingClient {
    /// Create a new billing client from config
    pub fn new(config: BillingConfig) -> BillingResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BillingError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the config
    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Look up the subscription of a tenant.
    ///
    /// Succeeds only on a 2xx response whose body is
    /// `{"success": true, "data": {...}}` with a well-formed `data` object.
    pub async fn check_by_subdomain(&self, tenant: &TenantId) -> BillingResult<SubscriptionStatus> {
        let response = self
            .client
            .post(self.config.check_url())
            .json(&CheckBySubdomainRequest {
                subdomain: tenant.as_str(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BillingError::UnexpectedStatus { status, body });
        }

        match serde_json::from_str::<CheckBySubdomainResponse>(&body) {
            Ok(CheckBySubdomainResponse {
                success: true,
                data: Some(data),
            }) => Ok(data),
            Ok(_) => Err(BillingError::InvalidResponse { status, body }),
            Err(e) => {
                debug!(tenant = %tenant, error = %e, "Billing API body did not parse");
                Err(BillingError::InvalidResponse { status, body })
            }
        }
    }

    /// Best-effort lookup: any failure is logged and reported as `None`.
    ///
    /// `None` means "unknown", callers must not read it as "not expired".
    pub async fn fetch_remote_status(&self, tenant: &TenantId) -> Option<SubscriptionStatus> {
        match self.check_by_subdomain(tenant).await {
            Ok(status) => Some(status),
            Err(err) => {
                match err.response_context() {
                    Some((status, body)) => error!(
                        tenant = %tenant,
                        status = status.as_u16(),
                        body = %body,
                        "Billing API returned an invalid response"
                    ),
                    None => error!(
                        tenant = %tenant,
                        error = %err,
                        timeout = matches!(&err, BillingError::Http(e) if e.is_timeout()),
                        "Billing API call failed"
                    ),
                }
                None
            }
        }
    }
}
