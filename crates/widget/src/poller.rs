//! Subscription poller
//!
//! Periodically fetches the tenant's subscription envelope and renders the
//! matching alert. A failed poll changes nothing on screen; the next tick
//! simply tries again. There is no retry or backoff in between.

use std::sync::Arc;

use reqwest::{header::ACCEPT, Client, StatusCode};
use subwatch_shared::ApiEnvelope;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, warn};

use crate::config::WidgetConfig;
use crate::decision::{decide, AlertState};
use crate::render::{render, AlertSurface, WARNING_ALERT_ID};

/// Error type for a single poll
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Subscription check request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Subscription check returned an unreadable body (status {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("Subscription check failed (status {status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Subscription check succeeded without status data")]
    MissingData,
}

struct PollerInner<S> {
    client: Client,
    config: WidgetConfig,
    surface: Arc<Mutex<S>>,
}

impl<S: AlertSurface> PollerInner<S> {
    async fn poll(&self) -> Result<AlertState, PollError> {
        let response = self
            .client
            .get(&self.config.check_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        // Failure envelopes come with 4xx/5xx, so the body is read regardless
        let status = response.status();
        let body = response.bytes().await?;
        let envelope: ApiEnvelope = serde_json::from_slice(&body)
            .map_err(|source| PollError::Decode { status, source })?;

        if !envelope.success {
            return Err(PollError::Rejected {
                status,
                message: envelope.message,
            });
        }

        let subscription = envelope.data.ok_or(PollError::MissingData)?;
        let state = decide(&subscription, self.config.warning_days);

        let mut surface = self.surface.lock().await;
        render(&mut *surface, state, &self.config.renew_url);

        debug!(?state, status = subscription.status_text(), "Subscription alert rendered");
        Ok(state)
    }

    async fn poll_logged(&self) -> Result<AlertState, PollError> {
        let result = self.poll().await;
        match &result {
            Err(PollError::Rejected { status, message }) => {
                warn!(status = status.as_u16(), message = %message, "Subscription check failed")
            }
            Err(e) => error!(error = %e, url = %self.config.check_url, "Subscription poll failed"),
            Ok(_) => {}
        }
        result
    }
}

/// Polls the subscription endpoint and keeps `S` showing the right alert
pub struct SubscriptionPoller<S> {
    inner: Arc<PollerInner<S>>,
    timer: Option<JoinHandle<()>>,
}

impl<S: AlertSurface + 'static> SubscriptionPoller<S> {
    /// Create a poller. Nothing is fetched until [`start`](Self::start) or [`poll`](Self::poll).
    pub fn new(config: WidgetConfig, surface: S) -> Result<Self, PollError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            inner: Arc::new(PollerInner {
                client,
                config,
                surface: Arc::new(Mutex::new(surface)),
            }),
            timer: None,
        })
    }

    /// Shared handle to the render surface
    pub fn surface(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.inner.surface)
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Check once and render the result.
    ///
    /// On failure the error is logged, returned, and the surface is left as it was.
    pub async fn poll(&self) -> Result<AlertState, PollError> {
        self.inner.poll_logged().await
    }

    /// Check immediately, then every `poll_interval`. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            debug!("Subscription poller already running");
            return;
        }

        let inner = Arc::clone(&self.inner);
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = interval(inner.config.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // First tick completes immediately
                ticker.tick().await;
                let _ = inner.poll_logged().await;
            }
        }));
    }

    /// Cancel the timer and clear any visible alert.
    ///
    /// A poll in flight is cancelled along with the timer, so nothing is
    /// rendered after this returns.
    pub async fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            let _ = timer.await;
        }
        self.inner.surface.lock().await.remove_alerts();
    }

    /// Close the warning alert until the next poll. Expired alerts stay.
    pub async fn dismiss(&self) -> bool {
        self.inner.surface.lock().await.remove_alert(WARNING_ALERT_ID)
    }
}

impl<S> Drop for SubscriptionPoller<S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
