use anyhow::Context;
use subwatch_shared::observability::{init_tracing, LogFormat};
use subwatch_widget::{LogSurface, SubscriptionPoller, WidgetConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());

    let config = WidgetConfig::from_env().context("Failed to load widget configuration")?;
    info!(
        url = %config.check_url,
        interval_secs = config.poll_interval.as_secs(),
        warning_days = config.warning_days,
        "Starting subscription poller"
    );

    let mut poller = SubscriptionPoller::new(config, LogSurface::new())
        .context("Failed to create subscription poller")?;
    poller.start();

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    poller.stop().await;
    info!("Subscription poller stopped");
    Ok(())
}
