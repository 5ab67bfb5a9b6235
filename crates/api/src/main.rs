use anyhow::Context;
use subwatch_api::{routes::create_router, AppState, Config};
use subwatch_shared::observability::{init_tracing, LogFormat};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());

    let config = Config::from_env().context("Failed to load configuration")?;
    let bind_address = config.bind_address.clone();
    info!(
        billing_api = %config.billing_api_base_url,
        timeout_secs = config.billing_api_timeout_secs,
        "Configuration loaded"
    );

    let state = AppState::new(config).context("Failed to create billing client")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!(address = %bind_address, "Subwatch API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Subwatch API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
