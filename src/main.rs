use anyhow::Context;
use dashboard_proxy::{config::AppConfig, logging, routes::app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up AIRTABLE_TOKEN
    let _ = dotenvy::dotenv();

    logging::init_server_logger();

    let config = AppConfig::from_env();
    tracing::info!("Starting dashboard proxy in {:?} mode", config.environment);
    if config.airtable.token().is_none() {
        tracing::warn!("AIRTABLE_TOKEN is not set; data endpoints will answer 500");
    }

    let port = config.api.port;
    let state = AppState::from_config(config).context("invalid Airtable configuration")?;

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Dashboard proxy listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
