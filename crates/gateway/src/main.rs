use std::sync::Arc;

use anyhow::Context;
use hikari_gateway::config::GatewayConfig;
use hikari_gateway::rpc_client::RpcClient;
use hikari_gateway::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = GatewayConfig::from_env().context("invalid configuration")?;
    info!(
        metadata_url = %config.metadata_url,
        timeout_ms = config.rpc_timeout.as_millis() as u64,
        "using metadata service"
    );

    let client = RpcClient::new(&config.metadata_url).with_deadline(config.rpc_timeout);
    let state = AppState::new(
        Arc::new(client),
        config.rpc_timeout,
        config.default_language.clone(),
    );

    let app = hikari_gateway::routes::build_app(state, &config.cors_origin)
        .context("invalid HIKARI_CORS_ORIGIN")?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "gateway listening");

    axum::serve(listener, app).await?;
    Ok(())
}
