use std::sync::Arc;

use anyhow::Context;
use hikari_metadata::config::MetadataConfig;
use hikari_metadata::service::TmdbMetadataService;
use hikari_metadata::tmdb::TmdbTranslator;
use hikari_metadata::upstream::HttpUpstream;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = MetadataConfig::from_env().context("invalid configuration")?;
    info!(base_url = %config.tmdb.base_url, "using TMDB");

    let upstream =
        HttpUpstream::new(config.upstream_timeout).context("failed to build HTTP client")?;
    let translator = TmdbTranslator::new(config.tmdb, Arc::new(upstream));
    let service = Arc::new(TmdbMetadataService::new(translator));

    let app = hikari_metadata::rpc::build_router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "metadata service listening");

    axum::serve(listener, app).await?;
    Ok(())
}
