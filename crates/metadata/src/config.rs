use std::time::Duration;

use anyhow::{Context, bail};

use crate::tmdb::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE, TmdbConfig};

/// Startup configuration of the metadata service.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    pub bind_addr: String,
    pub tmdb: TmdbConfig,
    pub upstream_timeout: Duration,
}

impl MetadataConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let Some(api_key) = lookup("TMDB_API_KEY").filter(|k| !k.trim().is_empty()) else {
            bail!("TMDB_API_KEY must be set");
        };

        let tmdb = TmdbConfig::new(api_key)
            .with_base_url(lookup("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()))
            .with_image_base(
                lookup("TMDB_IMAGE_BASE").unwrap_or_else(|| DEFAULT_IMAGE_BASE.into()),
            );

        let timeout_secs = match lookup("TMDB_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("TMDB_TIMEOUT_SECS is not a number: {v}"))?,
            None => 10,
        };

        Ok(Self {
            bind_addr: lookup("HIKARI_METADATA_BIND").unwrap_or_else(|| "0.0.0.0:50051".into()),
            tmdb,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
