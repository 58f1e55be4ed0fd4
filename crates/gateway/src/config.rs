use std::time::Duration;

use anyhow::Context;

/// Startup configuration of the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: String,
    pub metadata_url: String,
    pub default_language: String,
    pub rpc_timeout: Duration,
    pub cors_origin: String,
}

impl GatewayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let rpc_timeout_ms = match lookup("HIKARI_RPC_TIMEOUT_MS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("HIKARI_RPC_TIMEOUT_MS is not a number: {v}"))?,
            None => 5_000,
        };

        Ok(Self {
            bind_addr: lookup("HIKARI_GATEWAY_BIND").unwrap_or_else(|| "0.0.0.0:8081".into()),
            metadata_url: lookup("HIKARI_METADATA_URL")
                .unwrap_or_else(|| "http://localhost:50051".into()),
            default_language: lookup("HIKARI_DEFAULT_LANGUAGE")
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "ru-RU".into()),
            rpc_timeout: Duration::from_millis(rpc_timeout_ms),
            cors_origin: lookup("HIKARI_CORS_ORIGIN")
                .unwrap_or_else(|| "http://localhost:5173".into()),
        })
    }
}
