use std::sync::Arc;
use std::time::Duration;

use hikari_core::rpc::MetadataService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<dyn MetadataService>,
    /// Deadline applied to every metadata call.
    pub rpc_timeout: Duration,
    pub default_language: String,
}

impl AppState {
    pub fn new(
        metadata: Arc<dyn MetadataService>,
        rpc_timeout: Duration,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            metadata,
            rpc_timeout,
            default_language: default_language.into(),
        }
    }
}
