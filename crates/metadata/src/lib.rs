pub mod config;
pub mod rpc;
pub mod schema;
pub mod service;
pub mod tmdb;
pub mod upstream;

use hikari_core::rpc::{RpcCode, RpcStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: u16 },
    #[error("decode error: {message} ({size} bytes, starts with {snippet:?})")]
    Decode {
        message: String,
        size: usize,
        snippet: String,
    },
}

impl MetadataError {
    pub fn rpc_code(&self) -> RpcCode {
        match self {
            Self::InvalidArgument(_) => RpcCode::InvalidArgument,
            Self::UpstreamUnavailable(_) => RpcCode::Unavailable,
            Self::UpstreamStatus { status: 404 } => RpcCode::NotFound,
            Self::UpstreamStatus { .. } | Self::Decode { .. } => RpcCode::Internal,
        }
    }
}

/// Payload snippets and provider URLs stay in the logs; the status carries a
/// short summary only.
impl From<MetadataError> for RpcStatus {
    fn from(e: MetadataError) -> Self {
        let code = e.rpc_code();
        let message = match e {
            MetadataError::InvalidArgument(msg) => msg,
            MetadataError::UpstreamUnavailable(_) => "metadata provider unavailable".to_string(),
            MetadataError::UpstreamStatus { status } => {
                format!("metadata provider returned status {status}")
            }
            MetadataError::Decode { .. } => "malformed metadata provider response".to_string(),
        };
        RpcStatus::new(code, message)
    }
}
