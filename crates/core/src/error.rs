use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error answered to REST clients.
///
/// Messages are client-safe; diagnostic detail is logged where the error is
/// produced and never carried here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
            Self::BadGateway(_) => 502,
        }
    }
}

/// JSON error body: `{ "error": "…" }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(e: &ApiError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}
