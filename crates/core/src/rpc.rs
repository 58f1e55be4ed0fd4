//! The metadata RPC contract shared by the service and the gateway.
//!
//! Calls travel as JSON over HTTP: `POST /rpc/{method}` with the request
//! message as body. Success answers 200 with the response message; failure
//! answers with [`RpcStatus`] as body and [`RpcCode::http_status`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MediaItem, MovieByIdRequest, PagedResult, PopularMoviesRequest, SearchRequest};

pub const GET_POPULAR_MOVIES: &str = "GetPopularMovies";
pub const SEARCH_MOVIES: &str = "SearchMovies";
pub const GET_MOVIE_BY_ID: &str = "GetMovieByID";
pub const SEARCH_TV_SHOWS: &str = "SearchTVShows";

/// Header carrying the caller's remaining deadline in milliseconds.
pub const DEADLINE_HEADER: &str = "x-rpc-timeout-ms";

/// Status code of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcCode {
    InvalidArgument,
    NotFound,
    DeadlineExceeded,
    Unavailable,
    Internal,
}

impl RpcCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::Unavailable => "unavailable",
            Self::Internal => "internal",
        }
    }

    pub fn http_status(self) -> u16 {
        match self {
            Self::InvalidArgument => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
            Self::Unavailable => 503,
            Self::DeadlineExceeded => 504,
        }
    }
}

impl std::fmt::Display for RpcCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned across the RPC boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct RpcStatus {
    pub code: RpcCode,
    pub message: String,
}

impl RpcStatus {
    pub fn new(code: RpcCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(RpcCode::InvalidArgument, message)
    }

    pub fn deadline_exceeded() -> Self {
        Self::new(RpcCode::DeadlineExceeded, "deadline exceeded")
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(RpcCode::Unavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RpcCode::Internal, message)
    }
}

/// The metadata service as seen from either side of the wire.
#[async_trait::async_trait]
pub trait MetadataService: Send + Sync {
    async fn get_popular_movies(
        &self,
        req: PopularMoviesRequest,
    ) -> Result<PagedResult, RpcStatus>;

    async fn search_movies(&self, req: SearchRequest) -> Result<PagedResult, RpcStatus>;

    async fn get_movie_by_id(&self, req: MovieByIdRequest) -> Result<MediaItem, RpcStatus>;

    async fn search_tv_shows(&self, req: SearchRequest) -> Result<PagedResult, RpcStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_json() {
        let status = RpcStatus::invalid_argument("query required");
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"code":"invalid_argument","message":"query required"}"#);
        assert_eq!(serde_json::from_str::<RpcStatus>(&json).unwrap(), status);
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(
            RpcStatus::unavailable("connection refused").to_string(),
            "unavailable: connection refused"
        );
    }
}
