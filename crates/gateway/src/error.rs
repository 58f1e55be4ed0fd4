use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hikari_core::error::{ApiError, ErrorEnvelope};
use hikari_core::rpc::{RpcCode, RpcStatus};
use tracing::warn;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        warn!(error = %e.body_text(), "rejected query string");
        Self(ApiError::BadRequest("invalid query parameters".into()))
    }
}

/// Client-facing error for a failed metadata call.
///
/// Only `invalid_argument` messages reach the client; anything else is
/// logged and replaced by `summary`.
pub fn rpc_failure(method: &'static str, status: RpcStatus, summary: &str) -> AppError {
    warn!(method, code = %status.code, message = %status.message, "metadata call failed");

    let err = match status.code {
        RpcCode::InvalidArgument => ApiError::BadRequest(status.message),
        RpcCode::NotFound => ApiError::NotFound("not found".into()),
        RpcCode::DeadlineExceeded | RpcCode::Unavailable => ApiError::BadGateway(summary.into()),
        RpcCode::Internal => ApiError::Internal(summary.into()),
    };
    AppError(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(code: RpcCode) -> u16 {
        rpc_failure("Test", RpcStatus::new(code, "detail"), "failed")
            .0
            .status_code()
    }

    #[test]
    fn rpc_codes_map_to_http_statuses() {
        assert_eq!(status_of(RpcCode::InvalidArgument), 400);
        assert_eq!(status_of(RpcCode::NotFound), 404);
        assert_eq!(status_of(RpcCode::DeadlineExceeded), 502);
        assert_eq!(status_of(RpcCode::Unavailable), 502);
        assert_eq!(status_of(RpcCode::Internal), 500);
    }

    #[test]
    fn internal_detail_is_replaced_by_summary() {
        let err = rpc_failure(
            "GetPopularMovies",
            RpcStatus::internal("metadata provider returned status 401"),
            "failed to fetch popular movies",
        );
        assert_eq!(err.0.to_string(), "failed to fetch popular movies");
    }

    #[test]
    fn invalid_argument_message_is_kept() {
        let err = rpc_failure(
            "SearchMovies",
            RpcStatus::invalid_argument("query required"),
            "failed to search movies",
        );
        assert_eq!(err.0.to_string(), "query required");
    }
}
