//! HTTP transport for [`MetadataService`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hikari_core::rpc::{
    DEADLINE_HEADER, GET_MOVIE_BY_ID, GET_POPULAR_MOVIES, MetadataService, RpcStatus,
    SEARCH_MOVIES, SEARCH_TV_SHOWS,
};
use hikari_core::types::{
    MediaItem, MovieByIdRequest, PagedResult, PopularMoviesRequest, SearchRequest,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub type SharedService = Arc<dyn MetadataService>;

pub fn build_router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(&format!("/rpc/{GET_POPULAR_MOVIES}"), post(get_popular_movies))
        .route(&format!("/rpc/{SEARCH_MOVIES}"), post(search_movies))
        .route(&format!("/rpc/{GET_MOVIE_BY_ID}"), post(get_movie_by_id))
        .route(&format!("/rpc/{SEARCH_TV_SHOWS}"), post(search_tv_shows))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Newtype wrapper so an [`RpcStatus`] can be answered directly.
pub struct RpcError(pub RpcStatus);

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}

impl From<RpcStatus> for RpcError {
    fn from(s: RpcStatus) -> Self {
        Self(s)
    }
}

impl From<JsonRejection> for RpcError {
    fn from(e: JsonRejection) -> Self {
        Self(RpcStatus::invalid_argument(e.body_text()))
    }
}

fn deadline(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(DEADLINE_HEADER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_millis)
}

/// Run `call` within the caller's deadline, if it sent one. Dropping the
/// call on expiry abandons its provider request.
async fn within_deadline<T>(
    method: &'static str,
    headers: &HeaderMap,
    call: impl Future<Output = Result<T, RpcStatus>>,
) -> Result<T, RpcError> {
    let Some(limit) = deadline(headers) else {
        return Ok(call.await?);
    };

    match tokio::time::timeout(limit, call).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            warn!(method, limit_ms = limit.as_millis() as u64, "deadline exceeded");
            Err(RpcStatus::deadline_exceeded().into())
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn get_popular_movies(
    State(service): State<SharedService>,
    headers: HeaderMap,
    body: Result<Json<PopularMoviesRequest>, JsonRejection>,
) -> Result<Json<PagedResult>, RpcError> {
    let Json(req) = body?;
    within_deadline(GET_POPULAR_MOVIES, &headers, service.get_popular_movies(req))
        .await
        .map(Json)
}

async fn search_movies(
    State(service): State<SharedService>,
    headers: HeaderMap,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<PagedResult>, RpcError> {
    let Json(req) = body?;
    within_deadline(SEARCH_MOVIES, &headers, service.search_movies(req))
        .await
        .map(Json)
}

async fn get_movie_by_id(
    State(service): State<SharedService>,
    headers: HeaderMap,
    body: Result<Json<MovieByIdRequest>, JsonRejection>,
) -> Result<Json<MediaItem>, RpcError> {
    let Json(req) = body?;
    within_deadline(GET_MOVIE_BY_ID, &headers, service.get_movie_by_id(req))
        .await
        .map(Json)
}

async fn search_tv_shows(
    State(service): State<SharedService>,
    headers: HeaderMap,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<PagedResult>, RpcError> {
    let Json(req) = body?;
    within_deadline(SEARCH_TV_SHOWS, &headers, service.search_tv_shows(req))
        .await
        .map(Json)
}
