use std::future::Future;
use std::time::Duration;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_TYPE, InvalidHeaderValue};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use hikari_core::rpc::{
    GET_MOVIE_BY_ID, GET_POPULAR_MOVIES, RpcStatus, SEARCH_MOVIES, SEARCH_TV_SHOWS,
};
use hikari_core::types::{
    MediaItem, MovieByIdRequest, PagedResult, PopularMoviesRequest, SearchRequest,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, rpc_failure};
use crate::params::{ListQuery, parse_id, resolve_language, resolve_page};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .nest("/api/v1", api_router())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/movies/popular", get(popular_movies))
        .route("/movies/search", get(search_movies))
        .route("/movies/{id}", get(movie_by_id))
        .route("/tv/search", get(search_tv_shows))
}

/// The router with request tracing and CORS for the frontend at `origin`.
pub fn build_app(state: AppState, origin: &str) -> Result<Router, InvalidHeaderValue> {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origin)?);
    Ok(build_router(state).layer(middleware))
}

fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60)))
}

/// Bound a metadata call by the per-request deadline.
async fn call_with_deadline<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, RpcStatus>>,
) -> Result<T, RpcStatus> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(RpcStatus::deadline_exceeded()))
}

// ---------------------------------------------------------------------------
// Liveness
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PingResponse {
    message: &'static str,
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

async fn popular_movies(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PagedResult>, AppError> {
    let Query(params) = query?;
    let req = PopularMoviesRequest {
        page: resolve_page(params.page.as_deref())?,
        language: resolve_language(params.language.as_deref(), &state.default_language),
    };

    let result = call_with_deadline(state.rpc_timeout, state.metadata.get_popular_movies(req))
        .await
        .map_err(|e| rpc_failure(GET_POPULAR_MOVIES, e, "failed to fetch popular movies"))?;
    Ok(Json(result))
}

async fn search_movies(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PagedResult>, AppError> {
    let Query(params) = query?;
    let req = SearchRequest {
        page: resolve_page(params.page.as_deref())?,
        language: resolve_language(params.language.as_deref(), &state.default_language),
        query: params.query.unwrap_or_default(),
    };

    let result = call_with_deadline(state.rpc_timeout, state.metadata.search_movies(req))
        .await
        .map_err(|e| rpc_failure(SEARCH_MOVIES, e, "failed to search movies"))?;
    Ok(Json(result))
}

#[derive(Deserialize)]
struct LanguageQuery {
    language: Option<String>,
}

async fn movie_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<LanguageQuery>, QueryRejection>,
) -> Result<Json<MediaItem>, AppError> {
    let Query(params) = query?;
    let req = MovieByIdRequest {
        id: parse_id(&id)?,
        language: resolve_language(params.language.as_deref(), &state.default_language),
    };

    let item = call_with_deadline(state.rpc_timeout, state.metadata.get_movie_by_id(req))
        .await
        .map_err(|e| rpc_failure(GET_MOVIE_BY_ID, e, "failed to get movie by ID"))?;
    Ok(Json(item))
}

// ---------------------------------------------------------------------------
// TV
// ---------------------------------------------------------------------------

async fn search_tv_shows(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PagedResult>, AppError> {
    let Query(params) = query?;
    let req = SearchRequest {
        page: resolve_page(params.page.as_deref())?,
        language: resolve_language(params.language.as_deref(), &state.default_language),
        query: params.query.unwrap_or_default(),
    };

    let result = call_with_deadline(state.rpc_timeout, state.metadata.search_tv_shows(req))
        .await
        .map_err(|e| rpc_failure(SEARCH_TV_SHOWS, e, "failed to search TV shows"))?;
    Ok(Json(result))
}
