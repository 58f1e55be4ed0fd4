use std::time::Duration;

use hikari_core::rpc::{
    DEADLINE_HEADER, GET_MOVIE_BY_ID, GET_POPULAR_MOVIES, MetadataService, RpcStatus,
    SEARCH_MOVIES, SEARCH_TV_SHOWS,
};
use hikari_core::types::{
    MediaItem, MovieByIdRequest, PagedResult, PopularMoviesRequest, SearchRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Client for a remote metadata service.
pub struct RpcClient {
    http: reqwest::Client,
    base_url: String,
    deadline: Option<Duration>,
}

impl RpcClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            deadline: None,
        }
    }

    /// Tell the service how long the caller will wait.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    async fn call<Req, Resp>(&self, method: &'static str, req: &Req) -> Result<Resp, RpcStatus>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/rpc/{method}", self.base_url);
        debug!(method, url = %url, "metadata call");

        let mut request = self.http.post(&url).json(req);
        if let Some(deadline) = self.deadline {
            request = request.header(DEADLINE_HEADER, deadline.as_millis().to_string());
        }

        let resp = request.send().await.map_err(|e| {
            warn!(method, error = %e, "metadata service unreachable");
            RpcStatus::unavailable(format!("metadata service unreachable: {e}"))
        })?;

        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<Resp>()
                .await
                .map_err(|e| RpcStatus::internal(format!("malformed {method} response: {e}")));
        }

        let body = resp.bytes().await.unwrap_or_default();
        Err(serde_json::from_slice::<RpcStatus>(&body).unwrap_or_else(|_| {
            RpcStatus::internal(format!("{method} failed with HTTP {status}"))
        }))
    }
}

#[async_trait::async_trait]
impl MetadataService for RpcClient {
    async fn get_popular_movies(
        &self,
        req: PopularMoviesRequest,
    ) -> Result<PagedResult, RpcStatus> {
        self.call(GET_POPULAR_MOVIES, &req).await
    }

    async fn search_movies(&self, req: SearchRequest) -> Result<PagedResult, RpcStatus> {
        self.call(SEARCH_MOVIES, &req).await
    }

    async fn get_movie_by_id(&self, req: MovieByIdRequest) -> Result<MediaItem, RpcStatus> {
        self.call(GET_MOVIE_BY_ID, &req).await
    }

    async fn search_tv_shows(&self, req: SearchRequest) -> Result<PagedResult, RpcStatus> {
        self.call(SEARCH_TV_SHOWS, &req).await
    }
}
