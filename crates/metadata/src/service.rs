use hikari_core::rpc::{
    GET_MOVIE_BY_ID, GET_POPULAR_MOVIES, MetadataService, RpcStatus, SEARCH_MOVIES,
    SEARCH_TV_SHOWS,
};
use hikari_core::types::{
    MediaItem, MovieByIdRequest, PagedResult, PopularMoviesRequest, SearchRequest,
};
use tracing::{info, warn};

use crate::MetadataError;
use crate::tmdb::TmdbTranslator;

/// The metadata service backed by TMDB. One provider call per request.
pub struct TmdbMetadataService {
    translator: TmdbTranslator,
}

impl TmdbMetadataService {
    pub fn new(translator: TmdbTranslator) -> Self {
        Self { translator }
    }
}

fn require_query(query: &str) -> Result<(), MetadataError> {
    if query.is_empty() {
        return Err(MetadataError::InvalidArgument("query required".into()));
    }
    Ok(())
}

fn require_id(id: i64) -> Result<(), MetadataError> {
    if id == 0 {
        return Err(MetadataError::InvalidArgument("id required".into()));
    }
    Ok(())
}

/// TV search also refuses an unset page or language; movie search leaves
/// those to the provider.
fn require_paging(page: i32, language: &str) -> Result<(), MetadataError> {
    if page == 0 {
        return Err(MetadataError::InvalidArgument("page required".into()));
    }
    if language.is_empty() {
        return Err(MetadataError::InvalidArgument("language required".into()));
    }
    Ok(())
}

fn fail(method: &'static str, err: MetadataError) -> RpcStatus {
    warn!(method, error = %err, "metadata call failed");
    err.into()
}

#[async_trait::async_trait]
impl MetadataService for TmdbMetadataService {
    async fn get_popular_movies(
        &self,
        req: PopularMoviesRequest,
    ) -> Result<PagedResult, RpcStatus> {
        let result = self
            .translator
            .popular_movies(req.page, &req.language)
            .await
            .map_err(|e| fail(GET_POPULAR_MOVIES, e))?;

        info!(count = result.items.len(), page = result.page, "popular movies served");
        Ok(result)
    }

    async fn search_movies(&self, req: SearchRequest) -> Result<PagedResult, RpcStatus> {
        require_query(&req.query).map_err(|e| fail(SEARCH_MOVIES, e))?;

        let result = self
            .translator
            .search_movies(&req.query, req.page, &req.language)
            .await
            .map_err(|e| fail(SEARCH_MOVIES, e))?;

        info!(query = %req.query, count = result.items.len(), "movie search served");
        Ok(result)
    }

    async fn get_movie_by_id(&self, req: MovieByIdRequest) -> Result<MediaItem, RpcStatus> {
        require_id(req.id).map_err(|e| fail(GET_MOVIE_BY_ID, e))?;

        let item = self
            .translator
            .movie_by_id(req.id, &req.language)
            .await
            .map_err(|e| fail(GET_MOVIE_BY_ID, e))?;

        info!(id = item.id, title = %item.title, "movie served");
        Ok(item)
    }

    async fn search_tv_shows(&self, req: SearchRequest) -> Result<PagedResult, RpcStatus> {
        require_query(&req.query)
            .and_then(|()| require_paging(req.page, &req.language))
            .map_err(|e| fail(SEARCH_TV_SHOWS, e))?;

        let result = self
            .translator
            .search_tv_shows(&req.query, req.page, &req.language)
            .await
            .map_err(|e| fail(SEARCH_TV_SHOWS, e))?;

        info!(query = %req.query, count = result.items.len(), "TV search served");
        Ok(result)
    }
}
