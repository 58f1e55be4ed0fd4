//! TMDB (The Movie Database) translation.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::sync::Arc;

use hikari_core::types::{MediaItem, PagedResult};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::MetadataError;
use crate::schema::{self, MovieEntry, MoviePage, TvPage};
use crate::upstream::Upstream;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub base_url: String,
    pub api_key: String,
    /// Prefix for `poster_path`, size segment included.
    pub image_base: String,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_image_base(mut self, image_base: impl Into<String>) -> Self {
        self.image_base = image_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn popular_movies_url(&self, page: i32, language: &str) -> String {
        format!(
            "{}/movie/popular?api_key={}&language={}&page={page}",
            self.base_url,
            self.api_key,
            encode(language)
        )
    }

    pub fn search_movies_url(&self, query: &str, page: i32, language: &str) -> String {
        format!(
            "{}/search/movie?api_key={}&language={}&query={}&page={page}",
            self.base_url,
            self.api_key,
            encode(language),
            encode(query)
        )
    }

    pub fn movie_by_id_url(&self, id: i64, language: &str) -> String {
        format!(
            "{}/movie/{id}?api_key={}&language={}",
            self.base_url,
            self.api_key,
            encode(language)
        )
    }

    pub fn search_tv_url(&self, query: &str, page: i32, language: &str) -> String {
        format!(
            "{}/search/tv?api_key={}&language={}&query={}&page={page}",
            self.base_url,
            self.api_key,
            encode(language),
            encode(query)
        )
    }

    /// `url` with the API key masked, for logging.
    pub fn redact(&self, url: &str) -> String {
        if self.api_key.is_empty() {
            return url.to_string();
        }
        url.replace(&self.api_key, "***")
    }
}

/// Form-encode a query value. Unreserved characters pass through unchanged.
fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Builds provider URLs, fetches them and maps the payloads.
pub struct TmdbTranslator {
    config: TmdbConfig,
    upstream: Arc<dyn Upstream>,
}

impl TmdbTranslator {
    pub fn new(config: TmdbConfig, upstream: Arc<dyn Upstream>) -> Self {
        Self { config, upstream }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MetadataError> {
        debug!(url = %self.config.redact(url), "TMDB request");
        let body = self.upstream.fetch(url).await?;
        schema::decode(&body)
    }

    pub async fn popular_movies(
        &self,
        page: i32,
        language: &str,
    ) -> Result<PagedResult, MetadataError> {
        let url = self.config.popular_movies_url(page, language);
        let data: MoviePage = self.get_json(&url).await?;
        debug!(count = data.results.len(), "decoded popular movies");
        Ok(data.into_paged_result(&self.config.image_base))
    }

    pub async fn search_movies(
        &self,
        query: &str,
        page: i32,
        language: &str,
    ) -> Result<PagedResult, MetadataError> {
        let url = self.config.search_movies_url(query, page, language);
        let data: MoviePage = self.get_json(&url).await?;
        debug!(count = data.results.len(), "decoded movie search results");
        Ok(data.into_paged_result(&self.config.image_base))
    }

    pub async fn movie_by_id(&self, id: i64, language: &str) -> Result<MediaItem, MetadataError> {
        let url = self.config.movie_by_id_url(id, language);
        let data: MovieEntry = self.get_json(&url).await?;
        debug!(title = %data.title, "decoded movie");
        Ok(data.into_media_item(&self.config.image_base))
    }

    pub async fn search_tv_shows(
        &self,
        query: &str,
        page: i32,
        language: &str,
    ) -> Result<PagedResult, MetadataError> {
        let url = self.config.search_tv_url(query, page, language);
        let data: TvPage = self.get_json(&url).await?;
        debug!(count = data.results.len(), "decoded TV search results");
        Ok(data.into_paged_result(&self.config.image_base))
    }
}
