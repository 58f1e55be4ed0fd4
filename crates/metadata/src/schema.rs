//! TMDB payload shapes and their mapping into protocol messages.

use hikari_core::types::{MediaItem, PagedResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::MetadataError;

const SNIPPET_LEN: usize = 128;

/// `/movie/popular` and `/search/movie` payload.
#[derive(Debug, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: i32,
    pub results: Vec<MovieEntry>,
    #[serde(default)]
    pub total_pages: i32,
}

/// A movie entry; also the whole `/movie/{id}` payload.
#[derive(Debug, Deserialize)]
pub struct MovieEntry {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub original_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub release_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub vote_average: f64,
}

/// `/search/tv` payload.
#[derive(Debug, Deserialize)]
pub struct TvPage {
    #[serde(default)]
    pub page: i32,
    pub results: Vec<TvEntry>,
    #[serde(default)]
    pub total_pages: i32,
}

#[derive(Debug, Deserialize)]
pub struct TvEntry {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub original_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub first_air_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub vote_average: f64,
}

/// TMDB sends `null` for some absent fields.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a provider body, keeping its size and head for diagnostics.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, MetadataError> {
    serde_json::from_slice(body).map_err(|e| {
        let snippet = String::from_utf8_lossy(&body[..body.len().min(SNIPPET_LEN)]).into_owned();
        warn!(size = body.len(), snippet = %snippet, error = %e, "failed to decode provider payload");
        MetadataError::Decode {
            message: e.to_string(),
            size: body.len(),
            snippet,
        }
    })
}

/// Absolute poster URL, or empty when the provider has none.
pub fn poster_url(image_base: &str, path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{image_base}{p}"),
        _ => String::new(),
    }
}

impl MovieEntry {
    pub fn into_media_item(self, image_base: &str) -> MediaItem {
        MediaItem {
            id: self.id,
            poster_path: poster_url(image_base, self.poster_path.as_deref()),
            title: self.title,
            original_title: self.original_title,
            overview: self.overview,
            release_date: self.release_date,
            vote_average: self.vote_average,
        }
    }
}

impl TvEntry {
    pub fn into_media_item(self, image_base: &str) -> MediaItem {
        MediaItem {
            id: self.id,
            poster_path: poster_url(image_base, self.poster_path.as_deref()),
            title: self.name,
            original_title: self.original_name,
            overview: self.overview,
            release_date: self.first_air_date,
            vote_average: self.vote_average,
        }
    }
}

impl MoviePage {
    pub fn into_paged_result(self, image_base: &str) -> PagedResult {
        PagedResult {
            items: self
                .results
                .into_iter()
                .map(|m| m.into_media_item(image_base))
                .collect(),
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}

impl TvPage {
    pub fn into_paged_result(self, image_base: &str) -> PagedResult {
        PagedResult {
            items: self
                .results
                .into_iter()
                .map(|t| t.into_media_item(image_base))
                .collect(),
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}
