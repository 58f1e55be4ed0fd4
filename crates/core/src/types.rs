use serde::{Deserialize, Serialize};

/// A movie or TV show as returned to clients.
///
/// Produced only by translating a provider payload. Movies and TV shows share
/// this shape; the distinction is not carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: i64,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    /// Absolute image URL, or empty when the provider has no poster.
    pub poster_path: String,
    pub release_date: String,
    pub vote_average: f64,
}

/// One page of media items in provider order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagedResult {
    #[serde(rename = "results")]
    pub items: Vec<MediaItem>,
    pub page: i32,
    pub total_pages: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularMoviesRequest {
    pub page: i32,
    pub language: String,
}

/// Shared by movie search and TV search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub page: i32,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieByIdRequest {
    #[serde(rename = "movie_id")]
    pub id: i64,
    pub language: String,
}
