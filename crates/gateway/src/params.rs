//! Query and path parameter resolution.
//!
//! `page` and `language` fall back to their defaults independently of each
//! other. An empty value counts as missing.

use hikari_core::error::ApiError;
use serde::Deserialize;

pub const DEFAULT_PAGE: i32 = 1;

/// Raw query string of the list and search routes.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub language: Option<String>,
    pub query: Option<String>,
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|v| !v.is_empty())
}

pub fn resolve_page(raw: Option<&str>) -> Result<i32, ApiError> {
    let Some(raw) = present(raw) else {
        return Ok(DEFAULT_PAGE);
    };

    match raw.parse::<i32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ApiError::BadRequest("invalid page parameter".into())),
    }
}

pub fn resolve_language(raw: Option<&str>, default: &str) -> String {
    present(raw).unwrap_or(default).to_string()
}

pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest("invalid movie ID parameter".into()))
}
