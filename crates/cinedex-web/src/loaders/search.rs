//! Keyword search loaders.

use anyhow::Context;
use cinedex_api::tmdb::{MediaType, SearchMovieParams, SearchTvParams, TmdbApi};
use serde::Serialize;
use tracing::instrument;

use super::media::MediaListPage;
use crate::error::AppResult;
use crate::i18n::Locale;

/// Data behind a search results page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    /// Searched media type.
    pub media_type: MediaType,
    /// Decoded search keyword.
    pub keyword: String,
    /// The requested results page.
    pub search_results: MediaListPage,
}

/// Searches movies by keyword.
///
/// # Errors
///
/// Returns `AppError::Upstream` if the TMDB call fails.
#[instrument(skip_all, fields(keyword = %keyword, page = ?page))]
pub async fn load_movie_search<A: TmdbApi + Sync>(
    api: &A,
    keyword: &str,
    page: Option<u32>,
    locale: &Locale,
) -> AppResult<SearchData> {
    let params = SearchMovieParams::new(keyword)
        .language(locale.as_str())
        .page(page);
    let response = api
        .search_movie(&params)
        .await
        .with_context(|| format!("movie search for '{keyword}' failed"))?;
    tracing::debug!(results = response.total_results, "movie search loaded");
    Ok(SearchData {
        media_type: MediaType::Movie,
        keyword: String::from(keyword),
        search_results: response.into(),
    })
}

/// Searches TV shows by keyword.
///
/// # Errors
///
/// Returns `AppError::Upstream` if the TMDB call fails.
#[instrument(skip_all, fields(keyword = %keyword, page = ?page))]
pub async fn load_tv_search<A: TmdbApi + Sync>(
    api: &A,
    keyword: &str,
    page: Option<u32>,
    locale: &Locale,
) -> AppResult<SearchData> {
    let params = SearchTvParams::new(keyword)
        .language(locale.as_str())
        .page(page);
    let response = api
        .search_tv(&params)
        .await
        .with_context(|| format!("tv search for '{keyword}' failed"))?;
    tracing::debug!(results = response.total_results, "tv search loaded");
    Ok(SearchData {
        media_type: MediaType::Tv,
        keyword: String::from(keyword),
        search_results: response.into(),
    })
}
