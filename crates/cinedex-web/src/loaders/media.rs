//! Movie and TV results shaped into one list item type.

use chrono::{Datelike, NaiveDate};
use cinedex_api::tmdb::{MediaType, TmdbMovieResult, TmdbPage, TmdbTvResult};
use serde::Serialize;

/// Path prefix of a media type's routes.
#[must_use]
pub const fn route_prefix(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "/movies",
        MediaType::Tv => "/tv-shows",
    }
}

/// One movie or TV show in a list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// TMDB id.
    pub id: u64,
    /// Movie or TV show.
    pub media_type: MediaType,
    /// Localized title, or show name.
    pub title: String,
    /// Title in the original language.
    pub original_title: String,
    /// Plot summary; `None` when blank.
    pub overview: Option<String>,
    /// `YYYY-MM-DD`; `None` when TMDB sends an empty date.
    pub release_date: Option<String>,
    /// Mean user rating out of 10.
    pub vote_average: f64,
    /// Number of ratings.
    pub vote_count: u32,
    /// Poster image path, relative to the TMDB image base.
    pub poster_path: Option<String>,
    /// Backdrop image path, relative to the TMDB image base.
    pub backdrop_path: Option<String>,
    /// Genre ids, resolved against the genre list when rendering.
    pub genre_ids: Vec<u32>,
    /// ISO 639-1 code.
    pub original_language: String,
}

impl MediaItem {
    /// Release (or first air) year.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Link target for the item.
    #[must_use]
    pub fn photos_path(&self) -> String {
        format!("{}/{}/photos", route_prefix(self.media_type), self.id)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TmdbMovieResult> for MediaItem {
    fn from(movie: TmdbMovieResult) -> Self {
        Self {
            id: movie.id,
            media_type: MediaType::Movie,
            title: movie.title,
            original_title: movie.original_title,
            overview: non_empty(movie.overview),
            release_date: non_empty(movie.release_date),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            poster_path: non_empty(movie.poster_path),
            backdrop_path: non_empty(movie.backdrop_path),
            genre_ids: movie.genre_ids,
            original_language: movie.original_language,
        }
    }
}

impl From<TmdbTvResult> for MediaItem {
    fn from(show: TmdbTvResult) -> Self {
        Self {
            id: show.id,
            media_type: MediaType::Tv,
            title: show.name,
            original_title: show.original_name,
            overview: non_empty(show.overview),
            release_date: non_empty(show.first_air_date),
            vote_average: show.vote_average,
            vote_count: show.vote_count,
            poster_path: non_empty(show.poster_path),
            backdrop_path: non_empty(show.backdrop_path),
            genre_ids: show.genre_ids,
            original_language: show.original_language,
        }
    }
}

/// One page of list or search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListPage {
    /// 1-based page number.
    pub page: u32,
    /// Page count reported by TMDB.
    pub total_pages: u32,
    /// Result count across all pages.
    pub total_results: u32,
    /// Items on this page.
    pub items: Vec<MediaItem>,
}

impl<T: Into<MediaItem>> From<TmdbPage<T>> for MediaListPage {
    fn from(page: TmdbPage<T>) -> Self {
        Self {
            page: page.page,
            total_pages: page.total_pages,
            total_results: page.total_results,
            items: page.results.into_iter().map(Into::into).collect(),
        }
    }
}
