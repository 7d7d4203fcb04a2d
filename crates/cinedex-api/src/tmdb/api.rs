//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    MediaType, MovieListCategory, SearchMovieParams, SearchTvParams, TmdbGenre, TmdbImages,
    TmdbMovieDetails, TmdbMovieListResponse, TmdbSearchMovieResponse, TmdbSearchTvResponse,
    TmdbTvDetails, TmdbTvListResponse, TvListCategory,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// implement `TmdbApi` so the futures can be awaited from server handlers.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches for movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbSearchMovieResponse>;

    /// Searches for TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TmdbSearchTvResponse>;

    /// Fetches one page of a movie list (popular, upcoming, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_list(
        &self,
        category: MovieListCategory,
        language: &str,
        page: Option<u32>,
    ) -> Result<TmdbMovieListResponse>;

    /// Fetches one page of a TV list (airing today, popular, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_list(
        &self,
        category: TvListCategory,
        language: &str,
        page: Option<u32>,
    ) -> Result<TmdbTvListResponse>;

    /// Fetches movie details. `None` when TMDB has no such movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64, language: &str)
    -> Result<Option<TmdbMovieDetails>>;

    /// Fetches TV series details. `None` when TMDB has no such series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_details(&self, series_id: u64, language: &str) -> Result<Option<TmdbTvDetails>>;

    /// Fetches backdrops, logos and posters. `None` when TMDB has no such title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn images(
        &self,
        media_type: MediaType,
        id: u64,
        language: &str,
    ) -> Result<Option<TmdbImages>>;

    /// Fetches the localized genre list for a media type.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn genres(&self, media_type: MediaType, language: &str) -> Result<Vec<TmdbGenre>>;
}
