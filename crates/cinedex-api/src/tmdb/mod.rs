//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints used by the
//! browsing front-end: search, category lists, details, images and genres.

mod api;
mod client;
pub mod image;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    MediaType, MovieListCategory, SearchMovieParams, SearchTvParams, TmdbGenre, TmdbImage,
    TmdbImages, TmdbMovieDetails, TmdbMovieListResponse, TmdbMovieResult, TmdbPage,
    TmdbSearchMovieResponse, TmdbSearchTvResponse, TmdbTvDetails, TmdbTvListResponse,
    TmdbTvResult, TvListCategory,
};
