//! TMDB API response types and request parameters.

use serde::{Deserialize, Serialize};

// --- Shared ---

/// Media kind as used in TMDB paths (`movie/...`, `tv/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Feature film.
    Movie,
    /// TV series.
    Tv,
}

impl MediaType {
    /// Path segment used by the TMDB API.
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

/// Paginated result envelope shared by search and list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    /// Current page number.
    pub page: u32,
    /// Results on this page.
    pub results: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Localized genre name.
    pub name: String,
}

/// Response from `genre/{movie|tv}/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    /// Genres.
    pub genres: Vec<TmdbGenre>,
}

// --- Movies ---

/// A single movie entry in search and list results.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieResult {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Release date (YYYY-MM-DD, empty or null when unknown).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// Response from `search/movie`.
pub type TmdbSearchMovieResponse = TmdbPage<TmdbMovieResult>;

/// Response from `movie/{category}`.
pub type TmdbMovieListResponse = TmdbPage<TmdbMovieResult>;

/// Response from `movie/{movie_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// Movie list categories exposed by `movie/{category}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieListCategory {
    /// Movies currently in theatres.
    NowPlaying,
    /// Popular movies.
    Popular,
    /// Top rated movies.
    TopRated,
    /// Upcoming releases.
    Upcoming,
}

impl MovieListCategory {
    /// Path segment used by the TMDB API.
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::NowPlaying => "now_playing",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
        }
    }
}

// --- TV ---

/// A single TV series entry in search and list results.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvResult {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Origin countries (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Vec<String>,
    /// First air date (YYYY-MM-DD, empty or null when unknown).
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// Response from `search/tv`.
pub type TmdbSearchTvResponse = TmdbPage<TmdbTvResult>;

/// Response from `tv/{category}`.
pub type TmdbTvListResponse = TmdbPage<TmdbTvResult>;

/// Response from `tv/{series_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: String,
    /// First air date.
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Last air date.
    #[serde(default)]
    pub last_air_date: Option<String>,
    /// Total number of episodes.
    #[serde(default)]
    pub number_of_episodes: u32,
    /// Total number of seasons.
    #[serde(default)]
    pub number_of_seasons: u32,
    /// Status (e.g., "Returning Series", "Ended").
    #[serde(default)]
    pub status: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// TV list categories exposed by `tv/{category}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvListCategory {
    /// Episodes airing today.
    AiringToday,
    /// Series airing within the next seven days.
    OnTheAir,
    /// Popular series.
    Popular,
    /// Top rated series.
    TopRated,
}

impl TvListCategory {
    /// Path segment used by the TMDB API.
    #[must_use]
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::AiringToday => "airing_today",
            Self::OnTheAir => "on_the_air",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
        }
    }
}

// --- Images ---

/// Response from `{movie|tv}/{id}/images`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbImages {
    /// Owning movie or series ID.
    pub id: u64,
    /// Backdrop images.
    #[serde(default)]
    pub backdrops: Vec<TmdbImage>,
    /// Logo images.
    #[serde(default)]
    pub logos: Vec<TmdbImage>,
    /// Poster images.
    #[serde(default)]
    pub posters: Vec<TmdbImage>,
}

/// A single image entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbImage {
    /// Image path relative to the image CDN size prefix.
    pub file_path: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Width / height.
    #[serde(default)]
    pub aspect_ratio: f64,
    /// Language of text in the image, if any.
    #[serde(default)]
    pub iso_639_1: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    #[allow(dead_code)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page; TMDB defaults to 1 when unset.
    pub page: Option<u32>,
    /// Filter by year.
    pub year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: None,
            year: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: Option<u32>) -> Self {
        self.page = page;
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }
}

/// Parameters for `search/tv` endpoint.
#[derive(Debug, Clone)]
pub struct SearchTvParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page; TMDB defaults to 1 when unset.
    pub page: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchTvParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: Option<u32>) -> Self {
        self.page = page;
        self
    }
}
