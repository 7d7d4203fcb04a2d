//! Category list loaders (popular, airing today, ...).

use anyhow::{Context, Result};
use cinedex_api::tmdb::{MediaType, MovieListCategory, TmdbApi, TmdbGenre, TvListCategory};
use serde::Serialize;
use tracing::instrument;

use super::media::{MediaListPage, route_prefix};
use crate::error::AppResult;
use crate::http::CacheControl;
use crate::i18n::Locale;

/// A category list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRoute {
    /// A list under `/tv-shows`.
    Tv(TvListCategory),
    /// A list under `/movies`.
    Movie(MovieListCategory),
}

/// Browsing order of the TV lists.
const TV_SEQUENCE: [TvListCategory; 4] = [
    TvListCategory::Popular,
    TvListCategory::AiringToday,
    TvListCategory::OnTheAir,
    TvListCategory::TopRated,
];

/// Browsing order of the movie lists.
const MOVIE_SEQUENCE: [MovieListCategory; 4] = [
    MovieListCategory::Popular,
    MovieListCategory::NowPlaying,
    MovieListCategory::Upcoming,
    MovieListCategory::TopRated,
];

impl ListRoute {
    /// Every list route, TV first.
    pub const ALL: [Self; 8] = [
        Self::Tv(TvListCategory::Popular),
        Self::Tv(TvListCategory::AiringToday),
        Self::Tv(TvListCategory::OnTheAir),
        Self::Tv(TvListCategory::TopRated),
        Self::Movie(MovieListCategory::Popular),
        Self::Movie(MovieListCategory::NowPlaying),
        Self::Movie(MovieListCategory::Upcoming),
        Self::Movie(MovieListCategory::TopRated),
    ];

    /// Media type listed by the route.
    #[must_use]
    pub const fn media_type(self) -> MediaType {
        match self {
            Self::Tv(_) => MediaType::Tv,
            Self::Movie(_) => MediaType::Movie,
        }
    }

    /// Last path segment, e.g. `airing-today`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Tv(TvListCategory::AiringToday) => "airing-today",
            Self::Tv(TvListCategory::OnTheAir) => "on-the-air",
            Self::Tv(TvListCategory::Popular) | Self::Movie(MovieListCategory::Popular) => {
                "popular"
            }
            Self::Tv(TvListCategory::TopRated) | Self::Movie(MovieListCategory::TopRated) => {
                "top-rated"
            }
            Self::Movie(MovieListCategory::NowPlaying) => "now-playing",
            Self::Movie(MovieListCategory::Upcoming) => "upcoming",
        }
    }

    /// Route path, e.g. `/tv-shows/airing-today`.
    #[must_use]
    pub fn path(self) -> String {
        format!("{}/{}", route_prefix(self.media_type()), self.slug())
    }

    /// Message key of the list title.
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Tv(TvListCategory::AiringToday) => "airing-today-tv-shows",
            Self::Tv(TvListCategory::OnTheAir) => "on-the-air-tv-shows",
            Self::Tv(TvListCategory::Popular) => "popular-tv-shows",
            Self::Tv(TvListCategory::TopRated) => "top-rated-tv-shows",
            Self::Movie(MovieListCategory::NowPlaying) => "now-playing-movies",
            Self::Movie(MovieListCategory::Popular) => "popular-movies",
            Self::Movie(MovieListCategory::TopRated) => "top-rated-movies",
            Self::Movie(MovieListCategory::Upcoming) => "upcoming-movies",
        }
    }

    /// Airing today refreshes daily; the other lists are cached longer.
    #[must_use]
    pub const fn cache_control(self) -> CacheControl {
        match self {
            Self::Tv(TvListCategory::AiringToday) => CacheControl::AiringToday,
            _ => CacheControl::List,
        }
    }

    /// Previous and next list in the same media type's browsing order.
    #[must_use]
    pub fn neighbors(self) -> (Option<Self>, Option<Self>) {
        fn around<T: Copy + PartialEq>(seq: &[T], current: T) -> (Option<T>, Option<T>) {
            let Some(i) = seq.iter().position(|c| *c == current) else {
                return (None, None);
            };
            let prev = i.checked_sub(1).and_then(|p| seq.get(p)).copied();
            (prev, seq.get(i + 1).copied())
        }
        match self {
            Self::Tv(c) => {
                let (p, n) = around(&TV_SEQUENCE, c);
                (p.map(Self::Tv), n.map(Self::Tv))
            }
            Self::Movie(c) => {
                let (p, n) = around(&MOVIE_SEQUENCE, c);
                (p.map(Self::Movie), n.map(Self::Movie))
            }
        }
    }
}

/// Data behind a category list page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData {
    /// Media type of every item.
    pub media_type: MediaType,
    /// The requested results page.
    pub list: MediaListPage,
    /// Genre names for the media type; empty if TMDB could not provide them.
    pub genres: Vec<TmdbGenre>,
}

/// Loads one page of a TV list.
///
/// # Errors
///
/// Returns `AppError::Upstream` if the list call fails.
pub async fn load_tv_list<A: TmdbApi + Sync>(
    api: &A,
    category: TvListCategory,
    page: Option<u32>,
    locale: &Locale,
) -> AppResult<ListData> {
    load_list(api, ListRoute::Tv(category), page, locale).await
}

/// Loads one page of a movie list.
///
/// # Errors
///
/// Returns `AppError::Upstream` if the list call fails.
pub async fn load_movie_list<A: TmdbApi + Sync>(
    api: &A,
    category: MovieListCategory,
    page: Option<u32>,
    locale: &Locale,
) -> AppResult<ListData> {
    load_list(api, ListRoute::Movie(category), page, locale).await
}

/// Loads a list page together with the genre names.
///
/// A genre failure is logged and leaves the genre list empty.
///
/// # Errors
///
/// Returns `AppError::Upstream` if the list call fails.
#[instrument(skip_all, fields(list = %route.path(), page = ?page))]
pub async fn load_list<A: TmdbApi + Sync>(
    api: &A,
    route: ListRoute,
    page: Option<u32>,
    locale: &Locale,
) -> AppResult<ListData> {
    let lang = locale.as_str();
    let (list, genres) = tokio::join!(
        fetch_list(api, route, lang, page),
        api.genres(route.media_type(), lang)
    );
    let list = list.with_context(|| format!("failed to load {}", route.path()))?;
    let genres = genres.unwrap_or_else(|e| {
        tracing::warn!(error = format!("{e:#}"), "genre list unavailable");
        Vec::new()
    });
    Ok(ListData {
        media_type: route.media_type(),
        list,
        genres,
    })
}

async fn fetch_list<A: TmdbApi + Sync>(
    api: &A,
    route: ListRoute,
    lang: &str,
    page: Option<u32>,
) -> Result<MediaListPage> {
    let list: MediaListPage = match route {
        ListRoute::Tv(category) => api.tv_list(category, lang, page).await?.into(),
        ListRoute::Movie(category) => api.movie_list(category, lang, page).await?.into(),
    };
    Ok(list)
}
