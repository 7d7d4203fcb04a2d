//! Photo gallery loaders.

use anyhow::{Context, Result};
use cinedex_api::tmdb::{MediaType, TmdbApi, TmdbImages};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, AppResult};
use crate::http::parse_id;
use crate::i18n::Locale;

/// Data behind a photos page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotosData {
    /// Movie or TV show.
    pub media_type: MediaType,
    /// TMDB id.
    pub id: u64,
    /// Localized movie title or show name.
    pub title: String,
    /// Main poster, shown as a thumbnail next to the heading.
    pub poster_path: Option<String>,
    /// Backdrops, logos and posters.
    pub images: TmdbImages,
}

/// Loads the photos of a TV show.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an invalid id or an unknown show, and
/// `AppError::Upstream` if a TMDB call fails.
pub async fn load_tv_photos<A: TmdbApi + Sync>(
    api: &A,
    raw_id: &str,
    locale: &Locale,
) -> AppResult<PhotosData> {
    load_photos(api, MediaType::Tv, raw_id, locale).await
}

/// Loads the photos of a movie.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an invalid id or an unknown movie, and
/// `AppError::Upstream` if a TMDB call fails.
pub async fn load_movie_photos<A: TmdbApi + Sync>(
    api: &A,
    raw_id: &str,
    locale: &Locale,
) -> AppResult<PhotosData> {
    load_photos(api, MediaType::Movie, raw_id, locale).await
}

/// Fetches title details and images concurrently.
///
/// # Errors
///
/// See [`load_tv_photos`].
#[instrument(skip_all, fields(media_type = media_type.as_path(), id = raw_id))]
pub async fn load_photos<A: TmdbApi + Sync>(
    api: &A,
    media_type: MediaType,
    raw_id: &str,
    locale: &Locale,
) -> AppResult<PhotosData> {
    let id = parse_id(raw_id).ok_or(AppError::NotFound)?;
    let lang = locale.as_str();

    let (heading, images) = tokio::try_join!(
        fetch_heading(api, media_type, id, lang),
        api.images(media_type, id, lang),
    )
    .with_context(|| format!("failed to load photos of {}/{id}", media_type.as_path()))?;

    let (Some((title, poster_path)), Some(images)) = (heading, images) else {
        tracing::debug!(id, "title has no photos");
        return Err(AppError::NotFound);
    };

    Ok(PhotosData {
        media_type,
        id,
        title,
        poster_path: poster_path.filter(|p| !p.is_empty()),
        images,
    })
}

/// Title and poster path of a movie or show.
async fn fetch_heading<A: TmdbApi + Sync>(
    api: &A,
    media_type: MediaType,
    id: u64,
    lang: &str,
) -> Result<Option<(String, Option<String>)>> {
    let heading = match media_type {
        MediaType::Movie => api
            .movie_details(id, lang)
            .await?
            .map(|d| (d.title, d.poster_path)),
        MediaType::Tv => api
            .tv_details(id, lang)
            .await?
            .map(|d| (d.name, d.poster_path)),
    };
    Ok(heading)
}
