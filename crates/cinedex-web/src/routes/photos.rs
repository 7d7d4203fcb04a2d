//! Photo gallery routes.

use axum::extract::Path;
use axum::response::Response;
use axum::{Router, routing::get};
use cinedex_api::tmdb::MediaType;

use super::PageContext;
use crate::http::CacheControl;
use crate::loaders::{load_movie_photos, load_tv_photos};
use crate::state::AppState;
use crate::view::pages::photos_page;

/// GET /tv-shows/{tv_id}/photos and /movies/{movie_id}/photos
///
/// The id is taken as a raw string so a non-numeric id renders the 404
/// page instead of a path rejection.
async fn photos(ctx: PageContext, media_type: MediaType, raw_id: String) -> Response {
    let api = ctx.state.tmdb.as_ref();
    let result = match media_type {
        MediaType::Tv => load_tv_photos(api, &raw_id, &ctx.locale).await,
        MediaType::Movie => load_movie_photos(api, &raw_id, &ctx.locale).await,
    };
    ctx.finish(result, CacheControl::Detail, photos_page)
}

/// Mount the photo gallery routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tv-shows/{tv_id}/photos",
            get(|ctx: PageContext, Path(id): Path<String>| photos(ctx, MediaType::Tv, id)),
        )
        .route(
            "/movies/{movie_id}/photos",
            get(|ctx: PageContext, Path(id): Path<String>| photos(ctx, MediaType::Movie, id)),
        )
}
