//! Search form and keyword result routes.

use axum::extract::Path;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Router, routing::get};
use cinedex_api::tmdb::MediaType;
use serde::Serialize;

use super::PageContext;
use crate::http::{CacheControl, ListView, PageQuery, encode_segment, parse_page, query_value};
use crate::loaders::{load_movie_search, load_tv_search};
use crate::state::AppState;
use crate::view::pages::{search_form_page, search_page};
use crate::view::search_form::{KEYWORD_PARAM, search_path};

/// JSON body of the empty search form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchFormData {
    media_type: MediaType,
}

/// GET /search/{movie|tv} -- the form, or a redirect to the results path
/// when a keyword was submitted.
async fn form(ctx: PageContext, media_type: MediaType) -> Response {
    let keyword = query_value(ctx.query.as_deref(), KEYWORD_PARAM);
    if let Some(keyword) = keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        let target = format!("{}/{}", search_path(media_type), encode_segment(keyword));
        return ctx.with_language_cookie(Redirect::to(&target).into_response());
    }
    ctx.finish(
        Ok(SearchFormData { media_type }),
        CacheControl::Search,
        |view, data| search_form_page(view, data.media_type),
    )
}

/// GET /search/{movie|tv}/{keyword}
async fn results(ctx: PageContext, media_type: MediaType, keyword: String) -> Response {
    let query = PageQuery::from_query(ctx.query.as_deref());
    let page = parse_page(query.page.as_deref());
    let view = ListView::parse(query.view.as_deref());
    let api = ctx.state.tmdb.as_ref();
    let result = match media_type {
        MediaType::Movie => load_movie_search(api, &keyword, page, &ctx.locale).await,
        MediaType::Tv => load_tv_search(api, &keyword, page, &ctx.locale).await,
    };
    ctx.finish(result, CacheControl::Search, |v, data| {
        search_page(v, data, view)
    })
}

/// Mount the search routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search/movie", get(|ctx: PageContext| form(ctx, MediaType::Movie)))
        .route("/search/tv", get(|ctx: PageContext| form(ctx, MediaType::Tv)))
        .route(
            "/search/movie/{keyword}",
            get(|ctx: PageContext, Path(keyword): Path<String>| {
                results(ctx, MediaType::Movie, keyword)
            }),
        )
        .route(
            "/search/tv/{keyword}",
            get(|ctx: PageContext, Path(keyword): Path<String>| {
                results(ctx, MediaType::Tv, keyword)
            }),
        )
}
