//! Category list routes.

use axum::response::Response;
use axum::{Router, routing::get};

use super::PageContext;
use crate::http::{ListView, PageQuery, parse_page};
use crate::loaders::{ListRoute, load_list};
use crate::state::AppState;
use crate::view::pages::list_page;

/// GET /tv-shows/{category} and /movies/{category}
async fn list(ctx: PageContext, route: ListRoute) -> Response {
    let query = PageQuery::from_query(ctx.query.as_deref());
    let page = parse_page(query.page.as_deref());
    let view = ListView::parse(query.view.as_deref());
    let result = load_list(ctx.state.tmdb.as_ref(), route, page, &ctx.locale).await;
    ctx.finish(result, route.cache_control(), |v, data| {
        list_page(v, route, data, view)
    })
}

/// Mount one static route per list category.
pub fn router() -> Router<AppState> {
    ListRoute::ALL
        .into_iter()
        .fold(Router::new(), |router, route| {
            router.route(
                &route.path(),
                get(move |ctx: PageContext| list(ctx, route)),
            )
        })
}
