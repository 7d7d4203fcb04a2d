//! Full pages composed from the view components.

use std::fmt::Write as _;

use cinedex_api::tmdb::MediaType;
use cinedex_api::tmdb::image::{PosterSize, poster_url};

use super::breadcrumb::{Breadcrumb, MiniTitle};
use super::gallery::render_gallery;
use super::html::Escaped;
use super::layout::{Page, render_layout};
use super::media_list::{MediaListProps, render_media_list};
use super::meta::PageMeta;
use super::search_form::{render_search_form, search_path};
use super::ViewContext;
use crate::error::AppError;
use crate::http::{ListView, encode_segment};
use crate::loaders::{ListData, ListRoute, PhotosData, SearchData, route_prefix};

fn home(ctx: ViewContext<'_>) -> Breadcrumb {
    Breadcrumb::new("/", ctx.t.t("home"))
}

fn section(ctx: ViewContext<'_>, media_type: MediaType) -> Breadcrumb {
    let key = match media_type {
        MediaType::Movie => "movies",
        MediaType::Tv => "tv-shows",
    };
    Breadcrumb::new(format!("{}/popular", route_prefix(media_type)), ctx.t.t(key))
}

/// Empty search form (`/search/movie`, `/search/tv`).
#[must_use]
pub fn search_form_page(ctx: ViewContext<'_>, media_type: MediaType) -> String {
    let t = ctx.t;
    let path = search_path(media_type);
    let title = t.t(match media_type {
        MediaType::Movie => "search-movies",
        MediaType::Tv => "search-tv",
    });
    let page = Page {
        meta: PageMeta::new(ctx.site, title, t.t("search-helper"), path),
        breadcrumbs: vec![home(ctx), Breadcrumb::new(path, t.t("search"))],
        mini_title: Some(MiniTitle::new(title)),
        body: render_search_form(ctx, media_type, None),
    };
    render_layout(ctx, &page)
}

/// Search results for a keyword.
#[must_use]
pub fn search_page(ctx: ViewContext<'_>, data: &SearchData, view: ListView) -> String {
    let t = ctx.t;
    let form_path = search_path(data.media_type);
    let path = format!("{form_path}/{}", encode_segment(&data.keyword));
    let results = t.t("search-results");

    let mut body = render_search_form(ctx, data.media_type, Some(&data.keyword));
    body.push_str(&render_media_list(
        ctx,
        &MediaListProps {
            name: results,
            list: &data.search_results,
            genres: &[],
            view,
            path: &path,
            show_view_switch: true,
        },
    ));

    let page = Page {
        meta: PageMeta::new(
            ctx.site,
            &format!("{results} - {}", data.keyword),
            &t.t_with("search-description", &[("keyword", &data.keyword)]),
            &path,
        ),
        breadcrumbs: vec![
            home(ctx),
            Breadcrumb::new(form_path, t.t("search")),
            Breadcrumb::new(path.clone(), data.keyword.clone()),
        ],
        mini_title: Some(MiniTitle {
            title: String::from(results),
            subtitle: Some(data.keyword.clone()),
            image_url: None,
        }),
        body,
    };
    render_layout(ctx, &page)
}

/// A category list with links to the neighbouring categories.
#[must_use]
pub fn list_page(
    ctx: ViewContext<'_>,
    route: ListRoute,
    data: &ListData,
    view: ListView,
) -> String {
    let t = ctx.t;
    let path = route.path();
    let title = t.t(route.title_key());

    let mut body = render_media_list(
        ctx,
        &MediaListProps {
            name: title,
            list: &data.list,
            genres: &data.genres,
            view,
            path: &path,
            show_view_switch: true,
        },
    );
    let (prev, next) = route.neighbors();
    body.push_str("<nav class=\"list-neighbors\">");
    for (rel, neighbor) in [("prev", prev), ("next", next)] {
        if let Some(neighbor) = neighbor {
            let _ = write!(
                body,
                "<a rel=\"{rel}\" href=\"{}\">{}</a> ",
                neighbor.path(),
                Escaped(t.t(neighbor.title_key()))
            );
        }
    }
    body.push_str("</nav>");

    let page = Page {
        meta: PageMeta::new(ctx.site, title, title, &path),
        breadcrumbs: vec![
            home(ctx),
            section(ctx, route.media_type()),
            Breadcrumb::new(path.clone(), title),
        ],
        mini_title: Some(MiniTitle::new(title)),
        body,
    };
    render_layout(ctx, &page)
}

/// Photo gallery of one movie or show.
#[must_use]
pub fn photos_page(ctx: ViewContext<'_>, data: &PhotosData) -> String {
    let t = ctx.t;
    let path = format!("{}/{}/photos", route_prefix(data.media_type), data.id);
    let photos = t.t("photos");

    let page = Page {
        meta: PageMeta::new(
            ctx.site,
            &format!("{} - {photos}", data.title),
            &t.t_with("photos-description", &[("name", &data.title)]),
            &path,
        ),
        breadcrumbs: vec![
            home(ctx),
            section(ctx, data.media_type),
            Breadcrumb::new(path.clone(), photos),
        ],
        mini_title: Some(MiniTitle {
            title: data.title.clone(),
            subtitle: Some(String::from(photos)),
            image_url: data
                .poster_path
                .as_deref()
                .and_then(|p| poster_url(p, PosterSize::W92)),
        }),
        body: render_gallery(ctx, data),
    };
    render_layout(ctx, &page)
}

/// Not-found or upstream failure page.
#[must_use]
pub fn error_page(ctx: ViewContext<'_>, err: &AppError, path: &str) -> String {
    let t = ctx.t;
    let (title, description) = match err {
        AppError::NotFound => (t.t("not-found"), t.t("not-found-description")),
        AppError::Upstream(_) => (t.t("upstream-error"), t.t("upstream-error-description")),
    };
    let body = format!(
        "<section class=\"error\" data-status=\"{}\"><p>{}</p><p><a href=\"/\">{}</a></p></section>",
        err.status().as_u16(),
        Escaped(description),
        Escaped(t.t("home")),
    );
    let page = Page {
        meta: PageMeta::new(ctx.site, title, description, path),
        breadcrumbs: vec![home(ctx)],
        mini_title: Some(MiniTitle::new(title)),
        body,
    };
    render_layout(ctx, &page)
}
