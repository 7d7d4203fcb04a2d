//! Media list rendered as a poster grid or a table.

use std::collections::HashMap;
use std::fmt::Write as _;

use cinedex_api::tmdb::TmdbGenre;
use cinedex_api::tmdb::image::{PosterSize, poster_url};

use super::ViewContext;
use super::html::Escaped;
use super::pagination::render_pagination;
use crate::http::{ListView, page_href};
use crate::loaders::{MediaItem, MediaListPage};

/// What to render and where its links point.
#[derive(Debug, Clone, Copy)]
pub struct MediaListProps<'a> {
    /// Heading above the list.
    pub name: &'a str,
    /// Results page to show.
    pub list: &'a MediaListPage,
    /// Genre names for the item captions.
    pub genres: &'a [TmdbGenre],
    /// Grid or table layout.
    pub view: ListView,
    /// Route path used for pagination and view links.
    pub path: &'a str,
    /// Offer the grid/table switch.
    pub show_view_switch: bool,
}

/// Renders the list with its pagination, or the empty-results message.
#[must_use]
pub fn render_media_list(ctx: ViewContext<'_>, props: &MediaListProps<'_>) -> String {
    let t = ctx.t;
    let genre_names: HashMap<u32, &str> = props
        .genres
        .iter()
        .map(|g| (g.id, g.name.as_str()))
        .collect();

    let mut out = String::from("<section class=\"media-list\">");
    let _ = write!(out, "<h2>{}</h2>", Escaped(props.name));

    if props.show_view_switch {
        let page = props.list.page.max(1);
        out.push_str("<p class=\"view-switch\">");
        for (view, key) in [(ListView::Grid, "grid-view"), (ListView::Table, "table-view")] {
            if view == props.view {
                let _ = write!(out, "<strong>{}</strong> ", Escaped(t.t(key)));
            } else {
                let _ = write!(
                    out,
                    "<a href=\"{}\">{}</a> ",
                    Escaped(&page_href(props.path, page, view)),
                    Escaped(t.t(key))
                );
            }
        }
        out.push_str("</p>");
    }

    if props.list.items.is_empty() {
        let _ = write!(out, "<p class=\"empty\">{}</p>", Escaped(t.t("no-results")));
    } else {
        match props.view {
            ListView::Grid => render_grid(&mut out, &props.list.items, &genre_names),
            ListView::Table => render_table(ctx, &mut out, &props.list.items, &genre_names),
        }
    }

    out.push_str(&render_pagination(
        t,
        props.path,
        props.list.page,
        props.list.total_pages,
        props.view,
    ));
    out.push_str("</section>");
    out
}

fn genre_line(item: &MediaItem, names: &HashMap<u32, &str>) -> String {
    item.genre_ids
        .iter()
        .filter_map(|id| names.get(id).copied())
        .collect::<Vec<_>>()
        .join(", ")
}

fn year_text(item: &MediaItem) -> String {
    item.year().map(|y| y.to_string()).unwrap_or_default()
}

fn render_grid(out: &mut String, items: &[MediaItem], genres: &HashMap<u32, &str>) {
    out.push_str("<ul class=\"media-grid\">");
    for item in items {
        let href = item.photos_path();
        let title = Escaped(&item.title);
        out.push_str("<li class=\"media-card\">");
        let poster = item
            .poster_path
            .as_deref()
            .and_then(|p| poster_url(p, PosterSize::W185));
        match poster {
            Some(src) => {
                let _ = write!(
                    out,
                    "<a href=\"{href}\"><img src=\"{}\" alt=\"{title}\" loading=\"lazy\"></a>",
                    Escaped(&src)
                );
            }
            None => {
                let _ = write!(out, "<a href=\"{href}\" class=\"no-poster\"></a>");
            }
        }
        let _ = write!(
            out,
            "<h3><a href=\"{href}\">{title}</a></h3><p class=\"info\">{} \u{2605} {:.1}</p>",
            year_text(item),
            item.vote_average
        );
        let line = genre_line(item, genres);
        if !line.is_empty() {
            let _ = write!(out, "<p class=\"genres\">{}</p>", Escaped(&line));
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

fn render_table(
    ctx: ViewContext<'_>,
    out: &mut String,
    items: &[MediaItem],
    genres: &HashMap<u32, &str>,
) {
    let t = ctx.t;
    let _ = write!(
        out,
        "<table class=\"media-table\"><thead><tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr></thead><tbody>",
        Escaped(t.t("title")),
        Escaped(t.t("release-date")),
        Escaped(t.t("rating")),
        Escaped(t.t("genres")),
    );
    for item in items {
        let _ = write!(
            out,
            "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{:.1}</td><td>{}</td></tr>",
            item.photos_path(),
            Escaped(&item.title),
            Escaped(item.release_date.as_deref().unwrap_or_default()),
            item.vote_average,
            Escaped(&genre_line(item, genres)),
        );
    }
    out.push_str("</tbody></table>");
}
