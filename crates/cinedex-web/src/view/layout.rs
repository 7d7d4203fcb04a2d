//! Document shell shared by every page.

use std::fmt::Write as _;

use super::ViewContext;
use super::breadcrumb::{Breadcrumb, MiniTitle, render_breadcrumbs};
use super::html::Escaped;
use super::meta::PageMeta;
use crate::http::with_query_value;
use crate::i18n::LANGUAGE_PARAM;

/// A page ready to be wrapped in the layout.
#[derive(Debug, Clone)]
pub struct Page {
    /// Head metadata.
    pub meta: PageMeta,
    /// Trail shown above the content; may be empty.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Compact heading shown under the breadcrumbs.
    pub mini_title: Option<MiniTitle>,
    /// Pre-rendered, already escaped main content.
    pub body: String,
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0 auto;max-width:1280px;padding:0 1rem}\
header{display:flex;gap:1rem;align-items:center;justify-content:space-between;padding:1rem 0}\
.breadcrumbs ol,.pagination ul,.languages,.media-grid,.gallery-grid{list-style:none;display:flex;flex-wrap:wrap;gap:.5rem;padding:0}\
.media-grid>li{width:185px}.media-grid img{width:185px;height:auto}\
.gallery-grid figure{margin:0;width:185px}.gallery-grid img{width:185px;height:auto}\
.mini-title{display:flex;gap:1rem;align-items:center}";

/// Wraps `page` in the HTML document: head metadata, site navigation,
/// language links, breadcrumbs and mini title.
#[must_use]
pub fn render_layout(ctx: ViewContext<'_>, page: &Page) -> String {
    let t = ctx.t;
    let mut out = String::with_capacity(page.body.len() + 4096);
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         {meta}<style>{STYLE}</style>\n</head>\n<body>\n",
        lang = Escaped(t.lang()),
        meta = page.meta.render(),
    );
    let _ = write!(
        out,
        "<header><a class=\"brand\" href=\"/\">{site}</a><nav><a href=\"/movies/popular\">{movies}</a> \
         <a href=\"/tv-shows/popular\">{tv}</a> <a href=\"/search/movie\">{search}</a></nav>",
        site = Escaped(&ctx.site.name),
        movies = Escaped(t.t("movies")),
        tv = Escaped(t.t("tv-shows")),
        search = Escaped(t.t("search")),
    );
    out.push_str("<ul class=\"languages\">");
    for lang in ctx.languages {
        if lang == t.lang() {
            let _ = write!(out, "<li><strong>{}</strong></li>", Escaped(lang));
        } else {
            let href = with_query_value(ctx.path, ctx.query, LANGUAGE_PARAM, lang);
            let _ = write!(
                out,
                "<li><a href=\"{href}\" hreflang=\"{lang}\">{lang}</a></li>",
                href = Escaped(&href),
                lang = Escaped(lang),
            );
        }
    }
    out.push_str("</ul></header>\n<main>\n");
    out.push_str(&render_breadcrumbs(&page.breadcrumbs));
    if let Some(mini) = &page.mini_title {
        out.push_str(&mini.render());
    }
    out.push_str(&page.body);
    out.push_str("\n</main>\n</body>\n</html>\n");
    out
}
