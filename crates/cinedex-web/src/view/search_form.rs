//! Keyword search form.

use std::fmt::Write as _;

use cinedex_api::tmdb::MediaType;

use super::ViewContext;
use super::html::Escaped;

/// Query parameter the form submits the keyword in.
pub const KEYWORD_PARAM: &str = "q";

/// Path of the search form for `media_type`.
#[must_use]
pub const fn search_path(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "/search/movie",
        MediaType::Tv => "/search/tv",
    }
}

/// Renders tabs for movie and TV search and a `GET` form. The form route
/// redirects to `/search/{movie|tv}/{keyword}`.
#[must_use]
pub fn render_search_form(
    ctx: ViewContext<'_>,
    media_type: MediaType,
    keyword: Option<&str>,
) -> String {
    let t = ctx.t;
    let mut out = String::from("<nav class=\"search-tabs\">");
    for (tab, key) in [(MediaType::Movie, "search-movies"), (MediaType::Tv, "search-tv")] {
        if tab == media_type {
            let _ = write!(out, "<strong>{}</strong> ", Escaped(t.t(key)));
        } else {
            let _ = write!(
                out,
                "<a href=\"{}\">{}</a> ",
                search_path(tab),
                Escaped(t.t(key))
            );
        }
    }
    let _ = write!(
        out,
        "</nav><form class=\"search-form\" method=\"get\" action=\"{action}\" role=\"search\">\
         <input type=\"search\" name=\"{KEYWORD_PARAM}\" value=\"{value}\" required \
         aria-describedby=\"search-helper\">\
         <small id=\"search-helper\">{helper}</small>\
         <button type=\"submit\">{submit}</button></form>",
        action = search_path(media_type),
        value = Escaped(keyword.unwrap_or_default()),
        helper = Escaped(t.t("search-helper")),
        submit = Escaped(t.t("search")),
    );
    out
}
