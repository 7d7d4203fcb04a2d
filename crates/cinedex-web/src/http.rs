//! HTTP glue: request parameter parsing, cache headers and response
//! format negotiation.

use std::convert::Infallible;

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::header::{ACCEPT, CACHE_CONTROL, VARY};
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

/// Highest page number a listing route accepts.
pub const MAX_PAGE: u32 = 1000;

/// Headers the rendered output varies on.
const VARY_ON: &str = "Accept, Accept-Language, Cookie";

/// Query parameters shared by paginated routes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Raw `page` value; see [`parse_page`].
    pub page: Option<String>,
    /// Raw `view` value; see [`ListView::parse`].
    pub view: Option<String>,
}

impl PageQuery {
    /// Reads `page` and `view` from a raw query string. Repeated keys keep
    /// their first value.
    #[must_use]
    pub fn from_query(query: Option<&str>) -> Self {
        Self {
            page: query_value(query, "page"),
            view: query_value(query, "view"),
        }
    }
}

/// First value of `key` in a raw query string.
#[must_use]
pub fn query_value(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// `{path}?{query}` with `key` set to `value`. Other pairs keep their order;
/// earlier values of `key` are dropped.
#[must_use]
pub fn with_query_value(path: &str, query: &str, key: &str, value: &str) -> String {
    let mut out = url::form_urlencoded::Serializer::new(String::new());
    out.extend_pairs(url::form_urlencoded::parse(query.as_bytes()).filter(|(k, _)| k != key));
    out.append_pair(key, value);
    format!("{path}?{}", out.finish())
}

/// Parses the `page` query parameter.
///
/// Absent, empty, non-numeric and zero values leave the page unset; any
/// other value outside `1..=MAX_PAGE` becomes page 1.
///
/// Only plain integers count as numeric. Fractions (`2.5`) and exponent
/// forms are left unset, so `1e3` is not page 1000 as a float parse would
/// make it.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> Option<u32> {
    let value: i64 = raw?.trim().parse().ok()?;
    if value == 0 {
        return None;
    }
    if !(1..=i64::from(MAX_PAGE)).contains(&value) {
        return Some(1);
    }
    u32::try_from(value).ok()
}

/// Parses a numeric route id. Non-numeric and zero ids yield `None`.
#[must_use]
pub fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|id| *id != 0)
}

/// Percent-encodes a single path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    // `byte_serialize` writes spaces as `+` and escapes literal `+`.
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Builds `{path}?page={page}`, keeping a non-default list view.
#[must_use]
pub fn page_href(path: &str, page: u32, view: ListView) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &page.to_string());
    if view != ListView::default() {
        query.append_pair("view", view.as_str());
    }
    format!("{path}?{}", query.finish())
}

/// Media list presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListView {
    /// Poster grid.
    #[default]
    Grid,
    /// Compact table.
    Table,
}

impl ListView {
    /// Parses the `view` query parameter; unknown values select the grid.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("table") => Self::Table,
            _ => Self::Grid,
        }
    }

    /// Query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Table => "table",
        }
    }
}

/// `Cache-Control` policy per route category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheControl {
    /// Lists that change during the day.
    AiringToday,
    /// Other category lists.
    List,
    /// Keyword search results.
    Search,
    /// Per-title pages (photos).
    Detail,
    /// Error responses.
    NoStore,
}

impl CacheControl {
    /// Header value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AiringToday => "max-age=3600, s-maxage=3600, stale-while-revalidate=86400",
            Self::List => "max-age=3600, s-maxage=21600, stale-while-revalidate=86400",
            Self::Search => "max-age=300, s-maxage=3600, stale-while-revalidate=3600",
            Self::Detail => "max-age=86400, s-maxage=604800, stale-while-revalidate=604800",
            Self::NoStore => "no-store",
        }
    }
}

/// Representation requested by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Rendered page.
    #[default]
    Html,
    /// Raw loader data.
    Json,
}

impl ResponseFormat {
    /// Chooses JSON when the `Accept` header asks for it before HTML.
    #[must_use]
    pub fn from_accept(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return Self::Html;
        };
        let json = accept.find("application/json");
        let html = accept.find("text/html");
        match (json, html) {
            (Some(j), Some(h)) if j < h => Self::Json,
            (Some(_), None) => Self::Json,
            _ => Self::Html,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ResponseFormat {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts.headers.get(ACCEPT).and_then(|v| v.to_str().ok());
        Ok(Self::from_accept(accept))
    }
}

/// Sends `data` as JSON or as the page produced by `render`, with the
/// category's cache policy.
pub fn respond<T: Serialize>(
    format: ResponseFormat,
    cache: CacheControl,
    data: &T,
    render: impl FnOnce(&T) -> String,
) -> Response {
    let headers = [(CACHE_CONTROL, cache.as_str()), (VARY, VARY_ON)];
    match format {
        ResponseFormat::Json => (headers, Json(data)).into_response(),
        ResponseFormat::Html => (headers, Html(render(data))).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_unset_cases() {
        // Arrange & Act & Assert
        assert_eq!(parse_page(None), None);
        assert_eq!(parse_page(Some("")), None);
        assert_eq!(parse_page(Some("abc")), None);
        assert_eq!(parse_page(Some("0")), None);
    }

    #[test]
    fn test_parse_page_rejects_fraction_and_exponent() {
        // Arrange & Act & Assert
        assert_eq!(parse_page(Some("2.5")), None);
        assert_eq!(parse_page(Some("1e3")), None);
    }

    #[test]
    fn test_page_query_keeps_first_repeated_value() {
        // Arrange & Act
        let query = PageQuery::from_query(Some("page=2&page=3&view=table&view=grid"));

        // Assert
        assert_eq!(query.page.as_deref(), Some("2"));
        assert_eq!(query.view.as_deref(), Some("table"));
        assert_eq!(PageQuery::from_query(None), PageQuery::default());
    }

    #[test]
    fn test_query_value_decodes() {
        // Arrange & Act & Assert
        assert_eq!(
            query_value(Some("q=star+wars&lng=ja"), "q").as_deref(),
            Some("star wars")
        );
        assert_eq!(query_value(Some("q=a"), "lng"), None);
    }

    #[test]
    fn test_with_query_value_replaces_key() {
        // Arrange & Act & Assert
        assert_eq!(
            with_query_value("/tv-shows/popular", "lng=ja&page=2&view=table", "lng", "vi"),
            "/tv-shows/popular?page=2&view=table&lng=vi"
        );
        assert_eq!(with_query_value("/", "", "lng", "en"), "/?lng=en");
    }

    #[test]
    fn test_parse_page_in_range() {
        // Arrange & Act & Assert
        assert_eq!(parse_page(Some("1")), Some(1));
        assert_eq!(parse_page(Some(" 42 ")), Some(42));
        assert_eq!(parse_page(Some("1000")), Some(1000));
    }

    #[test]
    fn test_parse_page_out_of_range_resets_to_first() {
        // Arrange & Act & Assert
        assert_eq!(parse_page(Some("1001")), Some(1));
        assert_eq!(parse_page(Some("-3")), Some(1));
        assert_eq!(parse_page(Some("99999999999")), Some(1));
    }

    #[test]
    fn test_parse_id() {
        // Arrange & Act & Assert
        assert_eq!(parse_id("1399"), Some(1399));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-1"), None);
    }

    #[test]
    fn test_encode_segment() {
        // Arrange & Act & Assert
        assert_eq!(encode_segment("star wars"), "star%20wars");
        assert_eq!(encode_segment("a+b/c"), "a%2Bb%2Fc");
        assert_eq!(encode_segment("君の名は"), "%E5%90%9B%E3%81%AE%E5%90%8D%E3%81%AF");
    }

    #[test]
    fn test_page_href_keeps_table_view() {
        // Arrange & Act & Assert
        assert_eq!(
            page_href("/tv-shows/popular", 3, ListView::Grid),
            "/tv-shows/popular?page=3"
        );
        assert_eq!(
            page_href("/tv-shows/popular", 3, ListView::Table),
            "/tv-shows/popular?page=3&view=table"
        );
    }

    #[test]
    fn test_list_view_parse() {
        // Arrange & Act & Assert
        assert_eq!(ListView::parse(Some("TABLE")), ListView::Table);
        assert_eq!(ListView::parse(Some("mosaic")), ListView::Grid);
        assert_eq!(ListView::parse(None), ListView::Grid);
    }

    #[test]
    fn test_response_format_from_accept() {
        // Arrange & Act & Assert
        assert_eq!(ResponseFormat::from_accept(None), ResponseFormat::Html);
        assert_eq!(
            ResponseFormat::from_accept(Some("application/json")),
            ResponseFormat::Json
        );
        assert_eq!(
            ResponseFormat::from_accept(Some("text/html,application/json;q=0.9")),
            ResponseFormat::Html
        );
        assert_eq!(ResponseFormat::from_accept(Some("*/*")), ResponseFormat::Html);
    }
}
