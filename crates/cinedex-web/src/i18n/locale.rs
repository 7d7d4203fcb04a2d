//! Request locale negotiation.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::request::Parts;
use serde::Serialize;

use crate::http::query_value;
use crate::state::AppState;

/// Query parameter and cookie name carrying an explicit language choice.
pub const LANGUAGE_PARAM: &str = "lng";

/// The language a request is rendered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Wraps an already negotiated language tag.
    pub fn new(lang: impl Into<String>) -> Self {
        Self(lang.into())
    }

    /// The language tag, e.g. `en`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value that keeps this language for later requests.
    #[must_use]
    pub fn cookie(&self) -> String {
        format!(
            "{LANGUAGE_PARAM}={}; Path=/; Max-Age=31536000; SameSite=Lax",
            self.0
        )
    }
}

impl FromRequestParts<AppState> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let from_query = query_value(parts.uri.query(), LANGUAGE_PARAM);
        let from_cookie = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|cookies| cookie_value(cookies, LANGUAGE_PARAM))
            .map(String::from);
        let accept_language = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        let i18n = &state.config.i18n;
        Ok(negotiate(
            from_query.as_deref(),
            from_cookie.as_deref(),
            accept_language,
            &i18n.supported,
            &i18n.fallback,
        ))
    }
}

/// Picks the response language.
///
/// Order: explicit query value, cookie, `Accept-Language` by descending
/// quality, then `fallback`. Candidates match a supported language exactly
/// (case-insensitive) or by primary subtag (`ja-JP` matches `ja`).
#[must_use]
pub fn negotiate(
    query: Option<&str>,
    cookie: Option<&str>,
    accept_language: Option<&str>,
    supported: &[String],
    fallback: &str,
) -> Locale {
    query
        .and_then(|tag| match_supported(tag, supported))
        .or_else(|| cookie.and_then(|tag| match_supported(tag, supported)))
        .or_else(|| {
            accept_language.and_then(|header| {
                parse_accept_language(header)
                    .into_iter()
                    .find_map(|tag| match_supported(tag, supported))
            })
        })
        .map_or_else(|| Locale::new(fallback), Locale::new)
}

/// Supported language explicitly picked through the `lng` query parameter.
#[must_use]
pub fn requested_language<'a>(query: Option<&str>, supported: &'a [String]) -> Option<&'a str> {
    let raw = query_value(query, LANGUAGE_PARAM)?;
    match_supported(&raw, supported)
}

/// Maps a language tag onto a supported language.
fn match_supported<'a>(tag: &str, supported: &'a [String]) -> Option<&'a str> {
    let tag = tag.trim();
    if tag.is_empty() || tag == "*" {
        return None;
    }
    let primary = tag.split(['-', '_']).next().unwrap_or(tag);
    supported
        .iter()
        .find(|lang| lang.eq_ignore_ascii_case(tag))
        .or_else(|| {
            supported
                .iter()
                .find(|lang| lang.eq_ignore_ascii_case(primary))
        })
        .map(String::as_str)
}

/// Splits an `Accept-Language` header into tags ordered by quality.
/// Entries with `q=0` or an unparsable quality are dropped.
fn parse_accept_language(header: &str) -> Vec<&str> {
    let mut weighted: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let quality = parts
                .find_map(|param| param.trim().strip_prefix("q="))
                .map_or(Some(1.0), |q| q.trim().parse::<f32>().ok())?;
            (quality > 0.0).then_some((tag, quality))
        })
        .collect();
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

/// Extracts one cookie's value from a `Cookie` header.
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"'))
    })
}
