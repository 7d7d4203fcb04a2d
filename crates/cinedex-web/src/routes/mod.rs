//! Route handlers.
//!
//! Each handler extracts a [`PageContext`], runs a loader and hands the
//! result back to the context, which picks JSON or HTML and sets the
//! cache policy.

pub mod health;
mod lists;
mod photos;
mod search;

use std::convert::Infallible;

use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::HeaderValue;
use axum::http::header::{CACHE_CONTROL, SET_COOKIE};
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use cinedex_api::tmdb::MovieListCategory;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::http::{CacheControl, ResponseFormat, respond};
use crate::i18n::{Locale, requested_language};
use crate::loaders::ListRoute;
use crate::state::AppState;
use crate::view::ViewContext;
use crate::view::pages::error_page;

/// Per-request inputs every page handler needs.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Shared application state.
    pub state: AppState,
    /// Negotiated response language.
    pub locale: Locale,
    /// JSON or HTML.
    pub format: ResponseFormat,
    /// Request path, used for canonical URLs and the language links.
    pub path: String,
    /// Raw query string, if any.
    pub query: Option<String>,
    /// Set when `lng` picked the language; the response then stores it in
    /// a cookie.
    pub remember_language: bool,
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_request_parts(parts, state).await?;
        let format = ResponseFormat::from_request_parts(parts, state).await?;
        let query = parts.uri.query().map(String::from);
        let remember_language =
            requested_language(query.as_deref(), &state.config.i18n.supported).is_some();
        Ok(Self {
            state: state.clone(),
            locale,
            format,
            path: String::from(parts.uri.path()),
            query,
            remember_language,
        })
    }
}

impl PageContext {
    /// View inputs for the negotiated locale.
    #[must_use]
    pub fn view(&self) -> ViewContext<'_> {
        ViewContext {
            t: self.state.translator(&self.locale),
            site: &self.state.config.site,
            languages: &self.state.config.i18n.supported,
            path: &self.path,
            query: self.query.as_deref().unwrap_or_default(),
        }
    }

    /// Stores an explicitly picked language in the `lng` cookie.
    fn with_language_cookie(&self, mut response: Response) -> Response {
        if !self.remember_language {
            return response;
        }
        if let Ok(cookie) = HeaderValue::from_str(&self.locale.cookie()) {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
        response
    }

    /// Responds with the loader result, or with the matching error page.
    pub fn finish<T: Serialize>(
        &self,
        result: AppResult<T>,
        cache: CacheControl,
        render: impl FnOnce(ViewContext<'_>, &T) -> String,
    ) -> Response {
        let response = match result {
            Ok(data) => respond(self.format, cache, &data, |d| render(self.view(), d)),
            Err(err) => self.fail(err),
        };
        self.with_language_cookie(response)
    }

    /// Error response in the requested format, never cached.
    #[must_use]
    pub fn fail(&self, err: AppError) -> Response {
        match self.format {
            ResponseFormat::Json => err.into_response(),
            ResponseFormat::Html => {
                err.log();
                (
                    err.status(),
                    [(CACHE_CONTROL, CacheControl::NoStore.as_str())],
                    Html(error_page(self.view(), &err, &self.path)),
                )
                    .into_response()
            }
        }
    }
}

/// GET / -- redirects to the popular movies list.
async fn home() -> Redirect {
    Redirect::to(&ListRoute::Movie(MovieListCategory::Popular).path())
}

/// Fallback for unknown paths.
async fn not_found(ctx: PageContext) -> Response {
    ctx.fail(AppError::NotFound)
}

/// All page routes, the home redirect, the health check and the 404 fallback.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .merge(health::router())
        .merge(search::router())
        .merge(lists::router())
        .merge(photos::router())
        .fallback(not_found)
}
