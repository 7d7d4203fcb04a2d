//! Server-rendered movie and TV browsing front-end backed by TMDB.
//!
//! The binary (`main.rs`) and the integration tests both build the
//! router through [`build_app_router`], so they share one middleware stack.

pub mod config;
pub mod error;
pub mod http;
pub mod i18n;
pub mod loaders;
pub mod routes;
pub mod state;
pub mod view;

use std::time::Duration;

use axum::Router;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the full application [`Router`] with all middleware layers.
pub fn build_app_router(state: AppState) -> Router {
    let timeout = state.config.server.request_timeout();
    with_middleware(routes::router(), timeout).with_state(state)
}

/// Wraps `router` in the middleware stack, applied bottom-up:
///
/// 1. Set request ID on incoming requests
/// 2. Structured request/response tracing
/// 3. Propagate request ID to response
/// 4. `Cache-Control: no-store` on responses that carry none
/// 5. Request timeout
/// 6. Panic recovery
fn with_middleware<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use axum::body::Body;
    use axum::http::Request;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "done"
    }

    async fn boom() -> &'static str {
        panic!("handler failed")
    }

    async fn cached() -> impl IntoResponse {
        ([(CACHE_CONTROL, "max-age=60")], "ok")
    }

    fn app() -> Router {
        let router = Router::new()
            .route("/slow", get(slow))
            .route("/boom", get(boom))
            .route("/cached", get(cached));
        with_middleware(router, Duration::from_millis(50))
    }

    async fn send(uri: &str) -> axum::response::Response {
        app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_timeout_response_is_not_cached() {
        // Arrange & Act
        let response = send("/slow").await;

        // Assert
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_panic_response_is_not_cached() {
        // Arrange & Act
        let response = send("/boom").await;

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    }

    #[tokio::test]
    async fn test_handler_cache_header_is_kept() {
        // Arrange & Act
        let response = send("/cached").await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], "max-age=60");
    }
}
