//! HTTP error type shared by loaders and handlers.

use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::http::CacheControl;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] with a JSON body; page routes render the
/// HTML variant through `routes::PageContext`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown route, invalid id, or a title TMDB does not know.
    #[error("Not found")]
    NotFound,

    /// The TMDB call failed.
    #[error("Upstream error: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

/// Convenience type alias for loader and handler results.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Upstream(_) => "UPSTREAM_ERROR",
        }
    }

    /// Logs upstream failures. Not-found is routine and stays quiet.
    pub fn log(&self) {
        if let Self::Upstream(err) = self {
            tracing::error!(error = format!("{err:#}"), "TMDB request failed");
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let message = match &self {
            Self::NotFound => "Resource not found",
            Self::Upstream(_) => "The catalog service is unavailable",
        };
        let body = json!({
            "error": message,
            "code": self.code(),
        });
        (
            self.status(),
            [(CACHE_CONTROL, CacheControl::NoStore.as_str())],
            axum::Json(body),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_response() {
        // Arrange & Act
        let response = AppError::NotFound.into_response();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_upstream_response_hides_details() {
        // Arrange
        let err = AppError::from(anyhow::anyhow!("token=secret rejected"));

        // Act
        let response = err.into_response();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "UPSTREAM_ERROR");
        assert!(!json["error"].as_str().unwrap().contains("secret"));
    }
}
