//! `TmdbClient` - TMDB API client implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::rate_limiter::TmdbRateLimiter;
use super::types::{
    MediaType, MovieListCategory, SearchMovieParams, SearchTvParams, TmdbErrorResponse,
    TmdbGenre, TmdbGenreList, TmdbImages, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbSearchMovieResponse, TmdbSearchTvResponse, TmdbTvDetails, TmdbTvListResponse,
    TvListCategory,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Maximum number of retries for HTTP 429 responses.
const MAX_RETRIES: u32 = 3;

/// Backoff duration between retries.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Query pairs for a request.
type Query<'a> = [(&'a str, String)];

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Rate limiter.
    rate_limiter: Arc<Mutex<TmdbRateLimiter>>,
    /// Backoff unit for HTTP 429 retries.
    retry_backoff: Duration,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
    retry_backoff: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            min_interval: None,
            retry_backoff: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests, or a caching proxy).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Sets the backoff unit applied between HTTP 429 retries (default: 1s).
    #[must_use]
    pub const fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        if api_token.trim().is_empty() {
            bail!("api_token must not be empty");
        }
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };

        let rate_limiter = self
            .min_interval
            .map_or_else(TmdbRateLimiter::default_interval, TmdbRateLimiter::new);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
            retry_backoff: self.retry_backoff.unwrap_or(RETRY_BACKOFF),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with Bearer auth, query params, and rate limiting.
    /// Retries up to `MAX_RETRIES` times on HTTP 429.
    async fn send(&self, path: &str, query: &Query<'_>) -> Result<Response> {
        self.rate_limiter.lock().await.wait().await;

        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut retries = 0u32;
        loop {
            let request = self
                .http_client
                .get(url.clone())
                .bearer_auth(&self.api_token)
                .query(query)
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(url = %request.url(), "TMDB API request");

            let response = self
                .http_client
                .execute(request)
                .await
                .with_context(|| format!("request failed: {path}"))?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            retries = retries.saturating_add(1);
            if retries > MAX_RETRIES {
                bail!("TMDB API rate limit exceeded after {MAX_RETRIES} retries: {path}");
            }
            tracing::warn!(
                retry = retries,
                max_retries = MAX_RETRIES,
                "TMDB API rate limited (429). Retrying..."
            );
            tokio::time::sleep(self.retry_backoff.saturating_mul(retries)).await;
            self.rate_limiter.lock().await.wait().await;
        }
    }

    /// Fetches and decodes a JSON resource. Any non-success status is an error.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> Result<T> {
        let response = self.send(path, query).await?;
        decode(path, response).await
    }

    /// Like `get_json`, but maps HTTP 404 to `None`.
    #[instrument(skip_all, fields(path = path))]
    async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
    ) -> Result<Option<T>> {
        let response = self.send(path, query).await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(path, "TMDB resource not found");
            return Ok(None);
        }
        decode(path, response).await.map(Some)
    }
}

/// Turns a response into `T`, surfacing TMDB's error body on failure.
async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<failed to read body>"));
        if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
            bail!(
                "TMDB API error (HTTP {}): code={}, message={}",
                status,
                error_response.status_code,
                error_response.status_message,
            );
        }
        bail!("TMDB API error (HTTP {status}): {body}");
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read response body: {path}"))?;
    serde_json::from_str(&body).with_context(|| format!("failed to decode JSON response: {path}"))
}

/// Builds the `language` + optional `page` query shared by list endpoints.
fn paged_query(language: &str, page: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = vec![("language", String::from(language))];
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
    query
}

/// Primary subtag of a locale (`ja-JP` -> `ja`).
fn primary_language(language: &str) -> &str {
    language.split(['-', '_']).next().unwrap_or(language)
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbSearchMovieResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }
        if let Some(year) = params.year {
            query.push(("year", year.to_string()));
        }

        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TmdbSearchTvResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }

        self.get_json("search/tv", &query).await
    }

    #[instrument(skip_all, fields(category = category.as_path()))]
    async fn movie_list(
        &self,
        category: MovieListCategory,
        language: &str,
        page: Option<u32>,
    ) -> Result<TmdbMovieListResponse> {
        let path = format!("movie/{}", category.as_path());
        self.get_json(&path, &paged_query(language, page)).await
    }

    #[instrument(skip_all, fields(category = category.as_path()))]
    async fn tv_list(
        &self,
        category: TvListCategory,
        language: &str,
        page: Option<u32>,
    ) -> Result<TmdbTvListResponse> {
        let path = format!("tv/{}", category.as_path());
        self.get_json(&path, &paged_query(language, page)).await
    }

    #[instrument(skip_all)]
    async fn movie_details(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<Option<TmdbMovieDetails>> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(language))];
        self.get_optional_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn tv_details(&self, series_id: u64, language: &str) -> Result<Option<TmdbTvDetails>> {
        let path = format!("tv/{series_id}");
        let query = [("language", String::from(language))];
        self.get_optional_json(&path, &query).await
    }

    #[instrument(skip_all, fields(media_type = media_type.as_path()))]
    async fn images(
        &self,
        media_type: MediaType,
        id: u64,
        language: &str,
    ) -> Result<Option<TmdbImages>> {
        let path = format!("{}/{id}/images", media_type.as_path());
        let query = [(
            "include_image_language",
            format!("{},en,null", primary_language(language)),
        )];
        self.get_optional_json(&path, &query).await
    }

    #[instrument(skip_all, fields(media_type = media_type.as_path()))]
    async fn genres(&self, media_type: MediaType, language: &str) -> Result<Vec<TmdbGenre>> {
        let path = format!("genre/{}/list", media_type.as_path());
        let query = [("language", String::from(language))];
        let list: TmdbGenreList = self.get_json(&path, &query).await?;
        Ok(list.genres)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::tmdb::TmdbPage;

    /// Client pointed at a mock server, with pacing and backoff disabled.
    fn mock_client(server: &MockServer, token: &str) -> TmdbClient {
        let base_url = format!("{}/3/", server.uri());
        TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token(token)
            .user_agent("test/0.0.0")
            .min_interval(Duration::ZERO)
            .retry_backoff(Duration::from_millis(1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_api_token() {
        // Arrange & Act
        let result = TmdbClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_token is required")
        );
    }

    #[test]
    fn test_builder_rejects_blank_api_token() {
        // Arrange & Act
        let result = TmdbClient::builder()
            .api_token("  ")
            .user_agent("test/0.0.0")
            .build();

        // Assert
        assert!(result.unwrap_err().to_string().contains("must not be empty"));
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = TmdbClient::builder().api_token("test-token").build();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let client = TmdbClient::builder()
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(client.retry_backoff, RETRY_BACKOFF);
    }

    #[test]
    fn test_primary_language() {
        // Arrange & Act & Assert
        assert_eq!(primary_language("ja-JP"), "ja");
        assert_eq!(primary_language("vi"), "vi");
        assert_eq!(primary_language("pt_BR"), "pt");
    }

    #[test]
    fn test_parse_search_movie_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/search_movie_dune.json");

        // Act
        let response: TmdbSearchMovieResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.page, 1);
        assert_eq!(response.total_pages, 2);
        assert_eq!(response.results[0].id, 438_631);
        assert_eq!(response.results[0].title, "Dune");
    }

    #[test]
    fn test_parse_tv_images_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_images_1399.json");

        // Act
        let images: TmdbImages = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(images.id, 1399);
        assert_eq!(images.backdrops.len(), 2);
        assert_eq!(images.logos.len(), 1);
        assert_eq!(images.posters.len(), 1);
        assert_eq!(images.backdrops[0].width, 1920);
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange
        let json = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let error: TmdbErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 7);
        assert!(error.status_message.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_search_movie_sends_page_only_when_set() {
        // Arrange
        let server = MockServer::start().await;
        let body = include_str!("../../../../fixtures/tmdb/search_movie_dune.json");
        Mock::given(method("GET"))
            .and(path("/3/search/movie"))
            .and(query_param("query", "dune"))
            .and(query_param("page", "2"))
            .and(query_param("language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");
        let params = SearchMovieParams::new("dune").language("en").page(Some(2));

        // Act
        let response = client.search_movie(&params).await.unwrap();

        // Assert
        assert_eq!(response.results[0].title, "Dune");
    }

    #[tokio::test]
    async fn test_search_movie_sends_year_filter() {
        // Arrange
        let server = MockServer::start().await;
        let body = include_str!("../../../../fixtures/tmdb/search_movie_dune.json");
        Mock::given(method("GET"))
            .and(path("/3/search/movie"))
            .and(query_param("query", "dune"))
            .and(query_param("year", "2021"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");
        let params = SearchMovieParams::new("dune").year(2021);

        // Act
        let response = client.search_movie(&params).await.unwrap();

        // Assert
        assert_eq!(response.total_results, 24);
    }

    #[tokio::test]
    async fn test_search_tv_via_http() {
        // Arrange
        let server = MockServer::start().await;
        let body = include_str!("../../../../fixtures/tmdb/search_tv_empty.json");
        Mock::given(method("GET"))
            .and(path("/3/search/tv"))
            .and(query_param("query", "nothing"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");

        // Act
        let response = client
            .search_tv(&SearchTvParams::new("nothing"))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.total_results, 0);
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_tv_list_uses_category_path() {
        // Arrange
        let server = MockServer::start().await;
        let body = include_str!("../../../../fixtures/tmdb/tv_airing_today.json");
        Mock::given(method("GET"))
            .and(path("/3/tv/airing_today"))
            .and(query_param("language", "ja"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");

        // Act
        let response: TmdbPage<_> = client
            .tv_list(TvListCategory::AiringToday, "ja", None)
            .await
            .unwrap();

        // Assert
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].name, "Frieren: Beyond Journey's End");
    }

    #[tokio::test]
    async fn test_movie_list_uses_category_path() {
        // Arrange
        let server = MockServer::start().await;
        let body = include_str!("../../../../fixtures/tmdb/search_movie_dune.json");
        Mock::given(method("GET"))
            .and(path("/3/movie/now_playing"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");

        // Act
        let response = client
            .movie_list(MovieListCategory::NowPlaying, "en", Some(3))
            .await
            .unwrap();

        // Assert
        assert!(!response.results.is_empty());
    }

    #[tokio::test]
    async fn test_images_requests_language_fallbacks() {
        // Arrange
        let server = MockServer::start().await;
        let body = include_str!("../../../../fixtures/tmdb/tv_images_1399.json");
        Mock::given(method("GET"))
            .and(path("/3/tv/1399/images"))
            .and(query_param("include_image_language", "vi,en,null"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");

        // Act
        let images = client.images(MediaType::Tv, 1399, "vi-VN").await.unwrap();

        // Assert
        assert_eq!(images.unwrap().id, 1399);
    }

    #[tokio::test]
    async fn test_images_not_found_returns_none() {
        // Arrange
        let server = MockServer::start().await;
        let error_body = r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#;
        Mock::given(method("GET"))
            .and(path("/3/movie/999999999/images"))
            .respond_with(ResponseTemplate::new(404).set_body_string(error_body))
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");

        // Act
        let images = client
            .images(MediaType::Movie, 999_999_999, "en")
            .await
            .unwrap();

        // Assert
        assert!(images.is_none());
    }

    #[tokio::test]
    async fn test_tv_details_via_http() {
        // Arrange
        let server = MockServer::start().await;
        let body = include_str!("../../../../fixtures/tmdb/tv_details_1399.json");
        Mock::given(method("GET"))
            .and(path("/3/tv/1399"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");

        // Act
        let details = client.tv_details(1399, "en").await.unwrap().unwrap();

        // Assert
        assert_eq!(details.name, "Game of Thrones");
        assert_eq!(details.poster_path.as_deref(), Some("/got-poster.jpg"));
    }

    #[tokio::test]
    async fn test_genres_unwraps_list() {
        // Arrange
        let server = MockServer::start().await;
        let body = include_str!("../../../../fixtures/tmdb/genre_tv_list.json");
        Mock::given(method("GET"))
            .and(path("/3/genre/tv/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");

        // Act
        let genres = client.genres(MediaType::Tv, "en").await.unwrap();

        // Assert
        assert!(genres.contains(&TmdbGenre {
            id: 16,
            name: String::from("Animation"),
        }));
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        // Arrange
        let server = MockServer::start().await;
        let body = include_str!("../../../../fixtures/tmdb/search_tv_empty.json");
        Mock::given(method("GET"))
            .and(header("Authorization", "Bearer my-secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        let client = mock_client(&server, "my-secret-token");

        // Act & Assert (mock expect(1) verifies Authorization header)
        client.search_tv(&SearchTvParams::new("x")).await.unwrap();
    }

    #[tokio::test]
    async fn test_http_error_returns_tmdb_error() {
        // Arrange
        let server = MockServer::start().await;
        let error_body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string(error_body))
            .mount(&server)
            .await;
        let client = mock_client(&server, "invalid-token");

        // Act
        let result = client.search_movie(&SearchMovieParams::new("x")).await;

        // Assert
        let err = result.unwrap_err().to_string();
        assert!(err.contains("TMDB API error"));
        assert!(err.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_details_server_error_is_not_none() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");

        // Act
        let result = client.tv_details(1, "en").await;

        // Assert
        assert!(result.unwrap_err().to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_http_429_retries() {
        // Arrange
        let server = MockServer::start().await;
        let error_body = r#"{"status_code":25,"status_message":"Your request count is over the allowed limit.","success":false}"#;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string(error_body))
            .expect(u64::from(MAX_RETRIES) + 1)
            .mount(&server)
            .await;
        let client = mock_client(&server, "test-token");

        // Act
        let result = client.search_tv(&SearchTvParams::new("x")).await;

        // Assert
        assert!(result.unwrap_err().to_string().contains("rate limit"));
    }
}
