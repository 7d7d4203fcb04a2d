#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use cinedex_api::tmdb::TmdbClient;
use cinedex_web::build_app_router;
use cinedex_web::config::AppConfig;
use cinedex_web::state::AppState;
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Reads a TMDB fixture from the workspace `fixtures/tmdb` directory.
pub fn fixture(name: &str) -> serde_json::Value {
    let file = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/tmdb")
        .join(name);
    let content = std::fs::read_to_string(&file).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Build the full application router against a mock TMDB server.
///
/// Uses the same `build_app_router` as `main.rs`, so the middleware stack
/// (request ID, timeout, tracing, panic recovery) is exercised too.
pub fn build_test_app(server: &MockServer) -> Router {
    let tmdb = TmdbClient::builder()
        .base_url(format!("{}/3/", server.uri()).parse().unwrap())
        .api_token("test-token")
        .user_agent("cinedex-test/0.0.0")
        .min_interval(Duration::ZERO)
        .retry_backoff(Duration::from_millis(1))
        .build()
        .unwrap();
    let state = AppState::new(tmdb, AppConfig::default()).unwrap();
    build_app_router(state)
}

/// Responds to `GET /3/{tmdb_path}` with a fixture body.
pub async fn mount_fixture(server: &MockServer, tmdb_path: &str, fixture_name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/3/{tmdb_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture(fixture_name)))
        .mount(server)
        .await;
}

/// Mounts both genre lists.
pub async fn mount_genres(server: &MockServer) {
    mount_fixture(server, "genre/movie/list", "genre_movie_list.json").await;
    mount_fixture(server, "genre/tv/list", "genre_tv_list.json").await;
}

/// Send a GET request with extra headers through the router.
pub async fn get_with(app: Router, uri: &str, headers: &[(&str, &str)]) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_with(app, uri, &[]).await
}

/// Collect the response body as a UTF-8 string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Cache-Control` header value, or an empty string.
pub fn cache_control(response: &Response<Body>) -> String {
    response
        .headers()
        .get("cache-control")
        .map(|v| v.to_str().unwrap().to_owned())
        .unwrap_or_default()
}
