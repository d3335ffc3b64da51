//! Integration tests for the asset server
//!
//! These tests verify:
//! - Health check endpoint works
//! - Files under the root are served with CORS and no-cache headers
//! - Pattern files are served as plain text
//! - Configured CORS origins are honoured

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use modelsync_server::{
    config::{Config, CorsConfig},
    router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

/// Test helper: a root with one model and one marker pattern
fn create_test_root() -> TempDir {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("models/taj_mahal")).unwrap();
    std::fs::write(root.path().join("models/taj_mahal/scene.glb"), b"glTF-bytes").unwrap();
    std::fs::write(root.path().join("hiro.patt"), b"255 255 255\n").unwrap();
    root
}

fn config_for(root: &TempDir) -> Config {
    let mut config = Config::default();
    config.server.root = root.path().to_path_buf();
    config
}

async fn get(config: &Config, uri: &str, origin: Option<&str>) -> Response {
    let mut request = Request::builder().method(Method::GET).uri(uri);
    if let Some(origin) = origin {
        request = request.header(header::ORIGIN, origin);
    }
    router(config)
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn header_value<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn test_health_check() {
    let root = create_test_root();
    let response = get(&config_for(&root), "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_serves_model_with_headers() {
    let root = create_test_root();
    let response = get(
        &config_for(&root),
        "/models/taj_mahal/scene.glb",
        Some("http://localhost:3000"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*")
    );
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("GET")
    );
    assert_eq!(
        header_value(&response, header::CACHE_CONTROL),
        Some("no-store, no-cache, must-revalidate")
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"glTF-bytes");
}

#[tokio::test]
async fn test_pattern_files_are_plain_text() {
    let root = create_test_root();
    let response = get(&config_for(&root), "/hiro.patt", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), Some("text/plain"));
}

#[tokio::test]
async fn test_missing_file_still_carries_headers() {
    let root = create_test_root();
    let response = get(&config_for(&root), "/models/nope/scene.glb", Some("http://x.test")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*")
    );
    assert_eq!(
        header_value(&response, header::CACHE_CONTROL),
        Some("no-store, no-cache, must-revalidate")
    );
}

#[tokio::test]
async fn test_configured_origins() {
    let root = create_test_root();
    let mut config = config_for(&root);
    config.cors = CorsConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
    };

    let allowed = get(&config, "/health", Some("http://localhost:3000")).await;
    assert_eq!(
        header_value(&allowed, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("http://localhost:3000")
    );

    let other = get(&config, "/health", Some("https://elsewhere.test")).await;
    assert!(other.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
