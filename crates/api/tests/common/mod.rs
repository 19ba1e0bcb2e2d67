use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use pixwall_api::config::ServerConfig;
use pixwall_api::router::build_app_router;
use pixwall_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and an isolated data
/// directory for favorites records.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.to_path_buf(),
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(data_dir: &Path) -> Router {
    let config = test_config(data_dir);
    let state = AppState::new(config.clone());
    build_app_router(state, &config)
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Issue a POST request with no body (the favorite toggle takes none).
pub async fn post_empty(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body must be JSON")
}

/// Configure the app's media root and project via the real endpoint.
pub async fn set_image_root(app: &Router, root: &Path, project: &str) {
    let response = post_json(
        app.clone(),
        "/set-image-root",
        serde_json::json!({ "path": root.to_str().expect("utf-8 path"), "projectName": project }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "set-image-root must succeed");
}

/// Create `count` sequentially named PNG files under `dir`.
pub async fn seed_images(dir: &Path, count: usize) {
    for i in 1..=count {
        tokio::fs::write(dir.join(format!("img{i}.png")), b"png-bytes")
            .await
            .expect("write");
    }
}
