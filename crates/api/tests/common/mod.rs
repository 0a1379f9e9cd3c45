#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use mapnotes_api::config::ServerConfig;
use mapnotes_api::router::build_app_router;
use mapnotes_api::state::AppState;

/// Build a test `ServerConfig` whose data lives under `data_dir`.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(data_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.path().to_path_buf(),
        max_upload_bytes: 1024 * 1024,
    }
}

/// Build the full application router on a fresh data directory.
///
/// Uses the same [`build_app_router`] as `main.rs`, so integration tests
/// exercise the production middleware stack. The router is cheap to clone;
/// clones share the same directory.
pub async fn build_test_app(data_dir: &TempDir) -> Router {
    let config = test_config(data_dir);
    let store = mapnotes_db::open_store(config.maps_dir()).await.unwrap();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    bytes.to_vec()
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, json: Value) -> Response {
    send_raw(app, Method::POST, uri, "application/json", json.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, json: Value) -> Response {
    send_raw(app, Method::PUT, uri, "application/json", json.to_string()).await
}

/// Send an arbitrary body with an explicit content type.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(body.into())
        .unwrap();
    send(app, request).await
}

/// Create a map and return its JSON representation.
pub async fn create_map(app: &Router, name: &str, image_path: &str) -> Value {
    let response = post_json(
        app.clone(),
        "/api/maps",
        serde_json::json!({"name": name, "image_path": image_path}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Create an annotation on `map_id` and return its JSON representation.
pub async fn create_annotation(app: &Router, map_id: &str, body: Value) -> Value {
    let response = post_json(
        app.clone(),
        &format!("/api/maps/{map_id}/annotations"),
        body,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
