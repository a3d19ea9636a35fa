//! Shared helpers for API integration tests.
//!
//! Builds the production router over temp-dir image storage and the
//! simulated pose strategies, and provides `oneshot`-based request helpers.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use posewarp_api::config::ServerConfig;
use posewarp_api::router::build_app_router;
use posewarp_api::state::AppState;
use posewarp_storage::{FsImageStorage, SeededTemplateCatalog};
use posewarp_vision::{SimulatedEstimator, SimulatedWarper};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(storage_path: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        image_storage_path: storage_path.to_string(),
    }
}

/// Build the full application router over a fresh temp directory.
///
/// Mirrors the wiring in `main.rs` so tests exercise the same middleware
/// stack production uses. The returned `TempDir` must be kept alive for
/// the duration of the test.
pub async fn build_test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(&dir.path().to_string_lossy());

    let images = FsImageStorage::open(dir.path())
        .await
        .expect("storage init");

    let state = AppState::new(
        config.clone(),
        Arc::new(images),
        Arc::new(SeededTemplateCatalog::new()),
        Arc::new(SimulatedEstimator),
        Arc::new(SimulatedWarper),
    );

    (build_app_router(state, &config), dir)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request");
    app.oneshot(request).await.expect("response")
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

pub async fn put_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

pub async fn delete(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .body(Body::empty())
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Upload helpers
// ---------------------------------------------------------------------------

/// Encode a small solid PNG for upload tests.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::new(width, height);
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("png encode");
    out.into_inner()
}

/// POST a multipart upload with an `image` field and return the response.
pub async fn upload_png(app: Router, bytes: &[u8]) -> Response<Body> {
    const BOUNDARY: &str = "test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"image\"; filename=\"photo.png\"\r\n\
             Content-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/images/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// Upload a PNG and return the generated image id.
pub async fn upload_image_id(app: &Router) -> String {
    let response = upload_png(app.clone(), &png_bytes(8, 6)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["imageId"]
        .as_str()
        .expect("imageId in upload response")
        .to_string()
}

// ---------------------------------------------------------------------------
// Polling
// ---------------------------------------------------------------------------

/// Poll a job resource until its status leaves `processing`; returns the
/// final `data` payload.
pub async fn poll_until_terminal(app: &Router, path: &str) -> serde_json::Value {
    for _ in 0..200 {
        let response = get(app.clone(), path).await;
        assert_eq!(response.status(), StatusCode::OK, "polling {path}");
        let json = body_json(response).await;
        if json["data"]["status"] != "processing" {
            return json["data"].clone();
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job at {path} did not reach a terminal state in time");
}
