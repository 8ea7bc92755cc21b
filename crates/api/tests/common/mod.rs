#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use roster_core::roster::RosterKind;
use roster_core::storage::ImageStore;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use roster_api::config::ServerConfig;
use roster_api::router::build_app_router;
use roster_api::state::AppState;

pub const APP_URL: &str = "http://localhost:3000";

const BOUNDARY: &str = "roster-test-boundary";

/// Smallest byte strings the upload sniffer accepts as PNG / JPEG.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01";
pub const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0\x01\x01";

/// Build a test `ServerConfig` with safe defaults, storing photos under
/// `storage_root`.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_url: APP_URL.to_string(),
        storage_root: storage_root.to_path_buf(),
        max_body_bytes: 10 * 1024 * 1024,
    }
}

/// A router plus the temporary storage tree it writes to.
///
/// The directory is removed when the value is dropped.
pub struct TestApp {
    pub pool: PgPool,
    pub storage: TempDir,
}

impl TestApp {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            storage: tempfile::tempdir().unwrap(),
        }
    }

    /// A fresh router over the same pool and storage. `oneshot` consumes
    /// the router, so build one per request.
    pub fn router(&self) -> Router {
        let config = test_config(self.storage.path());
        let state = AppState {
            pool: self.pool.clone(),
            images: Arc::new(ImageStore::new(self.storage.path())),
            config: Arc::new(config.clone()),
        };
        build_app_router(state, &config)
    }

    pub fn stored_path(&self, kind: RosterKind, file: &str) -> PathBuf {
        self.storage.path().join(kind.storage_dir()).join(file)
    }

    /// Filenames currently stored for `kind`.
    pub fn stored_files(&self, kind: RosterKind) -> Vec<String> {
        let dir = self.storage.path().join(kind.storage_dir());
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// A PNG whose content (and therefore stored name) depends on `tag`.
pub fn png_with(tag: &str) -> Vec<u8> {
    let mut bytes = PNG_BYTES.to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}

/// Filename part of an `image` URL from a response.
pub fn file_of(image_url: &serde_json::Value) -> String {
    image_url
        .as_str()
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string()
}

/// Wait until a session in this test database is queued on an advisory
/// lock, i.e. a request has reached a photo lock the test is holding.
pub async fn wait_for_lock_waiter(pool: &PgPool) {
    for _ in 0..250 {
        let waiting: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pg_locks \
             WHERE locktype = 'advisory' AND NOT granted \
             AND database = (SELECT oid FROM pg_database WHERE datname = current_database())",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        if waiting > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("no request queued on a photo lock");
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_form(app: Router, method: Method, uri: &str, form: MultipartForm) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(form.into_body()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, form: MultipartForm) -> Response {
    send_form(app, Method::POST, uri, form).await
}

/// Read the response body as text, keeping key order intact.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

enum Part {
    Text(String),
    File { filename: String, bytes: Vec<u8> },
}

/// Minimal `multipart/form-data` builder.
#[derive(Default)]
pub struct MultipartForm {
    parts: Vec<(String, Part)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete form with a PNG photo.
    pub fn member(name: &str, role: &str, phone: &str) -> Self {
        Self::new()
            .file("image", "photo.png", PNG_BYTES)
            .text("name", name)
            .text("role", role)
            .text("phone", phone)
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts
            .push((name.to_string(), Part::Text(value.to_string())));
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.parts.push((
            name.to_string(),
            Part::File {
                filename: filename.to_string(),
                bytes: bytes.to_vec(),
            },
        ));
        self
    }

    fn into_body(self) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, part) in self.parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File { filename, bytes } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}

/// Create a record through the API and return its JSON `data`.
pub async fn create_member(
    app: &TestApp,
    kind: RosterKind,
    name: &str,
    role: &str,
    phone: &str,
) -> serde_json::Value {
    let uri = format!("/api/admin/{}", kind.route_segment());
    let response = post_form(app.router(), &uri, MultipartForm::member(name, role, phone)).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true, "create failed: {json}");
    json["data"].clone()
}
