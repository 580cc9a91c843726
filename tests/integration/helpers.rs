//! Shared test helpers for integration tests.

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use depot_api::app::{Depot, build_app};
use depot_core::config::AppConfig;
use depot_worker::{JobQueue, WorkerRunner};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Derivative job queue
    pub queue: JobQueue,
    /// Worker pool, driven manually with `drain`
    pub runner: WorkerRunner,
    /// Where uploaded bytes land
    pub files_root: PathBuf,
    _dirs: (TempDir, TempDir),
}

impl TestApp {
    /// Create a new test application with empty stores
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("tempdir");
        let files_dir = tempfile::tempdir().expect("tempdir");

        let mut config = AppConfig::default();
        config.database.url = format!("sqlite://{}", db_dir.path().join("depot.db").display());
        config.storage.root_path = files_dir.path().display().to_string();
        config.worker.enabled = false;

        let depot = Depot::assemble(config).await.expect("assemble");

        Self {
            router: build_app(depot.state),
            queue: depot.queue,
            runner: depot.runner,
            files_root: files_dir.path().to_path_buf(),
            _dirs: (db_dir, files_dir),
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut headers = Vec::new();
        if let Some(token) = token {
            headers.push(("X-Token", token.to_string()));
        }
        let body = body
            .map(|b| serde_json::to_vec(&b).expect("serialize body"))
            .unwrap_or_default();
        self.send(method, path, headers, body).await
    }

    /// Make a request with arbitrary headers and a raw body
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        headers: Vec<(&str, String)>,
        body: Vec<u8>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        for (name, value) in headers {
            req = req.header(name, value);
        }
        let req = req.body(Body::from(body)).expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }

    /// Register an account; panics unless it was created
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/users",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    /// `GET /connect` with Basic credentials
    pub async fn connect_raw(&self, email: &str, password: &str) -> TestResponse {
        let basic = STANDARD.encode(format!("{email}:{password}"));
        self.send(
            "GET",
            "/connect",
            vec![("Authorization", format!("Basic {basic}"))],
            Vec::new(),
        )
        .await
    }

    /// Connect and return the session token
    pub async fn connect(&self, email: &str, password: &str) -> String {
        let response = self.connect_raw(email, password).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["token"]
            .as_str()
            .expect("token in connect response")
            .to_string()
    }

    /// Register and connect in one step
    pub async fn login_new_user(&self, email: &str) -> String {
        self.register(email, "pw1").await;
        self.connect(email, "pw1").await
    }

    /// `POST /files` with plain-text content
    pub async fn upload(&self, token: &str, body: Value) -> TestResponse {
        self.request("POST", "/files", Some(body), Some(token)).await
    }
}

/// Base64 of the given bytes, as uploads expect
pub fn b64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` when not JSON
    pub body: Value,
    /// Raw body bytes
    pub raw: Bytes,
}

impl TestResponse {
    /// The `error` field of a JSON error body
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
