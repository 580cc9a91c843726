//! Registration, connect/disconnect, and system routes.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_then_duplicate() {
    let app = TestApp::new().await;

    let body = app.register("a@x.com", "pw1").await;
    assert_eq!(body["email"], "a@x.com");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());

    let response = app
        .request(
            "POST",
            "/users",
            Some(json!({ "email": "a@x.com", "password": "other" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Already exist");
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/users", Some(json!({ "password": "pw" })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Missing email");

    let response = app
        .request("POST", "/users", Some(json!({ "email": "a@x.com" })), None)
        .await;
    assert_eq!(response.error(), "Missing password");

    let response = app
        .send("POST", "/users", Vec::new(), b"not json".to_vec())
        .await;
    assert_eq!(response.error(), "Missing email");
}

#[tokio::test]
async fn test_connect_rejects_bad_credentials() {
    let app = TestApp::new().await;
    app.register("a@x.com", "pw1").await;

    let response = app.connect_raw("a@x.com", "wrong").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Unauthorized");

    let response = app.connect_raw("b@x.com", "pw1").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/connect", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = TestApp::new().await;
    let registered = app.register("a@x.com", "pw1").await;
    let token = app.connect("a@x.com", "pw1").await;

    let me = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body, json!({ "id": registered["id"], "email": "a@x.com" }));

    let response = app.request("GET", "/disconnect", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let me = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/disconnect", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let app = TestApp::new().await;
    app.register("a@x.com", "pw1").await;
    let first = app.connect("a@x.com", "pw1").await;
    let second = app.connect("a@x.com", "pw1").await;
    assert_ne!(first, second);

    app.request("GET", "/disconnect", None, Some(&first)).await;
    let me = app.request("GET", "/users/me", None, Some(&second)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/users/me", None, Some("not-a-session"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let response = app.request("GET", "/users/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_and_stats() {
    let app = TestApp::new().await;

    let status = app.request("GET", "/status", None, None).await;
    assert_eq!(status.status, StatusCode::OK);
    assert_eq!(status.body, json!({ "redis": true, "db": true }));

    let token = app.login_new_user("a@x.com").await;
    app.upload(&token, json!({ "name": "dir", "type": "folder" }))
        .await;

    let stats = app.request("GET", "/stats", None, None).await;
    assert_eq!(stats.body, json!({ "users": 1, "files": 1 }));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/nope", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Cannot GET /nope");
}
