//! File node creation, lookup, listing, visibility, and content.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, b64};

fn text_file(name: &str, content: &str) -> Value {
    json!({ "name": name, "type": "file", "data": b64(content.as_bytes()) })
}

#[tokio::test]
async fn test_upload_and_read_scenario() {
    let app = TestApp::new().await;
    let token = app.login_new_user("a@x.com").await;

    let created = app.upload(&token, text_file("t.txt", "hi")).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["type"], "file");
    assert_eq!(created.body["name"], "t.txt");
    assert_eq!(created.body["isPublic"], false);
    assert_eq!(created.body["parentId"], 0);
    assert!(created.body.get("localPath").is_none());
    let id = created.body["id"].as_str().expect("id").to_string();

    // Private node, anonymous caller: hidden, not unauthorized.
    let anon = app
        .request("GET", &format!("/files/{id}/data"), None, None)
        .await;
    assert_eq!(anon.status, StatusCode::NOT_FOUND);
    assert_eq!(anon.error(), "Not found");

    let owner = app
        .request("GET", &format!("/files/{id}/data"), None, Some(&token))
        .await;
    assert_eq!(owner.status, StatusCode::OK);
    assert_eq!(owner.raw.as_ref(), b"hi");
    assert_eq!(
        owner.headers["content-type"].to_str().expect("header"),
        "text/plain; charset=utf-8"
    );
}

#[tokio::test]
async fn test_create_validation_order() {
    let app = TestApp::new().await;
    let token = app.login_new_user("a@x.com").await;

    let cases = [
        (json!({}), "Missing name"),
        (json!({ "name": "x", "parentId": "bogus" }), "Missing type"),
        (json!({ "name": "x", "type": "doc" }), "Missing type"),
        (json!({ "name": "x", "type": "file", "parentId": "bogus" }), "Missing data"),
        (json!({ "name": "x", "type": "file", "data": "!!!" }), "Missing data"),
        (
            json!({ "name": "x", "type": "folder", "parentId": "bogus" }),
            "Parent not found",
        ),
    ];
    for (body, expected) in cases {
        let response = app.upload(&token, body.clone()).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.error(), expected, "{body}");
    }

    let file = app.upload(&token, text_file("t.txt", "hi")).await;
    let response = app
        .upload(
            &token,
            json!({ "name": "sub", "type": "folder", "parentId": file.body["id"] }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Parent is not a folder");

    let response = app
        .request("POST", "/files", Some(text_file("t.txt", "hi")), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_nested_folders_and_pagination() {
    let app = TestApp::new().await;
    let token = app.login_new_user("a@x.com").await;

    let folder = app
        .upload(&token, json!({ "name": "dir", "type": "folder", "parentId": "0" }))
        .await;
    assert_eq!(folder.status, StatusCode::CREATED);
    let folder_id = folder.body["id"].as_str().expect("id").to_string();

    for i in 0..25 {
        let response = app
            .upload(
                &token,
                json!({
                    "name": format!("f{i}.txt"),
                    "type": "file",
                    "data": b64(b"x"),
                    "parentId": folder_id,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["parentId"], folder_id.as_str());
    }

    let page = |n: &str| format!("/files?parentId={folder_id}&page={n}");
    let first = app.request("GET", &page("0"), None, Some(&token)).await;
    let items = first.body.as_array().expect("array");
    assert_eq!(items.len(), 20);
    assert_eq!(items[0]["name"], "f24.txt");

    let second = app.request("GET", &page("1"), None, Some(&token)).await;
    let items = second.body.as_array().expect("array");
    assert_eq!(items.len(), 5);
    assert_eq!(items[4]["name"], "f0.txt");

    let third = app.request("GET", &page("2"), None, Some(&token)).await;
    assert_eq!(third.body, json!([]));

    let garbage = app.request("GET", &page("abc"), None, Some(&token)).await;
    assert_eq!(garbage.body.as_array().expect("array").len(), 20);

    let root = app.request("GET", "/files", None, Some(&token)).await;
    let items = root.body.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["parentId"], 0);
}

#[tokio::test]
async fn test_listing_is_fail_soft() {
    let app = TestApp::new().await;
    let token = app.login_new_user("a@x.com").await;
    let file = app.upload(&token, text_file("t.txt", "hi")).await;
    let file_id = file.body["id"].as_str().expect("id");

    for parent in ["bogus", file_id] {
        let response = app
            .request("GET", &format!("/files?parentId={parent}"), None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!([]));
    }
}

#[tokio::test]
async fn test_nodes_are_owner_scoped() {
    let app = TestApp::new().await;
    let alice = app.login_new_user("a@x.com").await;
    let bob = app.login_new_user("b@x.com").await;

    let created = app.upload(&alice, text_file("t.txt", "hi")).await;
    let id = created.body["id"].as_str().expect("id").to_string();

    let own = app
        .request("GET", &format!("/files/{id}"), None, Some(&alice))
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body, created.body);

    let other = app
        .request("GET", &format!("/files/{id}"), None, Some(&bob))
        .await;
    assert_eq!(other.status, StatusCode::NOT_FOUND);

    let listing = app.request("GET", "/files", None, Some(&bob)).await;
    assert_eq!(listing.body, json!([]));

    let publish = app
        .request("PUT", &format!("/files/{id}/publish"), None, Some(&bob))
        .await;
    assert_eq!(publish.status, StatusCode::NOT_FOUND);

    let missing = app
        .request("GET", "/files/not-an-id", None, Some(&alice))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_publish_and_unpublish() {
    let app = TestApp::new().await;
    let alice = app.login_new_user("a@x.com").await;
    let bob = app.login_new_user("b@x.com").await;
    let created = app.upload(&alice, text_file("t.txt", "hi")).await;
    let id = created.body["id"].as_str().expect("id").to_string();
    let data = format!("/files/{id}/data");

    let published = app
        .request("PUT", &format!("/files/{id}/publish"), None, Some(&alice))
        .await;
    assert_eq!(published.status, StatusCode::OK);
    assert_eq!(published.body["isPublic"], true);
    assert_eq!(published.body["parentId"], 0);

    assert_eq!(app.request("GET", &data, None, None).await.status, StatusCode::OK);
    let as_bob = app.request("GET", &data, None, Some(&bob)).await;
    assert_eq!(as_bob.raw.as_ref(), b"hi");
    let bad_token = app.request("GET", &data, None, Some("garbage")).await;
    assert_eq!(bad_token.status, StatusCode::OK);

    let unpublished = app
        .request("PUT", &format!("/files/{id}/unpublish"), None, Some(&alice))
        .await;
    assert_eq!(unpublished.body["isPublic"], false);
    assert_eq!(
        app.request("GET", &data, None, Some(&bob)).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_folder_has_no_content() {
    let app = TestApp::new().await;
    let token = app.login_new_user("a@x.com").await;
    let folder = app
        .upload(&token, json!({ "name": "dir", "type": "folder" }))
        .await;
    let id = folder.body["id"].as_str().expect("id");

    let response = app
        .request("GET", &format!("/files/{id}/data"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "A folder doesn't have content");
}
