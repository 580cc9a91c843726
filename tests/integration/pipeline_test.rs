//! Image uploads and their width-variant derivatives.

use std::io::Cursor;

use axum::http::StatusCode;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgba};
use serde_json::json;

use depot_entity::job::JobStatus;

use crate::helpers::{TestApp, b64};

fn png(width: u32, height: u32) -> Vec<u8> {
    let buf = ImageBuffer::from_pixel(width, height, Rgba([10u8, 120, 200, 255]));
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(buf)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("encode png");
    out
}

#[tokio::test]
async fn test_image_variants_after_processing() {
    let app = TestApp::new().await;
    let token = app.login_new_user("a@x.com").await;

    let created = app
        .upload(
            &token,
            json!({ "name": "photo.png", "type": "image", "data": b64(&png(1000, 600)) }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["type"], "image");
    let id = created.body["id"].as_str().expect("id").to_string();
    assert_eq!(app.queue.count(JobStatus::Queued).await.expect("count"), 1);

    // Variants do not exist until the job has run.
    let early = app
        .request("GET", &format!("/files/{id}/data?size=500"), None, Some(&token))
        .await;
    assert_eq!(early.status, StatusCode::NOT_FOUND);
    assert_eq!(early.error(), "Not found");

    assert_eq!(app.runner.drain().await.expect("drain"), 1);
    assert_eq!(app.queue.count(JobStatus::Completed).await.expect("count"), 1);

    for (size, height) in [(500, 300), (250, 150), (100, 60)] {
        let response = app
            .request(
                "GET",
                &format!("/files/{id}/data?size={size}"),
                None,
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "size {size}");
        assert_eq!(
            response.headers["content-type"].to_str().expect("header"),
            "image/png"
        );
        let img = image::load_from_memory(&response.raw).expect("decode variant");
        assert_eq!(img.dimensions(), (size, height));
    }

    let original = app
        .request("GET", &format!("/files/{id}/data"), None, Some(&token))
        .await;
    let img = image::load_from_memory(&original.raw).expect("decode original");
    assert_eq!(img.dimensions(), (1000, 600));

    for bad in ["abc", "123", "-1"] {
        let response = app
            .request(
                "GET",
                &format!("/files/{id}/data?size={bad}"),
                None,
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "size {bad}");
    }
}

#[tokio::test]
async fn test_variants_follow_visibility() {
    let app = TestApp::new().await;
    let token = app.login_new_user("a@x.com").await;
    let created = app
        .upload(
            &token,
            json!({ "name": "p.png", "type": "image", "data": b64(&png(200, 200)) }),
        )
        .await;
    let id = created.body["id"].as_str().expect("id").to_string();
    app.runner.drain().await.expect("drain");

    let path = format!("/files/{id}/data?size=100");
    assert_eq!(
        app.request("GET", &path, None, None).await.status,
        StatusCode::NOT_FOUND
    );
    app.request("PUT", &format!("/files/{id}/publish"), None, Some(&token))
        .await;
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let img = image::load_from_memory(&response.raw).expect("decode");
    assert_eq!(img.dimensions(), (100, 100));
}

#[tokio::test]
async fn test_non_images_schedule_nothing() {
    let app = TestApp::new().await;
    let token = app.login_new_user("a@x.com").await;
    app.upload(
        &token,
        json!({ "name": "t.txt", "type": "file", "data": b64(b"hi") }),
    )
    .await;
    app.upload(&token, json!({ "name": "dir", "type": "folder" }))
        .await;
    assert_eq!(app.queue.count(JobStatus::Queued).await.expect("count"), 0);
    assert_eq!(app.runner.drain().await.expect("drain"), 0);
}

#[tokio::test]
async fn test_undecodable_image_fails_its_job() {
    let app = TestApp::new().await;
    let token = app.login_new_user("a@x.com").await;
    let created = app
        .upload(
            &token,
            json!({ "name": "broken.png", "type": "image", "data": b64(b"not an image") }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_str().expect("id").to_string();

    app.runner.drain().await.expect("drain");
    assert_eq!(app.queue.count(JobStatus::Failed).await.expect("count"), 1);

    // The original is still served.
    let original = app
        .request("GET", &format!("/files/{id}/data"), None, Some(&token))
        .await;
    assert_eq!(original.status, StatusCode::OK);
    assert_eq!(original.raw.as_ref(), b"not an image");
}
