//! Integration tests for uploads and the file listing.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_upload_redirects_and_lists_file() {
    let app = TestApp::new().await;

    let response = app.upload("report.pdf", &vec![b'x'; 10 * 1024]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(response.location().starts_with("/list?flash="));

    let stored = app.sole_stored_name().await;
    assert!(stored.starts_with("report_"));
    assert!(stored.ends_with(".pdf"));

    let list = app.get("/list").await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.text().contains(&stored));
    assert!(list.text().contains("10.00 KB"));
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = TestApp::new().await;

    let response = app.upload_field("attachment", "a.txt", b"data").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.text().contains("No file part"));
}

#[tokio::test]
async fn test_upload_with_empty_filename() {
    let app = TestApp::new().await;

    let response = app.upload("", b"data").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.text().contains("No selected file"));
}

#[tokio::test]
async fn test_upload_too_large_rejected_before_write() {
    let app = TestApp::with_max_upload(1024).await;

    let response = app.upload("big.bin", &vec![0u8; 2048]).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.text().contains("File too large"));

    assert!(app.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_identical_uploads_get_distinct_stored_names() {
    let app = TestApp::new().await;

    app.upload("dup.txt", b"same content").await;
    app.upload("dup.txt", b"same content").await;

    let entries = app.store.list().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_ne!(entries[0].name, entries[1].name);
}

#[tokio::test]
async fn test_traversal_in_upload_name_is_neutralized() {
    let app = TestApp::new().await;

    let response = app.upload("../../evil.sh", b"#!/bin/sh").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let stored = app.sole_stored_name().await;
    assert!(stored.starts_with("evil_"));
    assert!(!stored.contains('/'));
}
