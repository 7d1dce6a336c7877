//! Integration tests for document CRUD and the analyze stream.

use axum::http::StatusCode;

use medivault_database::fixtures::MRI_SCAN_ID;
use medivault_service::ingestion::PDF_PLACEHOLDER;

use crate::helpers::{DEMO_USER, OCR_TEXT, Part, TestApp};

#[tokio::test]
async fn test_save_list_get_delete() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let first = app.create_document(&token, "Older.pdf", "first").await;
    let second = app.create_document(&token, "Newer.pdf", "second").await;

    let listed = app.request("GET", "/api/documents", None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let docs = listed.body["data"].as_array().unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["id"], second.as_str());
    assert_eq!(docs[1]["id"], first.as_str());

    let got = app
        .request("GET", &format!("/api/documents/{first}"), None, Some(&token))
        .await;
    assert_eq!(got.status, StatusCode::OK);
    assert_eq!(got.body["data"]["file_name"], "Older.pdf");
    assert_eq!(got.body["data"]["tags"][0], "Lab Results");

    let deleted = app
        .request("DELETE", &format!("/api/documents/{first}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/api/documents/{first}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_with_file_records_size_and_type() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .multipart(
            "/api/documents",
            &[
                Part::text("tags", "Prescriptions, Dermatology"),
                Part::file("file", "rx.jpg", Some("image/jpeg"), b"\xFF\xD8\xFFfake-jpeg"),
            ],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["file_name"], "rx.jpg");
    assert_eq!(data["file_type"], "image/jpeg");
    assert_eq!(data["file_size"], 12);
    assert!(data["file_path"].as_str().unwrap().contains("rx.jpg"));
}

#[tokio::test]
async fn test_save_requires_file_name() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .multipart("/api/documents", &[Part::text("summary", "no name")], &token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_other_users_document_is_forbidden() {
    let app = TestApp::new().await;
    let alice = app.token("alice");
    let bob = app.token("bob");
    let doc_id = app.create_document(&alice, "Private.pdf", "secret").await;

    let response = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let listed = app.request("GET", "/api/documents", None, Some(&bob)).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_malformed_document_id_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .request("GET", "/api/documents/not-a-uuid", None, Some(&token))
        .await;
    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_demo_user_sees_fixtures_and_writes_are_not_kept() {
    let app = TestApp::new().await;
    let token = app.token(DEMO_USER);

    let listed = app.request("GET", "/api/documents", None, Some(&token)).await;
    let docs = listed.body["data"].as_array().unwrap();
    assert_eq!(docs.len(), 4);

    let mri = app
        .request("GET", &format!("/api/documents/{MRI_SCAN_ID}"), None, Some(&token))
        .await;
    assert_eq!(mri.status, StatusCode::OK);
    assert_eq!(mri.body["data"]["file_name"], "MRI Scan - Left Knee.dicom");

    let saved = app
        .multipart(
            "/api/documents",
            &[
                Part::text("file_name", "Demo Upload.pdf"),
                Part::file("file", "Demo Upload.pdf", Some("application/pdf"), b"%PDF-1.4"),
            ],
            &token,
        )
        .await;
    assert_eq!(saved.status, StatusCode::CREATED);
    assert!(saved.body["data"]["file_path"].is_null());

    let after = app.request("GET", "/api/documents", None, Some(&token)).await;
    assert_eq!(after.body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_analyze_image_streams_progress_then_result() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .multipart(
            "/api/documents/analyze",
            &[Part::file("file", "labs.png", Some("image/png"), b"\x89PNGfake")],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type, "application/x-ndjson");

    let events = response.ndjson();
    let last = events.last().expect("stream had no events");
    assert_eq!(last["event"], "result");
    assert!(
        events[..events.len() - 1]
            .iter()
            .all(|e| e["event"] == "progress")
    );

    let report = &last["report"];
    assert_eq!(report["status"], "analyzed");
    assert_eq!(report["extracted_text"], OCR_TEXT);
    assert_eq!(report["suggested_tags"][0], "Lab Results");
    assert!(report["summary"].is_string());
    // Health analysis failed in the fake, so only that field is blank.
    assert!(report["health_findings"].is_null());
}

#[tokio::test]
async fn test_analyze_pdf_uses_placeholder_text() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .multipart(
            "/api/documents/analyze",
            &[Part::file("file", "report.pdf", None, b"%PDF-1.7")],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let events = response.ndjson();
    let last = events.last().unwrap();
    assert_eq!(last["report"]["extracted_text"], PDF_PLACEHOLDER);
}

#[tokio::test]
async fn test_analyze_rejects_unsupported_type_before_streaming() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .multipart(
            "/api/documents/analyze",
            &[Part::file("file", "notes.txt", Some("text/plain"), b"hello")],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_analyze_without_file_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .multipart("/api/documents/analyze", &[Part::text("other", "x")], &token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
