//! Integration tests for the streaming assistant.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{DEMO_USER, TestApp};

#[tokio::test]
async fn test_assistant_streams_plain_text() {
    let app = TestApp::new().await;
    let token = app.token(DEMO_USER);

    let response = app
        .request(
            "POST",
            "/api/assistant",
            Some(json!({ "query": "What did my knee MRI show?" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.starts_with("text/plain"));
    assert_eq!(
        response.text(),
        "Based on your documents, your knee MRI is on file."
    );
}

#[tokio::test]
async fn test_assistant_without_matches_still_answers() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .request(
            "POST",
            "/api/assistant",
            Some(json!({ "query": "knee MRI" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.text(),
        "Based on your documents, I found nothing relevant."
    );
}

#[tokio::test]
async fn test_assistant_rejects_empty_question() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .request(
            "POST",
            "/api/assistant",
            Some(json!({ "query": "" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assistant_requires_auth() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/assistant", Some(json!({ "query": "hi" })), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
