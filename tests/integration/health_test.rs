//! Integration tests for the health endpoint and token handling.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["status"], "ok");
    assert_eq!(data["database"], "memory");
    assert_eq!(data["storage"], "available");
    assert_eq!(data["ai"], "disabled");
}

#[tokio::test]
async fn test_token_signed_with_wrong_secret_is_rejected() {
    let app = TestApp::new().await;
    let mut other = TestApp::new().await;
    other.config.auth.jwt_secret = "some-other-secret".to_string();
    let forged = other.token("alice");

    let response = app
        .request("GET", "/api/documents", None, Some(&forged))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let app = TestApp::new().await;
    let req = axum::http::Request::builder()
        .uri("/api/documents")
        .header("Authorization", "Token abc")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
