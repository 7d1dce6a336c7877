//! Integration tests for the health profile and the public emergency page.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{DEMO_USER, TestApp};

#[tokio::test]
async fn test_profile_missing_until_saved() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let missing = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let saved = app
        .request(
            "PUT",
            "/api/profile",
            Some(json!({
                "full_name": "  Alice Smith ",
                "blood_group": "A-",
                "allergies": ["Penicillin", "Penicillin", "Latex"],
                "emergency_contact": { "name": "Bob Smith", "phone": "555-0100" }
            })),
            Some(&token),
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK, "{:?}", saved.body);

    let data = &saved.body["data"];
    assert_eq!(data["full_name"], "Alice Smith");
    assert_eq!(data["allergies"], json!(["Penicillin", "Latex"]));
    assert_eq!(data["emergency_url"], "https://vault.test/emergency/alice");

    let fetched = app.request("GET", "/api/profile", None, Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["blood_group"], "A-");
}

#[tokio::test]
async fn test_profile_requires_name() {
    let app = TestApp::new().await;
    let token = app.token("alice");

    let response = app
        .request(
            "PUT",
            "/api/profile",
            Some(json!({ "full_name": "", "allergies": [] })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_emergency_page_is_public_and_minimal() {
    let app = TestApp::new().await;
    let token = app.token("alice");
    app.request(
        "PUT",
        "/api/profile",
        Some(json!({
            "full_name": "Alice Smith",
            "blood_group": "A-",
            "allergies": ["Latex"],
            "emergency_contact": { "name": "Bob Smith", "phone": "555-0100" }
        })),
        Some(&token),
    )
    .await;

    // Readable any number of times without a token.
    for _ in 0..3 {
        let response = app.request("GET", "/emergency/alice", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        let data = &response.body["data"];
        assert_eq!(data["full_name"], "Alice Smith");
        assert_eq!(data["emergency_contact"]["phone"], "555-0100");
        assert!(data.get("user_id").is_none());
        assert!(data.get("updated_at").is_none());
    }
}

#[tokio::test]
async fn test_emergency_page_unknown_user() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/emergency/nobody", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_demo_emergency_page_uses_fixture() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", &format!("/emergency/{DEMO_USER}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["blood_group"], "O+");
}
