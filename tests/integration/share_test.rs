//! Integration tests for share link creation and public access.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use medivault_database::fixtures::BLOOD_TEST_ID;
use medivault_entity::share::{CreateShareLink, ShareDuration, ViewLimit};

use crate::helpers::{DEMO_USER, TestApp};

async fn open_share(app: &TestApp, id: &str, ip: &str) -> crate::helpers::TestResponse {
    let req = Request::builder()
        .uri(format!("/share/{id}"))
        .header("x-forwarded-for", format!("{ip}, 10.0.0.1"))
        .header("user-agent", "integration-test/1.0")
        .body(Body::empty())
        .expect("Failed to build request");
    app.send(req).await
}

#[tokio::test]
async fn test_create_share_returns_url() {
    let app = TestApp::new().await;
    let token = app.token("alice");
    let doc_id = app.create_document(&token, "Blood Panel.pdf", "Glucose 90").await;

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/shares"),
            Some(serde_json::json!({ "duration": "1_day", "max_views": 5 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    let id = data["id"].as_str().unwrap();
    assert_eq!(data["url"], format!("https://vault.test/share/{id}"));
    assert_eq!(data["max_views"], 5);
    assert_eq!(data["view_count"], 0);
    assert_eq!(data["views_remaining"], 5);
}

#[tokio::test]
async fn test_create_share_rejects_invalid_policy() {
    let app = TestApp::new().await;
    let token = app.token("alice");
    let doc_id = app.create_document(&token, "Blood Panel.pdf", "Glucose 90").await;

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/shares"),
            Some(serde_json::json!({ "duration": "2_weeks", "max_views": 3 })),
            Some(&token),
        )
        .await;

    assert!(response.status.is_client_error());
    assert!(app.share_links.is_empty());
}

#[tokio::test]
async fn test_link_to_foreign_document_resolves_not_found() {
    let app = TestApp::new().await;
    let alice = app.token("alice");
    let mallory = app.token("mallory");
    let doc_id = app.create_document(&alice, "Blood Panel.pdf", "Glucose 90").await;

    // Creation does not look at the document.
    let share_id = app.create_share(&mallory, &doc_id, "1_hour", 5).await;

    let response = open_share(&app, &share_id, "203.0.113.7").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["status"], "NOT_FOUND");
    assert!(response.body.get("document").is_none());
}

#[tokio::test]
async fn test_link_to_missing_document_resolves_not_found() {
    let app = TestApp::new().await;
    let token = app.token("alice");
    let share_id = app
        .create_share(&token, &Uuid::new_v4().to_string(), "1_day", 1)
        .await;

    let response = open_share(&app, &share_id, "203.0.113.7").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_single_view_link_then_limit_reached() {
    let app = TestApp::new().await;
    let token = app.token("alice");
    let doc_id = app.create_document(&token, "Blood Panel.pdf", "Glucose 90").await;
    let share_id = app.create_share(&token, &doc_id, "1_hour", 1).await;

    let first = open_share(&app, &share_id, "203.0.113.7").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["status"], "VALID");
    assert_eq!(first.body["document"]["file_name"], "Blood Panel.pdf");
    assert_eq!(first.body["document"]["file_content"], "Glucose 90");
    assert!(first.body["document"].get("file_path").is_none());
    assert_eq!(first.body["link"]["view_count"], 1);
    assert_eq!(first.body["link"]["views_remaining"], 0);

    let second = open_share(&app, &share_id, "203.0.113.8").await;
    assert_eq!(second.status, StatusCode::FORBIDDEN);
    assert_eq!(second.body["status"], "LIMIT_REACHED");
    assert!(second.body.get("document").is_none());

    let listed = app.request("GET", "/api/shares", None, Some(&token)).await;
    let link = &listed.body["data"][0];
    assert_eq!(link["view_count"], 1);
    let logs = link["access_logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["ip_address"], "203.0.113.7");
    assert_eq!(logs[0]["user_agent"], "integration-test/1.0");
}

#[tokio::test]
async fn test_unlimited_link_counts_views() {
    let app = TestApp::new().await;
    let token = app.token("alice");
    let doc_id = app.create_document(&token, "Blood Panel.pdf", "Glucose 90").await;
    let share_id = app.create_share(&token, &doc_id, "7_days", 0).await;

    for _ in 0..3 {
        let response = open_share(&app, &share_id, "198.51.100.1").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["link"]["views_remaining"], "∞");
    }

    let listed = app.request("GET", "/api/shares", None, Some(&token)).await;
    assert_eq!(listed.body["data"][0]["view_count"], 3);
}

#[tokio::test]
async fn test_expired_link_is_gone_and_not_counted() {
    let app = TestApp::new().await;
    let token = app.token("alice");
    let doc_id = app.create_document(&token, "Blood Panel.pdf", "Glucose 90").await;

    let link = CreateShareLink::new(
        "alice",
        doc_id.parse().unwrap(),
        ShareDuration::OneHour,
        ViewLimit::Five,
        Utc::now() - TimeDelta::hours(2),
    )
    .into_link(Uuid::new_v4());
    let share_id = link.id.to_string();
    app.share_links.insert(link);

    let response = open_share(&app, &share_id, "203.0.113.7").await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.body["status"], "EXPIRED");
    assert_eq!(response.body["title"], "Link Expired");
    assert_eq!(response.body["link"]["view_count"], 0);
}

#[tokio::test]
async fn test_unknown_and_malformed_links_are_not_found() {
    let app = TestApp::new().await;

    let unknown = open_share(&app, &Uuid::new_v4().to_string(), "203.0.113.7").await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body["status"], "NOT_FOUND");

    let malformed = open_share(&app, "not-a-link", "203.0.113.7").await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
    assert_eq!(malformed.body["status"], "NOT_FOUND");
}

#[tokio::test]
async fn test_deleted_document_link_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token("alice");
    let doc_id = app.create_document(&token, "Blood Panel.pdf", "Glucose 90").await;
    let share_id = app.create_share(&token, &doc_id, "1_day", 10).await;

    let deleted = app
        .request("DELETE", &format!("/api/documents/{doc_id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let response = open_share(&app, &share_id, "203.0.113.7").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["status"], "NOT_FOUND");
}

#[tokio::test]
async fn test_demo_fixture_can_be_shared_and_opened() {
    let app = TestApp::new().await;
    let token = app.token(DEMO_USER);
    let share_id = app
        .create_share(&token, &BLOOD_TEST_ID.to_string(), "1_day", 5)
        .await;

    let response = open_share(&app, &share_id, "203.0.113.7").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["document"]["file_name"], "Annual Blood Test Results.pdf");
}

#[tokio::test]
async fn test_share_listing_requires_auth() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/shares", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_forwarded_ip_ignored_when_proxy_untrusted() {
    let app = TestApp::with_config(|c| c.server.trust_proxy_headers = false).await;
    let token = app.token("alice");
    let doc_id = app.create_document(&token, "Blood Panel.pdf", "Glucose 90").await;
    let share_id = app.create_share(&token, &doc_id, "1_day", 5).await;

    let opened = open_share(&app, &share_id, "203.0.113.7").await;
    assert_eq!(opened.status, StatusCode::OK);

    let listed = app.request("GET", "/api/shares", None, Some(&token)).await;
    let logs = listed.body["data"][0]["access_logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["ip_address"], "unknown");
    assert_eq!(logs[0]["user_agent"], "integration-test/1.0");
}
