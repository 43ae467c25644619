//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrations are applied on startup)
//! - Environment variable: DATABASE_URL (REDIS_URL optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Authorization Tests
// ============================================================================

#[tokio::test]
async fn test_cms_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let visitor = server.visitor_token().unwrap();

    let response = server
        .send_json(Method::POST, "/api/cms/sections/faq", None, &NewSection::draft("FAQ"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .send_json(
            Method::POST,
            "/api/cms/sections/faq",
            Some(&visitor),
            &NewSection::draft("FAQ"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get("/api/content/faq?mode=cms").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Section Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_draft_publish_delete_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().unwrap();

    let response = server
        .send_json(
            Method::POST,
            "/api/cms/sections/gallery",
            Some(&admin),
            &NewSection::draft("Gorilla Trek"),
        )
        .await
        .unwrap();
    let created: SectionBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.status, "DRAFT");
    assert_eq!(created.display_order, 0);
    assert!(created.active);
    assert!(created.published_at.is_none());

    // Invisible to the public, visible to editors
    let response = server.get(&format!("/api/content/gallery/{}", created.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/api/content/gallery?mode=cms", &admin).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["galleryEntries"]
        .as_array()
        .unwrap()
        .iter()
        .any(|row| row["id"] == created.id.as_str()));

    let response = server
        .send_json(
            Method::PATCH,
            "/api/cms/sections/gallery",
            Some(&admin),
            &json!({ "id": created.id, "publish": true }),
        )
        .await
        .unwrap();
    let published: SectionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(published.status, "PUBLISHED");
    assert!(published.published_at.is_some());
    assert_eq!(published.title, created.title);

    let response = server.get(&format!("/api/content/gallery/{}", created.id)).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .send_json(
            Method::DELETE,
            "/api/cms/sections/gallery",
            Some(&admin),
            &json!({ "id": created.id }),
        )
        .await
        .unwrap();
    let deleted: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted["deleted"], true);

    let response = server
        .send_json(
            Method::DELETE,
            "/api/cms/sections/gallery",
            Some(&admin),
            &json!({ "id": created.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Each write left an audit entry
    let response = server.get_auth("/api/cms/audit?limit=20", &admin).await.unwrap();
    let feed: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    let touched = feed
        .iter()
        .filter(|entry| entry["entityId"] == created.id.as_str())
        .count();
    assert_eq!(touched, 3);
}

#[tokio::test]
async fn test_reorder_is_all_or_nothing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().unwrap();

    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = server
            .send_json(
                Method::POST,
                "/api/cms/sections/step",
                Some(&admin),
                &NewSection::published("Step"),
            )
            .await
            .unwrap();
        let created: SectionBody = assert_json(response, StatusCode::CREATED).await.unwrap();
        ids.push(created.id);
    }

    // One unknown id rolls back the whole batch
    let response = server
        .send_json(
            Method::PUT,
            "/api/cms/sections/step/reorder",
            Some(&admin),
            &json!({ "slides": [
                { "id": ids[0], "displayOrder": 7 },
                { "id": "1", "displayOrder": 8 }
            ] }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get(&format!("/api/content/step/{}", ids[0])).await.unwrap();
    let unchanged: SectionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unchanged.display_order, 0);

    let response = server
        .send_json(
            Method::PUT,
            "/api/cms/sections/step/reorder",
            Some(&admin),
            &json!({ "slides": [
                { "id": ids[0], "displayOrder": 2 },
                { "id": ids[1], "displayOrder": 1 }
            ] }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["updated"], 2);

    let response = server.get(&format!("/api/content/step/{}", ids[0])).await.unwrap();
    let moved: SectionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(moved.display_order, 2);
}

#[tokio::test]
async fn test_rebuild_without_hook() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().unwrap();

    let response = server
        .send_json(Method::POST, "/api/cms/rebuild", Some(&admin), &json!({}))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["triggered"], false);
    assert_eq!(body["reason"], "No deploy hook configured");
}

// ============================================================================
// Settings Tests
// ============================================================================

#[tokio::test]
async fn test_settings_upsert_branches() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().unwrap();
    let key = format!("it-setting-{}", unique_suffix());

    let response = server
        .send_json(
            Method::PATCH,
            "/api/cms/settings",
            Some(&admin),
            &json!({ "key": key, "category": "seo", "value": { "title": "Safaris" } }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["created"], true);

    let response = server
        .send_json(
            Method::PATCH,
            "/api/cms/settings",
            Some(&admin),
            &json!({ "key": key, "value": { "title": "Tanzania Safaris" } }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["created"], false);

    let response = server.get(&format!("/api/settings/{key}")).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["value"]["title"], "Tanzania Safaris");
    assert_eq!(body["category"], "seo");
}

// ============================================================================
// Booking Tests
// ============================================================================

#[tokio::test]
async fn test_booking_submit_and_search() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().unwrap();
    let booking = NewBooking::unique();

    let response = server.post("/api/bookings", &booking).await.unwrap();
    let receipt: ReceiptBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(receipt.status, "pending");
    assert!(!receipt.confirmation_number.is_empty());

    let response = server
        .get_auth(
            &format!("/api/cms/bookings?search={}", booking.email),
            &admin,
        )
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["data"][0]["id"], receipt.id.as_str());

    let response = server
        .send_json(
            Method::PATCH,
            &format!("/api/cms/bookings/{}", receipt.id),
            Some(&admin),
            &json!({ "status": "confirmed", "adminNotes": "Lodge held" }),
        )
        .await
        .unwrap();
    let updated: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["status"], "confirmed");
}

#[tokio::test]
async fn test_booking_rejects_bad_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let booking = NewBooking {
        email: "not-an-email".to_string(),
        ..NewBooking::unique()
    };

    let response = server.post("/api/bookings", &booking).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
