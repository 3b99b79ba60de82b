//! Integration tests for notification visibility and read tracking.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, event_body};

#[tokio::test]
async fn test_event_notices_follow_department() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let hr = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let sales = app.signup("Ravi", "ravi@example.com", "Sales", "user").await;

    app.create_event(&admin, event_body("Payroll Q&A", "HR")).await;
    app.create_event(&admin, event_body("Town Hall", "Public")).await;

    let hr_view = app
        .request(
            "GET",
            &format!("/api/notifications/user/{}", hr.id),
            None,
            Some(&hr.cookie),
        )
        .await;
    assert_eq!(hr_view.status, StatusCode::OK);
    assert_eq!(hr_view.body["data"]["count"], 2);

    let sales_view = app
        .request(
            "GET",
            &format!("/api/notifications/user/{}", sales.id),
            None,
            Some(&sales.cookie),
        )
        .await;
    assert_eq!(sales_view.body["data"]["count"], 1);
    assert_eq!(
        sales_view.body["data"]["items"][0]["name"],
        "New event: Town Hall"
    );

    let peek = app
        .request(
            "GET",
            &format!("/api/notifications/user/{}", hr.id),
            None,
            Some(&sales.cookie),
        )
        .await;
    assert_eq!(peek.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mark_read_clears_unread() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;
    app.create_event(&admin, event_body("Town Hall", "Public")).await;

    let unread_path = format!("/api/notifications/unread/{}", user.id);
    let unread = app
        .request("GET", &unread_path, None, Some(&user.cookie))
        .await;
    assert_eq!(unread.body["data"]["count"], 1);
    let id = unread.body["data"]["items"][0]["_id"].as_str().unwrap().to_string();

    let marked = app
        .request(
            "POST",
            &format!("/api/notifications/markAsRead/{id}"),
            None,
            Some(&user.cookie),
        )
        .await;
    assert_eq!(marked.status, StatusCode::OK);
    assert_eq!(marked.body["data"]["readBy"][0]["userId"], json!(user.id));

    // A second read keeps a single receipt.
    let again = app
        .request(
            "POST",
            &format!("/api/notifications/markAsRead/{id}"),
            None,
            Some(&user.cookie),
        )
        .await;
    assert_eq!(again.body["data"]["readBy"].as_array().unwrap().len(), 1);

    let unread = app
        .request("GET", &unread_path, None, Some(&user.cookie))
        .await;
    assert_eq!(unread.body["data"]["count"], 0);
}

#[tokio::test]
async fn test_admin_broadcast() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let body = json!({
        "name": "  Office closed Friday  ",
        "startDate": "2099-06-05",
        "startTime": "9:00",
    });

    let denied = app
        .request("POST", "/api/notifications", Some(body.clone()), Some(&user.cookie))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let created = app
        .request("POST", "/api/notifications", Some(body), Some(&admin.cookie))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["name"], "Office closed Friday");
    assert_eq!(created.body["data"]["startTime"], "09:00");
    assert_eq!(created.body["data"]["eventAccess"], "Public");

    let id = created.body["data"]["_id"].as_str().unwrap();
    let fetched = app
        .request(
            "GET",
            &format!("/api/notifications/{id}"),
            None,
            Some(&user.cookie),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::OK);

    let missing = app
        .request(
            "POST",
            &format!("/api/notifications/markAsRead/{}", uuid::Uuid::new_v4()),
            None,
            Some(&user.cookie),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
