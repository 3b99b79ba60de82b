//! Integration tests for the admin analytics endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, event_body};

#[tokio::test]
async fn test_analytics_require_admin() {
    let app = TestApp::new();
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;

    for path in [
        "/api/analytics/departments",
        "/api/analytics/events",
        "/api/analytics/event-types",
        "/api/analytics/users",
    ] {
        let response = app.request("GET", path, None, Some(&user.cookie)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{path}");
    }
}

#[tokio::test]
async fn test_analytics_shapes() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let asha = app.signup("Asha", "asha@example.com", "HR", "user").await;
    app.signup("Meera", "meera@example.com", "HR", "user").await;
    app.signup("Ravi", "ravi@example.com", "Sales", "user").await;

    let id = app.create_event(&admin, event_body("Town Hall", "Public")).await;
    app.create_event(&admin, event_body("Payroll Q&A", "HR")).await;
    app.create_event(&admin, event_body("Pipeline Review", "HR")).await;
    app.request("POST", &format!("/events/{id}/like"), None, Some(&asha.cookie))
        .await;

    let departments = app
        .request("GET", "/api/analytics/departments", None, Some(&admin.cookie))
        .await;
    assert_eq!(departments.status, StatusCode::OK);
    assert_eq!(departments.body["data"][0], json!({ "name": "HR", "value": 2 }));

    let types = app
        .request("GET", "/api/analytics/event-types", None, Some(&admin.cookie))
        .await;
    assert_eq!(types.body["data"][0], json!({ "name": "HR", "value": 2 }));
    assert_eq!(types.body["data"][1], json!({ "name": "Public", "value": 1 }));

    let events = app
        .request("GET", "/api/analytics/events", None, Some(&admin.cookie))
        .await;
    let town_hall = events.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["name"] == "Town Hall")
        .unwrap();
    assert_eq!(town_hall["likes"], 1);
    assert_eq!(town_hall["registered"], 0);
    assert_eq!(town_hall["date"], "2099-06-01");

    let hr_users = app
        .request(
            "GET",
            "/api/analytics/users?department=HR",
            None,
            Some(&admin.cookie),
        )
        .await;
    assert_eq!(hr_users.body["data"].as_array().unwrap().len(), 2);

    let one = app
        .request(
            "GET",
            &format!("/api/analytics/users/{}", asha.id),
            None,
            Some(&admin.cookie),
        )
        .await;
    assert_eq!(one.body["data"]["email"], "asha@example.com");
}
