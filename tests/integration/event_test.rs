//! Integration tests for event administration, listings, and engagement.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use futures::future::join_all;
use serde_json::{Value, json};

use eventhub_core::config::EventsConfig;

use crate::helpers::{TestApp, event_body};

#[tokio::test]
async fn test_create_and_fetch_event() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;

    let id = app.create_event(&admin, event_body("Town Hall", "")).await;
    let response = app
        .request("GET", &format!("/events/{id}"), None, Some(&user.cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Town Hall");
    assert_eq!(response.body["data"]["eventAccess"], "Public");
    assert_eq!(response.body["data"]["likedBy"], json!([]));
}

/// An event running from an hour ago to an hour from now on the configured clock.
fn running_now(name: &str, access: &str) -> Value {
    let now = Utc::now().with_timezone(&EventsConfig::default().reference_offset());
    let start = now - Duration::hours(1);
    let end = now + Duration::hours(1);
    json!({
        "name": name,
        "startDate": start.format("%Y-%m-%d").to_string(),
        "startTime": start.format("%H:%M").to_string(),
        "endDate": end.format("%Y-%m-%d").to_string(),
        "endTime": end.format("%H:%M").to_string(),
        "eventAccess": access,
    })
}

#[tokio::test]
async fn test_running_event_is_live_and_likeable() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let user = app.signup("Ravi", "ravi@example.com", "Sales", "user").await;
    let id = app.create_event(&admin, running_now("Pitch Day", "Sales")).await;
    let later = app.create_event(&admin, event_body("Offsite", "Sales")).await;

    let live = app
        .request("GET", "/events/filter?status=live", None, Some(&user.cookie))
        .await;
    assert_eq!(live.status, StatusCode::OK, "{:?}", live.body);
    let ids: Vec<&str> = live.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![id.to_string()]);

    let future = app
        .request("GET", "/events/filter?status=future", None, Some(&user.cookie))
        .await;
    assert_eq!(future.body["data"][0]["_id"], later.to_string());

    let path = format!("/events/{id}/like");
    let on = app.request("POST", &path, None, Some(&user.cookie)).await;
    assert_eq!(on.body["data"]["likedBy"], json!([user.id]));
    let off = app.request("POST", &path, None, Some(&user.cookie)).await;
    assert_eq!(off.body["data"]["likedBy"], json!([]));
}

#[tokio::test]
async fn test_end_before_start_is_rejected() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let mut body = event_body("Backwards", "Public");
    body["endTime"] = json!("09:00");

    let response = app
        .request("POST", "/events/create", Some(body), Some(&admin.cookie))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_like_toggles_on_and_off() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let id = app.create_event(&admin, event_body("Town Hall", "Public")).await;
    let path = format!("/events/{id}/like");

    let on = app.request("POST", &path, None, Some(&user.cookie)).await;
    assert_eq!(on.status, StatusCode::OK, "{:?}", on.body);
    assert_eq!(on.body["data"]["likedBy"], json!([user.id]));

    let liked = app
        .request("GET", "/events/liked", None, Some(&user.cookie))
        .await;
    assert_eq!(liked.body["data"].as_array().unwrap().len(), 1);

    let off = app.request("POST", &path, None, Some(&user.cookie)).await;
    assert_eq!(off.body["data"]["likedBy"], json!([]));
}

#[tokio::test]
async fn test_toggle_for_someone_else_needs_admin() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let asha = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let ravi = app.signup("Ravi", "ravi@example.com", "HR", "user").await;
    let id = app.create_event(&admin, event_body("Town Hall", "Public")).await;

    let response = app
        .request(
            "POST",
            &format!("/events/{id}/save"),
            Some(json!({ "_id": ravi.id })),
            Some(&asha.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/events/{id}/save"),
            Some(json!({ "_id": ravi.id })),
            Some(&admin.cookie),
        )
        .await;
    assert_eq!(response.body["data"]["savedBy"], json!([ravi.id]));
}

#[tokio::test]
async fn test_concurrent_likes_are_all_kept() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let id = app.create_event(&admin, event_body("Town Hall", "Public")).await;

    let mut users = Vec::new();
    for i in 0..8 {
        users.push(
            app.signup("Fan", &format!("fan{i}@example.com"), "HR", "user")
                .await,
        );
    }

    let path = format!("/events/{id}/like");
    let responses = join_all(
        users
            .iter()
            .map(|u| app.request("POST", &path, None, Some(&u.cookie))),
    )
    .await;
    assert!(responses.iter().all(|r| r.status == StatusCode::OK));

    let event = app
        .request("GET", &format!("/events/{id}"), None, Some(&admin.cookie))
        .await;
    assert_eq!(event.body["data"]["likedBy"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_response_check() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let id = app.create_event(&admin, event_body("Town Hall", "Public")).await;

    app.request(
        "POST",
        &format!("/events/{id}/userresponse"),
        None,
        Some(&user.cookie),
    )
    .await;

    let check = app
        .request(
            "GET",
            &format!("/events/check-response/{id}/{}", user.id),
            None,
            Some(&user.cookie),
        )
        .await;
    assert_eq!(check.status, StatusCode::OK);
    assert_eq!(check.body["data"]["hasResponded"], true);
    assert_eq!(check.body["data"]["event"]["responseBy"], json!([user.id]));
}

#[tokio::test]
async fn test_attendance_conflict() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let id = app.create_event(&admin, event_body("Town Hall", "Public")).await;
    let path = format!("/events/{id}/attendance");

    let first = app
        .request(
            "POST",
            &path,
            Some(json!({ "email": "Asha@Example.com" })),
            Some(&admin.cookie),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["attendance"], json!(["asha@example.com"]));

    let again = app
        .request(
            "POST",
            &path,
            Some(json!({ "email": "asha@example.com" })),
            Some(&admin.cookie),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.body["message"], "Attendance already marked for this email");
}

#[tokio::test]
async fn test_comments_round_trip() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let id = app.create_event(&admin, event_body("Town Hall", "Public")).await;

    let empty = app
        .request("GET", &format!("/events/{id}/comments"), None, Some(&user.cookie))
        .await;
    assert_eq!(empty.body["data"], json!([]));

    let posted = app
        .request(
            "POST",
            &format!("/events/{id}/comment"),
            Some(json!({ "text": "See you there" })),
            Some(&user.cookie),
        )
        .await;
    assert_eq!(posted.status, StatusCode::OK);
    assert_eq!(posted.body["data"]["comments"].as_array().unwrap().len(), 1);

    let listed = app
        .request("GET", &format!("/events/{id}/comments"), None, Some(&user.cookie))
        .await;
    assert_eq!(listed.body["data"][0]["text"], "See you there");
    assert_eq!(listed.body["data"][0]["user"]["name"], "Asha");
}

#[tokio::test]
async fn test_soft_delete_moves_event_to_cancelled() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let id = app.create_event(&admin, event_body("Town Hall", "Public")).await;

    let response = app
        .request(
            "PATCH",
            &format!("/events/soft-delete/{id}"),
            Some(json!({ "isDeleted": true })),
            Some(&admin.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["isDeleted"], true);

    let cancelled = app
        .request("GET", "/events/filter?status=cancelled", None, Some(&admin.cookie))
        .await;
    assert_eq!(cancelled.body["data"][0]["_id"], json!(id));

    let future = app
        .request("GET", "/events/filter?status=future", None, Some(&admin.cookie))
        .await;
    assert_eq!(future.body["data"], json!([]));

    let gone = app
        .request("GET", &format!("/events/{id}"), None, Some(&admin.cookie))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let app = TestApp::new();
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let response = app
        .request("GET", "/events/filter?status=someday", None, Some(&user.cookie))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_access_listing_pages() {
    let app = TestApp::new();
    let admin = app.admin().await;
    for i in 0..3 {
        app.create_event(&admin, event_body(&format!("HR {i}"), "HR")).await;
    }
    app.create_event(&admin, event_body("Open", "Public")).await;
    app.create_event(&admin, event_body("Sales only", "Sales")).await;

    // HR sees its own events plus public ones.
    let response = app
        .request(
            "GET",
            "/events/eventaccess?eventAccess=HR&page=2&limit=3",
            None,
            Some(&admin.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["events"].as_array().unwrap().len(), 1);
    assert_eq!(
        data["pagination"],
        json!({ "currentPage": 2, "totalPages": 2, "totalEvents": 4, "limit": 3 })
    );

    let missing = app
        .request("GET", "/events/eventaccess", None, Some(&admin.cookie))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_access_listing_far_page_is_empty() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let user = app.signup("Ravi", "ravi@example.com", "Sales", "user").await;
    app.create_event(&admin, event_body("Pitch Day", "Sales")).await;

    let response = app
        .request(
            "GET",
            "/events/eventaccess?eventAccess=Sales&page=18446744073709551615&limit=5",
            None,
            Some(&user.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["events"], json!([]));
    assert_eq!(data["pagination"]["totalEvents"], 1);
    assert_eq!(data["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_date_views() {
    let app = TestApp::new();
    let admin = app.admin().await;
    app.create_event(&admin, event_body("Open", "Public")).await;
    app.create_event(&admin, event_body("Sales only", "Sales")).await;

    let hr_day = app
        .request(
            "GET",
            "/events/geteventbydate?date=2099-06-01&department=HR",
            None,
            Some(&admin.cookie),
        )
        .await;
    assert_eq!(hr_day.status, StatusCode::OK);
    assert_eq!(hr_day.body["data"].as_array().unwrap().len(), 1);

    let dates = app
        .request("GET", "/events/getalleventdates", None, Some(&admin.cookie))
        .await;
    assert_eq!(dates.body["data"], json!(["2099-06-01"]));
}
