//! Integration tests for signup, login, the access gate, and password reset.

use axum::http::StatusCode;
use serde_json::json;

use eventhub_core::config::AuthConfig;

use crate::helpers::{TestApp, event_body, test_auth_config};

#[tokio::test]
async fn test_signup_sets_session_cookie() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "name": "Asha Rao",
                "email": "Asha@Example.com",
                "password": "pass1234",
                "department": "HR",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["email"], "asha@example.com");
    let cookie = response.cookie.unwrap();
    assert!(cookie.starts_with("token="));
    assert_eq!(
        cookie.trim_start_matches("token="),
        response.body["data"]["token"].as_str().unwrap()
    );
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let app = TestApp::new();
    app.signup("Asha", "asha@example.com", "HR", "user").await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "name": "Asha Again",
                "email": "asha@example.com",
                "password": "pass1234",
                "department": "HR",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_login_and_wrong_password() {
    let app = TestApp::new();
    app.signup("Asha", "asha@example.com", "HR", "user").await;

    let ok = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "asha@example.com", "password": "pass1234" })),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert!(ok.cookie.is_some());

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "asha@example.com", "password": "nope" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_gate_codes() {
    let app = TestApp::new();
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;

    let missing = app.request("GET", "/events/allevents", None, None).await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);
    assert_eq!(missing.body["error"], "UNAUTHENTICATED");

    let forged = app
        .request("GET", "/events/allevents", None, Some("token=not-a-jwt"))
        .await;
    assert_eq!(forged.status, StatusCode::FORBIDDEN);
    assert_eq!(forged.body["error"], "INVALID_OR_EXPIRED_CREDENTIAL");

    let not_admin = app
        .request(
            "POST",
            "/events/create",
            Some(event_body("Offsite", "Public")),
            Some(&user.cookie),
        )
        .await;
    assert_eq!(not_admin.status, StatusCode::FORBIDDEN);
    assert_eq!(not_admin.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.cookie.as_deref(), Some("token="));

    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let signed_in = app
        .request("POST", "/api/auth/logout", None, Some(&user.cookie))
        .await;
    assert_eq!(signed_in.status, StatusCode::OK);
    assert_eq!(signed_in.cookie.as_deref(), Some("token="));
}

fn reset_token(html: &str) -> String {
    let start = html.find("reset-password/").unwrap() + "reset-password/".len();
    html[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[tokio::test]
async fn test_reset_token_is_single_use() {
    let app = TestApp::new();
    app.signup("Asha", "asha@example.com", "HR", "user").await;

    let response = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(json!({ "email": "asha@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let token = reset_token(&app.mailer.messages()[0].html);

    let path = format!("/api/auth/reset-password/{token}");
    let first = app
        .request("POST", &path, Some(json!({ "newPassword": "fresh123" })), None)
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "asha@example.com", "password": "fresh123" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);

    let second = app
        .request("POST", &path, Some(json!({ "newPassword": "again123" })), None)
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["error"], "INVALID_OR_EXPIRED_TOKEN");
}

#[tokio::test]
async fn test_expired_reset_token_is_rejected() {
    let app = TestApp::with_auth(AuthConfig {
        reset_token_ttl_minutes: 0,
        ..test_auth_config()
    });
    app.signup("Asha", "asha@example.com", "HR", "user").await;
    app.request(
        "POST",
        "/api/auth/forgot-password",
        Some(json!({ "email": "asha@example.com" })),
        None,
    )
    .await;

    let token = reset_token(&app.mailer.messages()[0].html);
    let response = app
        .request(
            "POST",
            &format!("/api/auth/reset-password/{token}"),
            Some(json!({ "newPassword": "fresh123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_OR_EXPIRED_TOKEN");

    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "asha@example.com", "password": "pass1234" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::OK);

    let new = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "asha@example.com", "password": "fresh123" })),
            None,
        )
        .await;
    assert_eq!(new.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_update_is_self_or_admin() {
    let app = TestApp::new();
    let asha = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let ravi = app.signup("Ravi", "ravi@example.com", "Sales", "user").await;

    let other = app
        .request(
            "PUT",
            &format!("/api/auth/update/{}", asha.id),
            Some(json!({ "department": "Finance" })),
            Some(&ravi.cookie),
        )
        .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    let own = app
        .request(
            "PUT",
            &format!("/api/auth/update/{}", asha.id),
            Some(json!({ "department": "Finance" })),
            Some(&asha.cookie),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["data"]["department"], "Finance");
    assert!(own.body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_malformed_path_id_is_validation_error() {
    let app = TestApp::new();
    let user = app.signup("Asha", "asha@example.com", "HR", "user").await;
    let response = app
        .request("GET", "/api/auth/not-a-uuid", None, Some(&user.cookie))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invitations_are_mailed() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let event_id = app.create_event(&admin, event_body("Town Hall", "Public")).await;

    let response = app
        .request(
            "POST",
            "/api/auth/send-invites",
            Some(json!({
                "eventId": event_id,
                "emails": ["asha@example.com", "ravi@example.com"],
                "usernames": ["Asha", "Ravi"],
            })),
            Some(&admin.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["sent"], 2);

    let mails = app.mailer.messages();
    assert_eq!(mails.len(), 2);
    assert!(mails.iter().any(|m| m.to == "ravi@example.com" && m.html.contains("Ravi")));
}
