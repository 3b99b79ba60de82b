//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use eventhub_api::{AppState, build_app};
use eventhub_core::config::{AppConfig, AuthConfig};
use eventhub_core::result::AppResult;
use eventhub_core::traits::{MailMessage, MailTransport};
use eventhub_database::{MemoryStore, Stores};

/// Mail transport that keeps every message for inspection.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingMailer {
    /// Everything sent so far.
    pub fn messages(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// A signed-up account and its session cookie.
#[derive(Debug, Clone)]
pub struct TestUser {
    /// User id.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// `name=value` pair to send back in the `Cookie` header.
    pub cookie: String,
}

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Captured outgoing mail
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    /// Create a new test application over a fresh memory store.
    pub fn new() -> Self {
        Self::with_auth(test_auth_config())
    }

    /// Create a test application with custom auth settings.
    pub fn with_auth(auth: AuthConfig) -> Self {
        let config = AppConfig {
            auth,
            ..AppConfig::default()
        };
        let stores = Stores::memory(Arc::new(MemoryStore::new()));
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::new(config, stores, mailer.clone()).expect("Failed to build state");

        Self {
            router: build_app(state),
            mailer,
        }
    }

    /// Sign up an account and return it with its session cookie.
    pub async fn signup(&self, name: &str, email: &str, department: &str, role: &str) -> TestUser {
        let response = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(json!({
                    "name": name,
                    "email": email,
                    "password": "pass1234",
                    "department": department,
                    "role": role,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );

        let cookie = response.cookie.clone().expect("No session cookie on signup");
        let check = self.request("GET", "/api/auth/check", None, Some(&cookie)).await;
        let id = check.body["data"]["_id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No user id in check response");

        TestUser {
            id,
            email: email.to_string(),
            cookie,
        }
    }

    /// Sign up an admin in the `Admin` department.
    pub async fn admin(&self) -> TestUser {
        self.signup("Admin", "admin@example.com", "Admin", "admin").await
    }

    /// Create an event as `admin` and return its id.
    pub async fn create_event(&self, admin: &TestUser, body: Value) -> Uuid {
        let response = self
            .request("POST", "/events/create", Some(body), Some(&admin.cookie))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        Uuid::parse_str(response.body["data"]["_id"].as_str().unwrap()).unwrap()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            cookie,
        }
    }
}

/// Cheap Argon2 parameters so signups stay fast.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-secret".to_string(),
        argon2_memory_kib: 1024,
        argon2_iterations: 1,
        ..AuthConfig::default()
    }
}

/// A future, public, single-day event body.
pub fn event_body(name: &str, access: &str) -> Value {
    json!({
        "name": name,
        "startDate": "2099-06-01",
        "startTime": "10:00",
        "endDate": "2099-06-01",
        "endTime": "12:00",
        "description": "<p>Bring a friend</p>",
        "eventAccess": access,
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// `name=value` of the first `Set-Cookie`, if any
    pub cookie: Option<String>,
}
