//! Fixtures shared by the service unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use eventhub_core::config::AuthConfig;
use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;
use eventhub_core::traits::{MailMessage, MailTransport};
use eventhub_database::{MemoryStore, Stores};
use eventhub_entity::user::UserRole;

use crate::context::RequestContext;

/// Records messages; optionally fails for one recipient.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<MailMessage>>,
    pub fail_for: Option<String>,
}

impl RecordingMailer {
    pub fn failing_for(recipient: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Some(recipient.to_string()),
        }
    }

    pub fn messages(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        if self.fail_for.as_deref() == Some(message.to.as_str()) {
            return Err(AppError::external_service("relay down"));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

pub fn memory_stores() -> Stores {
    Stores::memory(Arc::new(MemoryStore::new()))
}

/// Cheap Argon2 parameters for tests.
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        argon2_memory_kib: 1024,
        argon2_iterations: 1,
        ..AuthConfig::default()
    }
}

pub fn ctx(role: UserRole) -> RequestContext {
    ctx_for(Uuid::new_v4(), "HR", role)
}

pub fn ctx_for(user_id: Uuid, department: &str, role: UserRole) -> RequestContext {
    RequestContext {
        user_id,
        email: format!("{user_id}@example.com"),
        name: "Tester".to_string(),
        department: department.to_string(),
        role,
        request_time: Utc::now(),
    }
}
