//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Which transport delivers outbound mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Write messages to the log instead of sending them.
    Log,
    /// POST messages to an HTTP mail relay.
    Http,
}

/// Mail transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Transport: `"log"` or `"http"`.
    #[serde(default = "default_provider")]
    pub provider: MailProvider,
    /// Relay endpoint for the `http` transport.
    #[serde(default)]
    pub endpoint: String,
    /// Relay account name.
    #[serde(default)]
    pub username: String,
    /// Relay account secret.
    #[serde(default)]
    pub password: String,
    /// Sender address placed on every message.
    #[serde(default = "default_from")]
    pub from: String,
    /// Per-message send timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: String::new(),
            username: String::new(),
            password: String::new(),
            from: default_from(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> MailProvider {
    MailProvider::Log
}

fn default_from() -> String {
    "EventHub <no-reply@eventhub.local>".to_string()
}

fn default_timeout() -> u64 {
    15
}
