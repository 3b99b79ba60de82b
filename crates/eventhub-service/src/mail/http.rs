//! Transport that POSTs messages to an HTTP mail relay.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use eventhub_core::config::MailConfig;
use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_core::traits::{MailMessage, MailTransport};

/// Relay request body.
#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Sends mail through a JSON relay with basic auth.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    username: String,
    password: String,
    from: String,
}

impl HttpMailer {
    /// Create a relay client with the configured timeout.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(AppError::configuration(
                "mail.endpoint is required for the http mail provider",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("EventHub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build mail client", e)
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for HttpMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let body = RelayRequest {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Failed to send mail to {}: {e}", message.to),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(to = %message.to, %status, "Mail relay rejected message");
            return Err(AppError::external_service(format!(
                "Mail relay rejected message to {}: {status}",
                message.to
            )));
        }

        debug!(to = %message.to, "Mail delivered to relay");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
