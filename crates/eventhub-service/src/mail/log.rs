//! Transport that writes messages to the log instead of sending them.

use async_trait::async_trait;
use tracing::info;

use eventhub_core::config::MailConfig;
use eventhub_core::result::AppResult;
use eventhub_core::traits::{MailMessage, MailTransport};

/// Development transport: every message becomes one `info` record.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    /// Create a log transport using the configured sender.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            from: config.from.clone(),
        }
    }
}

#[async_trait]
impl MailTransport for LogMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            html_bytes = message.html.len(),
            "Mail not sent (log transport)"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
