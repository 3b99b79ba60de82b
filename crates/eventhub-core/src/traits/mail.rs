//! Outbound mail transport trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Trait for mail delivery backends (log sink, HTTP relay, test recorder).
#[async_trait]
pub trait MailTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver one message. Implementations do not retry.
    async fn send(&self, message: &MailMessage) -> AppResult<()>;

    /// Short name of the backend, for logs.
    fn name(&self) -> &'static str;
}
