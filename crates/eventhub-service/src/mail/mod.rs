//! Outbound mail transports.

pub mod http;
pub mod log;

use std::sync::Arc;

use eventhub_core::config::{MailConfig, MailProvider};
use eventhub_core::result::AppResult;
use eventhub_core::traits::MailTransport;

pub use self::http::HttpMailer;
pub use self::log::LogMailer;

/// Build the transport selected by `mail.provider`.
pub fn build_transport(config: &MailConfig) -> AppResult<Arc<dyn MailTransport>> {
    Ok(match config.provider {
        MailProvider::Log => Arc::new(LogMailer::new(config)),
        MailProvider::Http => Arc::new(HttpMailer::new(config)?),
    })
}
