//! Core traits defined in `eventhub-core` and implemented by other crates.

pub mod mail;

pub use mail::{MailMessage, MailTransport};
