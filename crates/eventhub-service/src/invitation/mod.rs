//! Event invitation mail.

pub mod service;
pub mod template;

pub use service::{InvitationReceipt, InvitationRequest, InvitationService};
pub use template::Invitation;
