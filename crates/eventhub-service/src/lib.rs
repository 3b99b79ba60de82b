//! # eventhub-service
//!
//! Business logic service layer for EventHub. Each service orchestrates
//! the store traits, the credential helpers from `eventhub-auth`, and the
//! mail transport to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod analytics;
pub mod context;
pub mod engagement;
pub mod event;
pub mod invitation;
pub mod mail;
pub mod notification;

pub use account::{AuthService, UserService};
pub use analytics::AnalyticsService;
pub use context::RequestContext;
pub use engagement::EngagementService;
pub use event::EventService;
pub use invitation::InvitationService;
pub use notification::NotificationService;

#[cfg(test)]
pub(crate) mod testing;
