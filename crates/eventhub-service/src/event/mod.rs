//! Event administration and listings.

pub mod service;

pub use service::{EventService, ResponseCheck, RespondedEvent};
