//! Notification listing and read tracking.

pub mod service;

pub use service::{NotificationList, NotificationService};
