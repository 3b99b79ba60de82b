//! Likes, saves, responses, comments, and attendance.

pub mod service;

pub use service::EngagementService;
