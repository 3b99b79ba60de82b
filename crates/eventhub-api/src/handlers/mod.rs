//! Route handlers organized by domain.

pub mod analytics;
pub mod auth;
pub mod engagement;
pub mod event;
pub mod health;
pub mod notification;
pub mod user;
