//! Admin usage analytics.

pub mod service;

pub use service::AnalyticsService;
