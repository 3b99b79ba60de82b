//! # eventhub-api
//!
//! HTTP API layer for EventHub built on Axum.
//!
//! Provides the REST endpoints, the cookie-based access-control gate
//! (as extractors), request logging and CORS middleware, DTOs, and the
//! mapping from `AppError` to the JSON error envelope.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
