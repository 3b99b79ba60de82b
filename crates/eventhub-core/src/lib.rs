//! # eventhub-core
//!
//! Core crate for EventHub. Contains configuration schemas, the unified
//! error system, pagination types, and the outbound mail transport trait.
//!
//! This crate has **no** internal dependencies on other EventHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
