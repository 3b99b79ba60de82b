//! Core type definitions used across the EventHub workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
