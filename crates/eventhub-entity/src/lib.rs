//! # eventhub-entity
//!
//! Domain entity models for EventHub. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`; all of them derive `Serialize` with
//! camelCase field names and `_id` identifiers, the shape the frontend
//! consumes.
//!
//! The rules that do not need a store live here as plain functions:
//! event lifecycle classification, engagement toggling, access-scope
//! visibility, and read-receipt bookkeeping.

pub mod access;
pub mod analytics;
pub mod comment;
pub mod event;
pub mod notification;
pub mod user;
