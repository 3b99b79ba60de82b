//! # eventhub-database
//!
//! Persistence for EventHub. The services depend only on the store traits
//! in [`store`]; two implementations exist:
//!
//! - [`repositories`]: PostgreSQL via `sqlx`, one repository per table.
//! - [`memory`]: a process-local store used for development and tests.
//!
//! [`Stores::connect`] picks one from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{AttendanceOutcome, EventStore, NotificationStore, Stores, UserStore};
