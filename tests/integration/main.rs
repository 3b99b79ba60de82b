//! HTTP-level integration tests over the in-memory store.

mod helpers;

mod analytics_test;
mod auth_test;
mod event_test;
mod notification_test;
