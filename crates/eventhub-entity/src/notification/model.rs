//! Notification entity model and read-receipt rules.
//!
//! A notification is a broadcast scoped by access tag. It is visible to a
//! user when its scope is `"Public"` or equals the user's department, and
//! unread while the user's id is absent from `read_by`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::access;
use crate::event::{Event, EventContent};

/// A broadcast record announcing a change to an event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Human-readable description of the change.
    pub name: String,
    /// Start date echoed from the event.
    pub start_date: NaiveDate,
    /// Start time echoed from the event.
    pub start_time: String,
    /// Visibility scope.
    pub event_access: String,
    /// Per-user read receipts.
    #[sqlx(json)]
    pub read_by: Vec<ReadReceipt>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Records that a user has seen a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadReceipt {
    /// Reader.
    pub user_id: Uuid,
    /// When it was marked read.
    pub read_at: DateTime<Utc>,
}

impl Notification {
    /// Build a new, unread notification.
    pub fn from_create(data: CreateNotification, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            start_date: data.start_date,
            start_time: data.start_time,
            event_access: data.event_access,
            read_by: Vec::new(),
            created_at: now,
        }
    }

    /// Whether this notification falls inside `scopes`.
    pub fn is_visible_in(&self, scopes: &[String]) -> bool {
        access::in_scopes(&self.event_access, scopes)
    }

    /// Whether `user_id` has a read receipt.
    pub fn is_read_by(&self, user_id: Uuid) -> bool {
        self.read_by.iter().any(|r| r.user_id == user_id)
    }

    /// Inside `scopes` and not yet read by `user_id`.
    pub fn is_unread_in(&self, scopes: &[String], user_id: Uuid) -> bool {
        self.is_visible_in(scopes) && !self.is_read_by(user_id)
    }

    /// Append a read receipt unless one exists. Returns whether anything changed.
    pub fn mark_read(&mut self, user_id: Uuid, at: DateTime<Utc>) -> bool {
        if self.is_read_by(user_id) {
            return false;
        }
        self.read_by.push(ReadReceipt {
            user_id,
            read_at: at,
        });
        true
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotification {
    /// Description of the change.
    pub name: String,
    /// Start date of the event concerned.
    pub start_date: NaiveDate,
    /// Start time of the event concerned.
    pub start_time: String,
    /// Visibility scope.
    pub event_access: String,
}

/// The kind of event change a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventChange {
    /// A new event was published.
    Created,
    /// An event's content changed.
    Updated,
    /// An event was soft-deleted.
    Cancelled,
}

impl CreateNotification {
    /// Describe a change to `event`, scoped like the event itself.
    pub fn for_event(event: &Event, change: EventChange) -> Self {
        Self::describe(
            &event.name,
            event.start_date,
            &event.start_time,
            &event.event_access,
            change,
        )
    }

    /// Describe a change whose resulting content is `content`.
    pub fn for_content(content: &EventContent, change: EventChange) -> Self {
        Self::describe(
            &content.name,
            content.start_date,
            &content.start_time,
            &content.event_access,
            change,
        )
    }

    fn describe(
        name: &str,
        start_date: NaiveDate,
        start_time: &str,
        event_access: &str,
        change: EventChange,
    ) -> Self {
        let name = match change {
            EventChange::Created => format!("New event: {name}"),
            EventChange::Updated => format!("Event updated: {name}"),
            EventChange::Cancelled => format!("Event cancelled: {name}"),
        };
        Self {
            name,
            start_date,
            start_time: start_time.to_string(),
            event_access: event_access.to_string(),
        }
    }
}
