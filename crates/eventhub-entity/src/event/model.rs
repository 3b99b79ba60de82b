//! Event entity model and write payloads.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;

use crate::access::PUBLIC_ACCESS;

use super::engagement::EngagementKind;

/// Longest accepted event name.
const MAX_NAME_LENGTH: usize = 200;

/// An event with its engagement collections.
///
/// Dates and times are stored separately; times are zero-padded `HH:MM`
/// strings so that string order equals chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Event title.
    pub name: String,
    /// First calendar day.
    pub start_date: NaiveDate,
    /// Start time of day, `HH:MM`.
    pub start_time: String,
    /// Last calendar day.
    pub end_date: NaiveDate,
    /// End time of day, `HH:MM`.
    pub end_time: String,
    /// Thumbnail image URL.
    pub thumbnail: Option<String>,
    /// Rich-text (HTML) description.
    pub description: String,
    /// `"Public"` or a department tag.
    pub event_access: String,
    /// Users who liked the event.
    pub liked_by: Vec<Uuid>,
    /// Users who saved the event.
    pub saved_by: Vec<Uuid>,
    /// Users who registered interest (RSVP).
    pub response_by: Vec<Uuid>,
    /// Emails checked in at the venue.
    pub attendance: Vec<String>,
    /// Comment references, in insertion order.
    pub comments: Vec<Uuid>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the event was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Build a fresh, engagement-free event from validated content.
    pub fn from_content(content: EventContent, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: content.name,
            start_date: content.start_date,
            start_time: content.start_time,
            end_date: content.end_date,
            end_time: content.end_time,
            thumbnail: content.thumbnail,
            description: content.description,
            event_access: content.event_access,
            liked_by: Vec::new(),
            saved_by: Vec::new(),
            response_by: Vec::new(),
            attendance: Vec::new(),
            comments: Vec::new(),
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable content fields.
    pub fn apply_content(&mut self, content: EventContent, now: DateTime<Utc>) {
        self.name = content.name;
        self.start_date = content.start_date;
        self.start_time = content.start_time;
        self.end_date = content.end_date;
        self.end_time = content.end_time;
        self.thumbnail = content.thumbnail;
        self.description = content.description;
        self.event_access = content.event_access;
        self.updated_at = now;
    }

    /// The collection backing an engagement kind.
    pub fn engagement(&self, kind: EngagementKind) -> &Vec<Uuid> {
        match kind {
            EngagementKind::Like => &self.liked_by,
            EngagementKind::Save => &self.saved_by,
            EngagementKind::Response => &self.response_by,
        }
    }

    /// Mutable access to the collection backing an engagement kind.
    pub fn engagement_mut(&mut self, kind: EngagementKind) -> &mut Vec<Uuid> {
        match kind {
            EngagementKind::Like => &mut self.liked_by,
            EngagementKind::Save => &mut self.saved_by,
            EngagementKind::Response => &mut self.response_by,
        }
    }

    /// Whether `user_id` has registered interest.
    pub fn has_responded(&self, user_id: Uuid) -> bool {
        self.response_by.contains(&user_id)
    }

    /// Whether `email` has already been checked in.
    pub fn has_attended(&self, email: &str) -> bool {
        self.attendance.iter().any(|e| e.eq_ignore_ascii_case(email))
    }
}

/// The editable content of an event, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContent {
    /// Event title.
    pub name: String,
    /// First calendar day.
    pub start_date: NaiveDate,
    /// Start time of day.
    pub start_time: String,
    /// Last calendar day.
    pub end_date: NaiveDate,
    /// End time of day.
    pub end_time: String,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Rich-text description.
    #[serde(default)]
    pub description: String,
    /// Access scope; defaults to `"Public"`.
    #[serde(default = "default_access")]
    pub event_access: String,
}

impl EventContent {
    /// Validate and normalize the content.
    ///
    /// Trims text, pads times to `HH:MM`, defaults a blank scope to
    /// `"Public"`, and rejects an end that precedes the start.
    pub fn normalized(self) -> AppResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Event name is required"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::validation(format!(
                "Event name must be at most {MAX_NAME_LENGTH} characters"
            )));
        }

        let start_time = normalize_time(&self.start_time)?;
        let end_time = normalize_time(&self.end_time)?;
        if (self.end_date, end_time.as_str()) < (self.start_date, start_time.as_str()) {
            return Err(AppError::validation(
                "Event end must not be before its start",
            ));
        }

        let event_access = match self.event_access.trim() {
            "" => PUBLIC_ACCESS.to_string(),
            scope => scope.to_string(),
        };
        let thumbnail = self
            .thumbnail
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            name,
            start_date: self.start_date,
            start_time,
            end_date: self.end_date,
            end_time,
            thumbnail,
            description: self.description,
            event_access,
        })
    }
}

/// Partial update of an event's content; `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    /// New title.
    pub name: Option<String>,
    /// New first day.
    pub start_date: Option<NaiveDate>,
    /// New start time.
    pub start_time: Option<String>,
    /// New last day.
    pub end_date: Option<NaiveDate>,
    /// New end time.
    pub end_time: Option<String>,
    /// New thumbnail URL.
    pub thumbnail: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New access scope.
    pub event_access: Option<String>,
}

impl UpdateEvent {
    /// Overlay this patch on the current event and validate the result.
    pub fn merge(self, current: &Event) -> AppResult<EventContent> {
        EventContent {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            start_date: self.start_date.unwrap_or(current.start_date),
            start_time: self.start_time.unwrap_or_else(|| current.start_time.clone()),
            end_date: self.end_date.unwrap_or(current.end_date),
            end_time: self.end_time.unwrap_or_else(|| current.end_time.clone()),
            thumbnail: self.thumbnail.or_else(|| current.thumbnail.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            event_access: self
                .event_access
                .unwrap_or_else(|| current.event_access.clone()),
        }
        .normalized()
    }
}

/// Soft-delete or restore request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftDelete {
    /// Target state of the soft-delete flag.
    pub is_deleted: bool,
    /// Deletion timestamp; filled with the current time when deleting
    /// without one, and cleared when restoring.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SoftDelete {
    /// Resolve the timestamp that should be stored.
    pub fn resolved_deleted_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.is_deleted {
            Some(self.deleted_at.unwrap_or(now))
        } else {
            None
        }
    }
}

/// Parse a time of day and render it as zero-padded `HH:MM`.
pub fn normalize_time(value: &str) -> AppResult<String> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| AppError::validation(format!("Invalid time '{value}', expected HH:MM")))
}

fn default_access() -> String {
    PUBLIC_ACCESS.to_string()
}
