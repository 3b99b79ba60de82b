//! Engagement writes on events.
//!
//! Every write here is a single store primitive, so concurrent toggles by
//! different users never lose each other's updates.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use eventhub_core::error::AppError;
use eventhub_database::{AttendanceOutcome, EventStore};
use eventhub_entity::comment::{CommentWithAuthor, normalize_comment};
use eventhub_entity::event::{EngagementKind, Event};

use crate::account::validation::normalize_email;
use crate::context::RequestContext;

/// Handles toggles, comments, and attendance.
#[derive(Debug, Clone)]
pub struct EngagementService {
    events: Arc<dyn EventStore>,
}

impl EngagementService {
    /// Creates a new engagement service.
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    /// Flip membership of the acting user in one collection and return the
    /// collection afterwards.
    ///
    /// `user_id` defaults to the caller; naming someone else requires admin.
    pub async fn toggle(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        kind: EngagementKind,
        user_id: Option<Uuid>,
    ) -> Result<Vec<Uuid>, AppError> {
        let user_id = ctx.acting_user(user_id)?;
        let members = self
            .events
            .toggle_engagement(event_id, kind, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        info!(
            event_id = %event_id,
            user_id = %user_id,
            kind = %kind,
            member = members.contains(&user_id),
            "Engagement toggled"
        );
        Ok(members)
    }

    /// Post a comment and return the event's comment ids.
    ///
    /// The author defaults to the caller, like the toggles.
    pub async fn comment(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        user_id: Option<Uuid>,
        text: &str,
    ) -> Result<Vec<Uuid>, AppError> {
        let user_id = ctx.acting_user(user_id)?;
        let text = normalize_comment(text)?;
        let comments = self
            .events
            .add_comment(event_id, user_id, &text, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        info!(event_id = %event_id, user_id = %user_id, "Comment added");
        Ok(comments)
    }

    /// Comments on an event, oldest first.
    pub async fn list_comments(&self, event_id: Uuid) -> Result<Vec<CommentWithAuthor>, AppError> {
        self.events
            .list_comments(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    /// Check an attendee in by email (admin).
    pub async fn mark_attendance(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        email: &str,
    ) -> Result<Event, AppError> {
        ctx.require_admin()?;
        let email = normalize_email(email)?;

        match self.events.mark_attendance(event_id, &email).await? {
            AttendanceOutcome::Marked(event) => {
                info!(event_id = %event_id, actor = %ctx.user_id, "Attendance marked");
                Ok(event)
            }
            AttendanceOutcome::AlreadyMarked => {
                Err(AppError::conflict("Attendance already marked for this email"))
            }
            AttendanceOutcome::EventNotFound => Err(AppError::not_found("Event not found")),
        }
    }
}
