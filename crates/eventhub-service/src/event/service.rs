//! Event CRUD, lifecycle listings, and per-user event lists.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use eventhub_core::config::EventsConfig;
use eventhub_core::error::AppError;
use eventhub_core::types::pagination::{PageRequest, PageResponse};
use eventhub_database::EventStore;
use eventhub_entity::access::scopes_for;
use eventhub_entity::event::{
    EngagementKind, Event, EventClock, EventContent, EventStatus, SoftDelete, UpdateEvent,
};
use eventhub_entity::notification::{CreateNotification, EventChange};

use crate::context::RequestContext;

/// Answer to "has this user responded to this event".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCheck {
    /// Whether the user is in the event's responders.
    pub has_responded: bool,
    /// The event summary.
    pub event: RespondedEvent,
}

/// Event fields echoed by a response check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondedEvent {
    /// Event id.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Event title.
    pub name: String,
    /// Every responder.
    pub response_by: Vec<Uuid>,
}

/// Manages events and their notifications.
#[derive(Debug, Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    config: EventsConfig,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(events: Arc<dyn EventStore>, config: EventsConfig) -> Self {
        Self { events, config }
    }

    /// The reference clock for lifecycle decisions.
    pub fn clock(&self) -> EventClock {
        EventClock::at(Utc::now(), self.config.reference_offset())
    }

    /// Publish a new event (admin).
    pub async fn create(
        &self,
        ctx: &RequestContext,
        content: EventContent,
    ) -> Result<Event, AppError> {
        ctx.require_admin()?;
        let content = content.normalized()?;
        let notice = CreateNotification::for_content(&content, EventChange::Created);

        let event = self.events.create(&content, Some(notice), Utc::now()).await?;
        info!(event_id = %event.id, actor = %ctx.user_id, access = %event.event_access, "Event created");
        Ok(event)
    }

    /// Apply a partial update (admin). Deleted events can be edited too.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: UpdateEvent,
    ) -> Result<Event, AppError> {
        ctx.require_admin()?;
        let current = self.find_any(id).await?;
        let content = patch.merge(&current)?;
        let notice = CreateNotification::for_content(&content, EventChange::Updated);

        let event = self
            .events
            .update_content(id, &content, Some(notice), Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        info!(event_id = %id, actor = %ctx.user_id, "Event updated");
        Ok(event)
    }

    /// Soft-delete or restore an event (admin).
    ///
    /// A cancellation notice goes out only when the event moves from live
    /// to deleted.
    pub async fn soft_delete(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        request: SoftDelete,
    ) -> Result<Event, AppError> {
        ctx.require_admin()?;
        let current = self.find_any(id).await?;
        let now = Utc::now();

        let notice = (request.is_deleted && !current.is_deleted)
            .then(|| CreateNotification::for_event(&current, EventChange::Cancelled));

        let event = self
            .events
            .set_deleted(
                id,
                request.is_deleted,
                request.resolved_deleted_at(now),
                notice,
                now,
            )
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        info!(
            event_id = %id,
            actor = %ctx.user_id,
            is_deleted = event.is_deleted,
            "Event soft-delete flag changed"
        );
        Ok(event)
    }

    /// Delete an event (admin). Deletion is always soft.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<Event, AppError> {
        self.soft_delete(
            ctx,
            id,
            SoftDelete {
                is_deleted: true,
                deleted_at: None,
            },
        )
        .await
    }

    async fn find_any(&self, id: Uuid) -> Result<Event, AppError> {
        self.events
            .find_by_id(id, true)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    /// A live (non-deleted) event.
    pub async fn get(&self, id: Uuid) -> Result<Event, AppError> {
        self.events
            .find_by_id(id, false)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    /// Events in `status` at the current reference time.
    pub async fn list_by_status(&self, status: EventStatus) -> Result<Vec<Event>, AppError> {
        self.events.list_by_status(status, &self.clock()).await
    }

    /// One page of events visible under `scope`.
    pub async fn list_by_access(
        &self,
        scope: Option<&str>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<PageResponse<Event>, AppError> {
        let scope = scope.map(str::trim).unwrap_or_default();
        if scope.is_empty() {
            return Err(AppError::validation("eventAccess parameter is required"));
        }
        let request = PageRequest::new(
            page.unwrap_or(1),
            limit.unwrap_or(self.config.default_page_limit),
            self.config.max_page_limit,
        );
        self.events.list_by_access(&scopes_for(scope), request).await
    }

    /// Events that have not ended yet.
    pub async fn upcoming(&self) -> Result<Vec<Event>, AppError> {
        self.events.list_upcoming(self.clock().today).await
    }

    /// Events starting on `date`, optionally narrowed to a department.
    pub async fn on_date(
        &self,
        date: NaiveDate,
        department: Option<&str>,
    ) -> Result<Vec<Event>, AppError> {
        let scopes = department_scopes(department);
        self.events.list_on_date(date, scopes.as_deref()).await
    }

    /// Distinct start dates for the calendar view.
    pub async fn start_dates(&self, department: Option<&str>) -> Result<Vec<NaiveDate>, AppError> {
        let scopes = department_scopes(department);
        self.events.list_start_dates(scopes.as_deref()).await
    }

    /// Events liked by `user_id`.
    pub async fn liked_by(&self, user_id: Uuid) -> Result<Vec<Event>, AppError> {
        self.events.list_engaged_by(EngagementKind::Like, user_id).await
    }

    /// Events saved by `user_id`.
    pub async fn saved_by(&self, user_id: Uuid) -> Result<Vec<Event>, AppError> {
        self.events.list_engaged_by(EngagementKind::Save, user_id).await
    }

    /// Whether `user_id` has responded to `event_id`.
    pub async fn check_response(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<ResponseCheck, AppError> {
        let event = self.get(event_id).await?;
        Ok(ResponseCheck {
            has_responded: event.has_responded(user_id),
            event: RespondedEvent {
                id: event.id,
                name: event.name,
                response_by: event.response_by,
            },
        })
    }
}

fn department_scopes(department: Option<&str>) -> Option<Vec<String>> {
    department
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(scopes_for)
}
