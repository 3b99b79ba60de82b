//! Aggregations over users and events for the admin dashboard.

use std::sync::Arc;

use uuid::Uuid;

use eventhub_core::error::AppError;
use eventhub_database::{EventStore, UserStore};
use eventhub_entity::analytics::{CountBucket, EventEngagement};
use eventhub_entity::user::User;

use crate::context::RequestContext;

/// Read-only aggregations; every operation requires admin.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    users: Arc<dyn UserStore>,
    events: Arc<dyn EventStore>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(users: Arc<dyn UserStore>, events: Arc<dyn EventStore>) -> Self {
        Self { users, events }
    }

    /// Users per department, largest first.
    pub async fn departments(&self, ctx: &RequestContext) -> Result<Vec<CountBucket>, AppError> {
        ctx.require_admin()?;
        self.users.department_distribution().await
    }

    /// Per-event engagement counts for live events.
    pub async fn events(&self, ctx: &RequestContext) -> Result<Vec<EventEngagement>, AppError> {
        ctx.require_admin()?;
        self.events.engagement_summary().await
    }

    /// Live events per access tag, largest first.
    pub async fn event_types(&self, ctx: &RequestContext) -> Result<Vec<CountBucket>, AppError> {
        ctx.require_admin()?;
        self.events.access_distribution().await
    }

    /// Users, optionally limited to one department.
    pub async fn users(
        &self,
        ctx: &RequestContext,
        department: Option<&str>,
    ) -> Result<Vec<User>, AppError> {
        ctx.require_admin()?;
        let department = department.map(str::trim).filter(|d| !d.is_empty());
        self.users.list(department).await
    }

    /// One user.
    pub async fn user(&self, ctx: &RequestContext, id: Uuid) -> Result<User, AppError> {
        ctx.require_admin()?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
