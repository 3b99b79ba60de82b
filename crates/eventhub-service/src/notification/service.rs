//! Notification reads, admin broadcasts, and per-user read receipts.
//!
//! Visibility is decided by the reader's department as stored, not as
//! carried in their session token.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use eventhub_core::error::AppError;
use eventhub_database::{NotificationStore, UserStore};
use eventhub_entity::access::{PUBLIC_ACCESS, scopes_for};
use eventhub_entity::event::normalize_time;
use eventhub_entity::notification::{CreateNotification, Notification};

use crate::context::RequestContext;

/// A notification listing with its size.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationList {
    /// Number of items.
    pub count: usize,
    /// The notifications, newest first.
    pub items: Vec<Notification>,
}

impl From<Vec<Notification>> for NotificationList {
    fn from(items: Vec<Notification>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Manages notifications and read receipts.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
    users: Arc<dyn UserStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            notifications,
            users,
        }
    }

    /// Every notification.
    pub async fn list_all(&self) -> Result<NotificationList, AppError> {
        Ok(self.notifications.list_all().await?.into())
    }

    /// Broadcast a notification (admin).
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateNotification,
    ) -> Result<Notification, AppError> {
        ctx.require_admin()?;
        let name = data.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Notification name is required"));
        }
        let event_access = match data.event_access.trim() {
            "" => PUBLIC_ACCESS.to_string(),
            scope => scope.to_string(),
        };
        let data = CreateNotification {
            name,
            start_date: data.start_date,
            start_time: normalize_time(&data.start_time)?,
            event_access,
        };

        let notification = self.notifications.create(&data, Utc::now()).await?;
        info!(notification_id = %notification.id, actor = %ctx.user_id, "Notification created");
        Ok(notification)
    }

    /// One notification by id.
    pub async fn get(&self, id: Uuid) -> Result<Notification, AppError> {
        self.notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Notifications visible to `user_id`.
    pub async fn list_for_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<NotificationList, AppError> {
        let scopes = self.scopes_of(ctx, user_id).await?;
        Ok(self.notifications.list_visible(&scopes).await?.into())
    }

    /// Visible notifications `user_id` has not read.
    pub async fn unread_for_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<NotificationList, AppError> {
        let scopes = self.scopes_of(ctx, user_id).await?;
        Ok(self.notifications.list_unread(&scopes, user_id).await?.into())
    }

    /// Record that the caller has read `id`. Repeating this is harmless.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Notification, AppError> {
        let notification = self
            .notifications
            .mark_read(id, ctx.user_id, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        info!(notification_id = %id, user_id = %ctx.user_id, "Notification marked read");
        Ok(notification)
    }

    async fn scopes_of(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<String>, AppError> {
        ctx.require_self_or_admin(user_id)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        Ok(scopes_for(&user.department))
    }
}
