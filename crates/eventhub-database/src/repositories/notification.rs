//! Notification repository implementation.
//!
//! Read receipts live in a `jsonb` array of `{userId, readAt}` objects.
//! Containment (`@>`) on `{userId}` decides whether a user has read a row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_entity::notification::{CreateNotification, Notification};

use crate::store::NotificationStore;

/// Repository for notification rows.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert a notification on any executor, so event writes can publish
/// inside their own transaction.
pub(crate) async fn insert_notification<'e, E>(
    executor: E,
    data: &CreateNotification,
    now: DateTime<Utc>,
) -> AppResult<Notification>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Notification>(
        "INSERT INTO notifications (id, name, start_date, start_time, event_access, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&data.name)
    .bind(data.start_date)
    .bind(&data.start_time)
    .bind(&data.event_access)
    .bind(now)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create(
        &self,
        data: &CreateNotification,
        now: DateTime<Utc>,
    ) -> AppResult<Notification> {
        insert_notification(&self.pool, data, now).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    async fn list_all(&self) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications ORDER BY created_at DESC, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    async fn list_visible(&self, scopes: &[String]) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE event_access = ANY($1) \
             ORDER BY created_at DESC, id",
        )
        .bind(scopes.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    async fn list_unread(
        &self,
        scopes: &[String],
        user_id: Uuid,
    ) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE event_access = ANY($1) \
             AND NOT (read_by @> jsonb_build_array(jsonb_build_object('userId', $2::text))) \
             ORDER BY created_at DESC, id",
        )
        .bind(scopes.to_vec())
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list unread notifications", e)
        })
    }

    async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let updated = sqlx::query_as::<_, Notification>(
            "UPDATE notifications \
             SET read_by = read_by || jsonb_build_array( \
                 jsonb_build_object('userId', $2::text, 'readAt', $3::timestamptz)) \
             WHERE id = $1 \
               AND NOT (read_by @> jsonb_build_array(jsonb_build_object('userId', $2::text))) \
             RETURNING *",
        )
        .bind(id)
        .bind(user_id.to_string())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notification read", e)
        })?;

        match updated {
            Some(notification) => Ok(Some(notification)),
            // Already read, or missing.
            None => self.find_by_id(id).await,
        }
    }
}
