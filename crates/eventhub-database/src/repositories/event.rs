//! Event repository implementation.
//!
//! Engagement collections are PostgreSQL arrays. Toggles, attendance and
//! comment appends are single conditional statements, so concurrent writers
//! never overwrite each other's members.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::pagination::{PageRequest, PageResponse};
use eventhub_entity::analytics::{CountBucket, EventEngagement};
use eventhub_entity::comment::{CommentAuthor, CommentWithAuthor};
use eventhub_entity::event::{EngagementKind, Event, EventClock, EventContent, EventStatus};
use eventhub_entity::notification::CreateNotification;

use super::notification::insert_notification;
use crate::store::{AttendanceOutcome, EventStore};

/// `start <= now` at the bound clock (`$1` date, `$2` time).
const STARTED: &str = "(start_date < $1 OR (start_date = $1 AND start_time <= $2))";
/// `end <= now` at the bound clock.
const ENDED: &str = "(end_date < $1 OR (end_date = $1 AND end_time <= $2))";

/// Repository for event rows and their comments.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A comment joined with its author's current name.
#[derive(Debug, FromRow)]
struct CommentRow {
    id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
    user_id: Uuid,
    user_name: Option<String>,
}

impl From<CommentRow> for CommentWithAuthor {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            created_at: row.created_at,
            user: CommentAuthor {
                id: row.user_id,
                name: row.user_name,
            },
        }
    }
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

#[async_trait]
impl EventStore for EventRepository {
    async fn create(
        &self,
        content: &EventContent,
        notice: Option<CreateNotification>,
        now: DateTime<Utc>,
    ) -> AppResult<Event> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let event = sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, name, start_date, start_time, end_date, end_time, \
                thumbnail, description, event_access, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&content.name)
        .bind(content.start_date)
        .bind(&content.start_time)
        .bind(content.end_date)
        .bind(&content.end_time)
        .bind(&content.thumbnail)
        .bind(&content.description)
        .bind(&content.event_access)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to create event"))?;

        if let Some(notice) = notice {
            insert_notification(&mut *tx, &notice, now).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit event creation"))?;
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE id = $1 AND ($2 OR is_deleted = FALSE)",
        )
        .bind(id)
        .bind(include_deleted)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find event"))
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &EventContent,
        notice: Option<CreateNotification>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Event>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let event = sqlx::query_as::<_, Event>(
            "UPDATE events SET name = $2, start_date = $3, start_time = $4, end_date = $5, \
                end_time = $6, thumbnail = $7, description = $8, event_access = $9, \
                updated_at = $10 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&content.name)
        .bind(content.start_date)
        .bind(&content.start_time)
        .bind(content.end_date)
        .bind(&content.end_time)
        .bind(&content.thumbnail)
        .bind(&content.description)
        .bind(&content.event_access)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to update event"))?;

        let Some(event) = event else {
            return Ok(None);
        };
        if let Some(notice) = notice {
            insert_notification(&mut *tx, &notice, now).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit event update"))?;
        Ok(Some(event))
    }

    async fn set_deleted(
        &self,
        id: Uuid,
        is_deleted: bool,
        deleted_at: Option<DateTime<Utc>>,
        notice: Option<CreateNotification>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Event>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let event = sqlx::query_as::<_, Event>(
            "UPDATE events SET is_deleted = $2, deleted_at = $3, updated_at = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_deleted)
        .bind(deleted_at)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to update event deletion state"))?;

        let Some(event) = event else {
            return Ok(None);
        };
        if let Some(notice) = notice {
            insert_notification(&mut *tx, &notice, now).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit event deletion"))?;
        Ok(Some(event))
    }

    async fn list_by_status(
        &self,
        status: EventStatus,
        clock: &EventClock,
    ) -> AppResult<Vec<Event>> {
        let filter = match status {
            EventStatus::Cancelled => {
                return sqlx::query_as::<_, Event>(
                    "SELECT * FROM events WHERE is_deleted = TRUE ORDER BY created_at, id",
                )
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("Failed to list cancelled events"));
            }
            EventStatus::All => {
                return sqlx::query_as::<_, Event>(
                    "SELECT * FROM events WHERE is_deleted = FALSE ORDER BY created_at, id",
                )
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("Failed to list events"));
            }
            EventStatus::Live => format!("{STARTED} AND NOT {ENDED}"),
            EventStatus::Past => ENDED.to_string(),
            EventStatus::Future => format!("NOT {STARTED}"),
        };

        let sql = format!(
            "SELECT * FROM events WHERE is_deleted = FALSE AND {filter} \
             ORDER BY start_date, start_time, created_at"
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(clock.today)
            .bind(&clock.now)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list events by status"))
    }

    async fn list_by_access(
        &self,
        scopes: &[String],
        page: PageRequest,
    ) -> AppResult<PageResponse<Event>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM events WHERE is_deleted = FALSE AND event_access = ANY($1)",
        )
        .bind(scopes.to_vec())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count events"))?;

        let limit = i64::try_from(page.limit)
            .map_err(|_| AppError::validation("Page limit is out of range"))?;
        let offset = i64::try_from(page.offset())
            .map_err(|_| AppError::validation("Page is out of range"))?;
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE is_deleted = FALSE AND event_access = ANY($1) \
             ORDER BY created_at DESC, id LIMIT $2 OFFSET $3",
        )
        .bind(scopes.to_vec())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list events by access"))?;

        Ok(PageResponse::new(events, page, u64::try_from(total).unwrap_or_default()))
    }

    async fn list_upcoming(&self, today: NaiveDate) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE is_deleted = FALSE AND end_date >= $1 \
             ORDER BY start_date, start_time",
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list upcoming events"))
    }

    async fn list_on_date(
        &self,
        date: NaiveDate,
        scopes: Option<&[String]>,
    ) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE is_deleted = FALSE AND start_date = $1 \
             AND ($2::text[] IS NULL OR event_access = ANY($2)) \
             ORDER BY start_time, created_at",
        )
        .bind(date)
        .bind(scopes.map(<[String]>::to_vec))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list events by date"))
    }

    async fn list_start_dates(&self, scopes: Option<&[String]>) -> AppResult<Vec<NaiveDate>> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT DISTINCT start_date FROM events WHERE is_deleted = FALSE \
             AND ($1::text[] IS NULL OR event_access = ANY($1)) ORDER BY start_date",
        )
        .bind(scopes.map(<[String]>::to_vec))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list event dates"))
    }

    async fn list_engaged_by(&self, kind: EngagementKind, user_id: Uuid) -> AppResult<Vec<Event>> {
        let sql = format!(
            "SELECT * FROM events WHERE is_deleted = FALSE AND $1 = ANY({col}) \
             ORDER BY start_date, start_time",
            col = kind.column()
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list engaged events"))
    }

    async fn toggle_engagement(
        &self,
        id: Uuid,
        kind: EngagementKind,
        user_id: Uuid,
    ) -> AppResult<Option<Vec<Uuid>>> {
        let sql = format!(
            "UPDATE events SET \
                {col} = CASE WHEN $2 = ANY({col}) THEN array_remove({col}, $2) \
                             ELSE array_append({col}, $2) END, \
                updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING {col}",
            col = kind.column()
        );
        sqlx::query_scalar::<_, Vec<Uuid>>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to toggle engagement"))
    }

    async fn mark_attendance(&self, id: Uuid, email: &str) -> AppResult<AttendanceOutcome> {
        let marked = sqlx::query_as::<_, Event>(
            "UPDATE events SET attendance = array_append(attendance, $2), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE AND NOT ($2 = ANY(attendance)) \
             RETURNING *",
        )
        .bind(id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to mark attendance"))?;

        if let Some(event) = marked {
            return Ok(AttendanceOutcome::Marked(event));
        }
        Ok(match self.find_by_id(id, false).await? {
            Some(_) => AttendanceOutcome::AlreadyMarked,
            None => AttendanceOutcome::EventNotFound,
        })
    }

    async fn add_comment(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        text: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Vec<Uuid>>> {
        let comment_id = Uuid::new_v4();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let comments = sqlx::query_scalar::<_, Vec<Uuid>>(
            "UPDATE events SET comments = array_append(comments, $2), updated_at = $3 \
             WHERE id = $1 AND is_deleted = FALSE RETURNING comments",
        )
        .bind(event_id)
        .bind(comment_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to attach comment"))?;

        let Some(comments) = comments else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO comments (id, user_id, event_id, text, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(comment_id)
        .bind(user_id)
        .bind(event_id)
        .bind(text)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to create comment"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit comment"))?;
        Ok(Some(comments))
    }

    async fn list_comments(&self, event_id: Uuid) -> AppResult<Option<Vec<CommentWithAuthor>>> {
        if self.find_by_id(event_id, false).await?.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT c.id, c.text, c.created_at, c.user_id, u.name AS user_name \
             FROM comments c LEFT JOIN users u ON u.id = c.user_id \
             WHERE c.event_id = $1 ORDER BY c.created_at, c.id",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list comments"))?;

        Ok(Some(rows.into_iter().map(CommentWithAuthor::from).collect()))
    }

    async fn engagement_summary(&self) -> AppResult<Vec<EventEngagement>> {
        sqlx::query_as::<_, EventEngagement>(
            "SELECT name, event_access, start_date AS date, \
                cardinality(response_by)::BIGINT AS registered, \
                cardinality(attendance)::BIGINT AS attended, \
                cardinality(liked_by)::BIGINT AS likes, \
                cardinality(comments)::BIGINT AS comments \
             FROM events WHERE is_deleted = FALSE ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to summarize event engagement"))
    }

    async fn access_distribution(&self) -> AppResult<Vec<CountBucket>> {
        sqlx::query_as::<_, CountBucket>(
            "SELECT event_access AS name, COUNT(*) AS value FROM events \
             WHERE is_deleted = FALSE GROUP BY event_access ORDER BY value DESC, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to count events by access"))
    }
}
