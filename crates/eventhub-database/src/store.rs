//! Store traits shared by the PostgreSQL repositories and the memory store.
//!
//! Every read that can see events says explicitly whether soft-deleted rows
//! are included. Compound writes (event plus notification, comment plus
//! reference) are atomic in every implementation.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use eventhub_core::config::{DatabaseConfig, DatabaseProvider};
use eventhub_core::result::AppResult;
use eventhub_core::types::pagination::{PageRequest, PageResponse};
use eventhub_entity::analytics::{CountBucket, EventEngagement};
use eventhub_entity::comment::CommentWithAuthor;
use eventhub_entity::event::{EngagementKind, Event, EventClock, EventContent, EventStatus};
use eventhub_entity::notification::{CreateNotification, Notification};
use eventhub_entity::user::{CreateUser, UpdateUser, User};

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{EventRepository, NotificationRepository, UserRepository};

/// Account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + Debug + 'static {
    /// Insert a user. A taken email is a `Conflict`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// All users in creation order, optionally limited to one department.
    async fn list(&self, department: Option<&str>) -> AppResult<Vec<User>>;

    /// Apply a partial profile update. A taken email is a `Conflict`.
    async fn update_profile(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>>;

    /// Remove a user. Returns whether a row existed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Users whose email starts with `prefix`, case-insensitively.
    async fn search_by_email_prefix(&self, prefix: &str, limit: u64) -> AppResult<Vec<User>>;

    /// Store a reset-token digest and its expiry.
    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Drop any outstanding reset token.
    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()>;

    /// Replace the password of the user holding a live token with `digest`,
    /// clearing the token in the same step. `None` when no live token matches.
    async fn consume_reset_token(
        &self,
        digest: &str,
        now: DateTime<Utc>,
        password_hash: &str,
    ) -> AppResult<Option<User>>;

    /// Users per department, largest first.
    async fn department_distribution(&self) -> AppResult<Vec<CountBucket>>;
}

/// Result of a conditional attendance append.
#[derive(Debug, Clone)]
pub enum AttendanceOutcome {
    /// The email was appended.
    Marked(Event),
    /// The email was already present.
    AlreadyMarked,
    /// No live event with that id.
    EventNotFound,
}

/// Event persistence, including engagement, comments, and event analytics.
#[async_trait]
pub trait EventStore: Send + Sync + Debug + 'static {
    /// Insert an event, writing `notice` in the same transaction.
    async fn create(
        &self,
        content: &EventContent,
        notice: Option<CreateNotification>,
        now: DateTime<Utc>,
    ) -> AppResult<Event>;

    /// Find an event by id.
    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<Event>>;

    /// Replace the content of an event (deleted or not), writing `notice` in
    /// the same transaction.
    async fn update_content(
        &self,
        id: Uuid,
        content: &EventContent,
        notice: Option<CreateNotification>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Event>>;

    /// Set the soft-delete flag and timestamp, writing `notice` in the same
    /// transaction.
    async fn set_deleted(
        &self,
        id: Uuid,
        is_deleted: bool,
        deleted_at: Option<DateTime<Utc>>,
        notice: Option<CreateNotification>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Event>>;

    /// Events in a lifecycle status at `clock`.
    async fn list_by_status(
        &self,
        status: EventStatus,
        clock: &EventClock,
    ) -> AppResult<Vec<Event>>;

    /// Live events tagged with one of `scopes`, newest first.
    async fn list_by_access(
        &self,
        scopes: &[String],
        page: PageRequest,
    ) -> AppResult<PageResponse<Event>>;

    /// Live events that have not ended before `today`.
    async fn list_upcoming(&self, today: NaiveDate) -> AppResult<Vec<Event>>;

    /// Live events starting on `date`, optionally narrowed to `scopes`.
    async fn list_on_date(
        &self,
        date: NaiveDate,
        scopes: Option<&[String]>,
    ) -> AppResult<Vec<Event>>;

    /// Distinct start dates of live events, ascending.
    async fn list_start_dates(&self, scopes: Option<&[String]>) -> AppResult<Vec<NaiveDate>>;

    /// Live events whose `kind` collection contains `user_id`.
    async fn list_engaged_by(&self, kind: EngagementKind, user_id: Uuid) -> AppResult<Vec<Event>>;

    /// Flip `user_id` in the `kind` collection of a live event and return
    /// the collection afterwards.
    async fn toggle_engagement(
        &self,
        id: Uuid,
        kind: EngagementKind,
        user_id: Uuid,
    ) -> AppResult<Option<Vec<Uuid>>>;

    /// Append `email` to the attendance of a live event unless present.
    async fn mark_attendance(&self, id: Uuid, email: &str) -> AppResult<AttendanceOutcome>;

    /// Insert a comment and append its id to the event. Returns the event's
    /// comment ids, or `None` when the event is missing or deleted.
    async fn add_comment(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        text: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Vec<Uuid>>>;

    /// Comments of a live event with their authors, oldest first.
    async fn list_comments(&self, event_id: Uuid) -> AppResult<Option<Vec<CommentWithAuthor>>>;

    /// Engagement counts for every live event.
    async fn engagement_summary(&self) -> AppResult<Vec<EventEngagement>>;

    /// Live events per access tag, largest first.
    async fn access_distribution(&self) -> AppResult<Vec<CountBucket>>;
}

/// Notification persistence.
#[async_trait]
pub trait NotificationStore: Send + Sync + Debug + 'static {
    /// Insert an unread notification.
    async fn create(
        &self,
        data: &CreateNotification,
        now: DateTime<Utc>,
    ) -> AppResult<Notification>;

    /// Find a notification by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// Every notification, newest first.
    async fn list_all(&self) -> AppResult<Vec<Notification>>;

    /// Notifications tagged with one of `scopes`, newest first.
    async fn list_visible(&self, scopes: &[String]) -> AppResult<Vec<Notification>>;

    /// Visible notifications without a read receipt from `user_id`.
    async fn list_unread(
        &self,
        scopes: &[String],
        user_id: Uuid,
    ) -> AppResult<Vec<Notification>>;

    /// Add a read receipt unless one exists. `None` when the id is unknown.
    async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Notification>>;
}

/// The three stores the services need, behind trait objects.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Accounts.
    pub users: Arc<dyn UserStore>,
    /// Events, engagement, comments.
    pub events: Arc<dyn EventStore>,
    /// Notifications.
    pub notifications: Arc<dyn NotificationStore>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Open the configured backend, running migrations when asked to.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Ok(Self::postgres(db))
            }
            DatabaseProvider::Memory => {
                info!("Using the in-memory store; data is lost on restart");
                Ok(Self::memory(Arc::new(MemoryStore::new())))
            }
        }
    }

    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            events: Arc::new(EventRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// One memory store serving all three traits.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            events: store.clone(),
            notifications: store,
            pool: None,
        }
    }

    /// Whether the backend answers. The memory store is always healthy.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(db) => db.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}
