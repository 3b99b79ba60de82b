//! Process-local store implementing every store trait.
//!
//! All collections sit behind one `tokio::sync::RwLock`. Every write takes
//! the write guard for its whole read-modify-write, which gives the same
//! atomicity the PostgreSQL repositories get from single statements and
//! transactions. Rows are kept in insertion order.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;
use eventhub_core::types::pagination::{PageRequest, PageResponse};
use eventhub_entity::access::in_scopes;
use eventhub_entity::analytics::{CountBucket, EventEngagement, count_by};
use eventhub_entity::comment::{Comment, CommentAuthor, CommentWithAuthor};
use eventhub_entity::event::{
    EngagementKind, Event, EventClock, EventContent, EventStatus, toggle_member,
};
use eventhub_entity::notification::{CreateNotification, Notification};
use eventhub_entity::user::{CreateUser, UpdateUser, User};

use crate::store::{AttendanceOutcome, EventStore, NotificationStore, UserStore};

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    events: Vec<Event>,
    comments: Vec<Comment>,
    notifications: Vec<Notification>,
}

impl MemoryState {
    fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn event(&self, id: Uuid, include_deleted: bool) -> Option<&Event> {
        self.events
            .iter()
            .find(|e| e.id == id && (include_deleted || !e.is_deleted))
    }

    fn event_mut(&mut self, id: Uuid, include_deleted: bool) -> Option<&mut Event> {
        self.events
            .iter_mut()
            .find(|e| e.id == id && (include_deleted || !e.is_deleted))
    }

    fn live_events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| !e.is_deleted)
    }

    fn publish(&mut self, notice: Option<CreateNotification>, now: DateTime<Utc>) {
        if let Some(notice) = notice {
            self.notifications
                .push(Notification::from_create(notice, now));
        }
    }

    /// Notifications newest first, matching `keep`.
    fn notifications_where(&self, keep: impl Fn(&Notification) -> bool) -> Vec<Notification> {
        let mut selected: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| keep(n))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        selected
    }
}

fn in_optional_scopes(access: &str, scopes: Option<&[String]>) -> bool {
    scopes.is_none_or(|scopes| in_scopes(access, scopes))
}

fn sort_by_start(events: &mut [Event]) {
    events.sort_by(|a, b| (a.start_date, &a.start_time).cmp(&(b.start_date, &b.start_time)));
}

/// In-memory backend for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        if state.email_taken(&data.email, None) {
            return Err(AppError::conflict("User already exists, please login"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            department: data.department.clone(),
            role: data.role,
            reset_password_token: None,
            reset_password_expire: None,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self, department: Option<&str>) -> AppResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .filter(|u| department.is_none_or(|d| u.department == d))
            .cloned()
            .collect())
    }

    async fn update_profile(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        let mut state = self.state.write().await;
        if let Some(email) = &data.email {
            if state.email_taken(email, Some(id)) {
                return Err(AppError::conflict("User already exists, please login"));
            }
        }
        let Some(user) = state.user_mut(id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            user.name = name.clone();
        }
        if let Some(department) = &data.department {
            user.department = department.clone();
        }
        if let Some(email) = &data.email {
            user.email = email.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        Ok(state.users.len() < before)
    }

    async fn search_by_email_prefix(&self, prefix: &str, limit: u64) -> AppResult<Vec<User>> {
        let prefix = prefix.to_lowercase();
        let state = self.state.read().await;
        let mut found: Vec<User> = state
            .users
            .iter()
            .filter(|u| u.email.starts_with(&prefix))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.email.cmp(&b.email));
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(user) = state.user_mut(id) {
            user.reset_password_token = Some(digest.to_string());
            user.reset_password_expire = Some(expires_at);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(user) = state.user_mut(id) {
            user.reset_password_token = None;
            user.reset_password_expire = None;
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        digest: &str,
        now: DateTime<Utc>,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        let mut state = self.state.write().await;
        let Some(user) = state.users.iter_mut().find(|u| {
            u.reset_password_token.as_deref() == Some(digest) && u.has_live_reset_token(now)
        }) else {
            return Ok(None);
        };
        user.password_hash = password_hash.to_string();
        user.reset_password_token = None;
        user.reset_password_expire = None;
        user.updated_at = now;
        Ok(Some(user.clone()))
    }

    async fn department_distribution(&self) -> AppResult<Vec<CountBucket>> {
        let state = self.state.read().await;
        Ok(count_by(state.users.iter().map(|u| u.department.clone())))
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create(
        &self,
        content: &EventContent,
        notice: Option<CreateNotification>,
        now: DateTime<Utc>,
    ) -> AppResult<Event> {
        let mut state = self.state.write().await;
        let event = Event::from_content(content.clone(), now);
        state.events.push(event.clone());
        state.publish(notice, now);
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<Event>> {
        let state = self.state.read().await;
        Ok(state.event(id, include_deleted).cloned())
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &EventContent,
        notice: Option<CreateNotification>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Event>> {
        let mut state = self.state.write().await;
        let Some(event) = state.event_mut(id, true) else {
            return Ok(None);
        };
        event.apply_content(content.clone(), now);
        let event = event.clone();
        state.publish(notice, now);
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
        let mut state = self.state.write().await;
        let Some(event) = state.event_mut(id, true) else {
            return Ok(None);
        };
        event.is_deleted = is_deleted;
        event.deleted_at = deleted_at;
        event.updated_at = now;
        let event = event.clone();
        state.publish(notice, now);
        Ok(Some(event))
    }

    async fn list_by_status(
        &self,
        status: EventStatus,
        clock: &EventClock,
    ) -> AppResult<Vec<Event>> {
        let state = self.state.read().await;
        Ok(status.select(state.events.iter().cloned(), clock))
    }

    async fn list_by_access(
        &self,
        scopes: &[String],
        page: PageRequest,
    ) -> AppResult<PageResponse<Event>> {
        let state = self.state.read().await;
        let matching: Vec<&Event> = state
            .live_events()
            .filter(|e| in_scopes(&e.event_access, scopes))
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .rev()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn list_upcoming(&self, today: NaiveDate) -> AppResult<Vec<Event>> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .live_events()
            .filter(|e| e.end_date >= today)
            .cloned()
            .collect();
        sort_by_start(&mut events);
        Ok(events)
    }

    async fn list_on_date(
        &self,
        date: NaiveDate,
        scopes: Option<&[String]>,
    ) -> AppResult<Vec<Event>> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .live_events()
            .filter(|e| e.start_date == date && in_optional_scopes(&e.event_access, scopes))
            .cloned()
            .collect();
        events.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(events)
    }

    async fn list_start_dates(&self, scopes: Option<&[String]>) -> AppResult<Vec<NaiveDate>> {
        let state = self.state.read().await;
        let mut dates: Vec<NaiveDate> = state
            .live_events()
            .filter(|e| in_optional_scopes(&e.event_access, scopes))
            .map(|e| e.start_date)
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    async fn list_engaged_by(&self, kind: EngagementKind, user_id: Uuid) -> AppResult<Vec<Event>> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .live_events()
            .filter(|e| e.engagement(kind).contains(&user_id))
            .cloned()
            .collect();
        sort_by_start(&mut events);
        Ok(events)
    }

    async fn toggle_engagement(
        &self,
        id: Uuid,
        kind: EngagementKind,
        user_id: Uuid,
    ) -> AppResult<Option<Vec<Uuid>>> {
        let mut state = self.state.write().await;
        let Some(event) = state.event_mut(id, false) else {
            return Ok(None);
        };
        toggle_member(event.engagement_mut(kind), user_id);
        event.updated_at = Utc::now();
        Ok(Some(event.engagement(kind).clone()))
    }

    async fn mark_attendance(&self, id: Uuid, email: &str) -> AppResult<AttendanceOutcome> {
        let mut state = self.state.write().await;
        let Some(event) = state.event_mut(id, false) else {
            return Ok(AttendanceOutcome::EventNotFound);
        };
        if event.has_attended(email) {
            return Ok(AttendanceOutcome::AlreadyMarked);
        }
        event.attendance.push(email.to_string());
        event.updated_at = Utc::now();
        Ok(AttendanceOutcome::Marked(event.clone()))
    }

    async fn add_comment(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        text: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Vec<Uuid>>> {
        let mut state = self.state.write().await;
        let comment = Comment {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            text: text.to_string(),
            created_at: now,
        };
        let Some(event) = state.event_mut(event_id, false) else {
            return Ok(None);
        };
        event.comments.push(comment.id);
        event.updated_at = now;
        let comments = event.comments.clone();
        state.comments.push(comment);
        Ok(Some(comments))
    }

    async fn list_comments(&self, event_id: Uuid) -> AppResult<Option<Vec<CommentWithAuthor>>> {
        let state = self.state.read().await;
        if state.event(event_id, false).is_none() {
            return Ok(None);
        }
        let comments = state
            .comments
            .iter()
            .filter(|c| c.event_id == event_id)
            .map(|c| CommentWithAuthor {
                id: c.id,
                text: c.text.clone(),
                created_at: c.created_at,
                user: CommentAuthor {
                    id: c.user_id,
                    name: state
                        .users
                        .iter()
                        .find(|u| u.id == c.user_id)
                        .map(|u| u.name.clone()),
                },
            })
            .collect();
        Ok(Some(comments))
    }

    async fn engagement_summary(&self) -> AppResult<Vec<EventEngagement>> {
        let state = self.state.read().await;
        Ok(state
            .live_events()
            .map(|e| EventEngagement {
                name: e.name.clone(),
                event_access: e.event_access.clone(),
                date: e.start_date,
                registered: e.response_by.len() as i64,
                attended: e.attendance.len() as i64,
                likes: e.liked_by.len() as i64,
                comments: e.comments.len() as i64,
            })
            .collect())
    }

    async fn access_distribution(&self) -> AppResult<Vec<CountBucket>> {
        let state = self.state.read().await;
        Ok(count_by(state.live_events().map(|e| e.event_access.clone())))
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create(
        &self,
        data: &CreateNotification,
        now: DateTime<Utc>,
    ) -> AppResult<Notification> {
        let mut state = self.state.write().await;
        let notification = Notification::from_create(data.clone(), now);
        state.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let state = self.state.read().await;
        Ok(state.notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Notification>> {
        let state = self.state.read().await;
        Ok(state.notifications_where(|_| true))
    }

    async fn list_visible(&self, scopes: &[String]) -> AppResult<Vec<Notification>> {
        let state = self.state.read().await;
        Ok(state.notifications_where(|n| n.is_visible_in(scopes)))
    }

    async fn list_unread(
        &self,
        scopes: &[String],
        user_id: Uuid,
    ) -> AppResult<Vec<Notification>> {
        let state = self.state.read().await;
        Ok(state.notifications_where(|n| n.is_unread_in(scopes, user_id)))
    }

    async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let mut state = self.state.write().await;
        let Some(notification) = state.notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        notification.mark_read(user_id, now);
        Ok(Some(notification.clone()))
    }
}
