//! Request DTOs with validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use eventhub_entity::event::{EventContent, SoftDelete, UpdateEvent};
use eventhub_entity::notification::CreateNotification;
use eventhub_entity::user::{UpdateUser, UserRole};
use eventhub_service::account::SignupInput;
use eventhub_service::invitation::InvitationRequest;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Department tag.
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    /// Requested role.
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl From<SignupRequest> for SignupInput {
    fn from(req: SignupRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            department: req.department,
            role: req.role,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Account email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Reset-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// The new password.
    #[serde(alias = "password")]
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Profile update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New email.
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            department: req.department,
            email: req.email,
        }
    }
}

/// Invitation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendInvitesRequest {
    /// Event to invite to.
    pub event_id: Uuid,
    /// Recipients.
    #[serde(default)]
    #[validate(length(min = 1, message = "Event ID and email list are required"))]
    pub emails: Vec<String>,
    /// Greeting names by position.
    #[serde(default)]
    pub usernames: Vec<String>,
}

impl From<SendInvitesRequest> for InvitationRequest {
    fn from(req: SendInvitesRequest) -> Self {
        Self {
            event_id: req.event_id,
            emails: req.emails,
            usernames: req.usernames,
        }
    }
}

/// Event create request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Title.
    #[validate(length(min = 1, message = "Event name is required"))]
    pub name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Start time, `HH:MM`.
    pub start_time: String,
    /// Last day.
    pub end_date: NaiveDate,
    /// End time, `HH:MM`.
    pub end_time: String,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// HTML description.
    #[serde(default)]
    pub description: String,
    /// Access scope.
    #[serde(default)]
    pub event_access: String,
}

impl From<CreateEventRequest> for EventContent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            name: req.name,
            start_date: req.start_date,
            start_time: req.start_time,
            end_date: req.end_date,
            end_time: req.end_time,
            thumbnail: req.thumbnail,
            description: req.description,
            event_access: req.event_access,
        }
    }
}

/// Event update request; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    /// Title.
    #[validate(length(min = 1, message = "Event name must not be empty"))]
    pub name: Option<String>,
    /// First day.
    pub start_date: Option<NaiveDate>,
    /// Start time.
    pub start_time: Option<String>,
    /// Last day.
    pub end_date: Option<NaiveDate>,
    /// End time.
    pub end_time: Option<String>,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
    /// HTML description.
    pub description: Option<String>,
    /// Access scope.
    pub event_access: Option<String>,
}

impl From<UpdateEventRequest> for UpdateEvent {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            name: req.name,
            start_date: req.start_date,
            start_time: req.start_time,
            end_date: req.end_date,
            end_time: req.end_time,
            thumbnail: req.thumbnail,
            description: req.description,
            event_access: req.event_access,
        }
    }
}

/// Soft-delete or restore request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SoftDeleteRequest {
    /// Target flag.
    pub is_deleted: bool,
    /// Deletion time; defaults to now when deleting.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<SoftDeleteRequest> for SoftDelete {
    fn from(req: SoftDeleteRequest) -> Self {
        Self {
            is_deleted: req.is_deleted,
            deleted_at: req.deleted_at,
        }
    }
}

/// Like/save/respond body. The user defaults to the caller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Validate)]
pub struct EngagementRequest {
    /// Acting user.
    #[serde(rename = "_id", default)]
    pub user_id: Option<Uuid>,
}

/// Comment body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    /// Author; defaults to the caller.
    #[serde(rename = "_id", default)]
    pub user_id: Option<Uuid>,
    /// Comment text.
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,
}

/// Attendance body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttendanceRequest {
    /// Attendee email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Admin notification broadcast.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    /// Text.
    #[validate(length(min = 1, message = "Notification name is required"))]
    pub name: String,
    /// Event start date.
    pub start_date: NaiveDate,
    /// Event start time.
    pub start_time: String,
    /// Visibility scope.
    #[serde(default)]
    pub event_access: String,
}

impl From<CreateNotificationRequest> for CreateNotification {
    fn from(req: CreateNotificationRequest) -> Self {
        Self {
            name: req.name,
            start_date: req.start_date,
            start_time: req.start_time,
            event_access: req.event_access,
        }
    }
}

/// `?status=` for lifecycle listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusQuery {
    /// Lifecycle status; `all` when absent.
    pub status: Option<String>,
}

/// `?eventAccess=` for scoped listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessQuery {
    /// Scope tag.
    pub event_access: Option<String>,
}

/// `?date=&department=` for the day view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    /// ISO date; a full timestamp is cut to its date.
    pub date: Option<String>,
    /// Department narrowing.
    pub department: Option<String>,
}

/// `?department=` filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentQuery {
    /// Department tag.
    pub department: Option<String>,
}

/// `?userId=` for per-user lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    /// User; defaults to the caller.
    pub user_id: Option<Uuid>,
}

/// `?query=` for email search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Email prefix.
    #[serde(default)]
    pub query: String,
}
