//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eventhub_core::types::pagination::PageResponse;
use eventhub_entity::event::Event;
use eventhub_entity::user::User;
use eventhub_service::RequestContext;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Signup and login result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session token (also set as a cookie).
    pub token: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
}

impl SessionResponse {
    /// Summarize a signed-in user.
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Whether the store answered.
    pub database: bool,
}

/// `{userId}` lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdResponse {
    /// The user's id.
    pub user_id: Uuid,
}

/// `{department}` lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentResponse {
    /// The user's department.
    pub department: String,
}

/// Page metadata for scoped event listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// 1-based page number.
    pub current_page: u64,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
    /// Matches across all pages.
    pub total_events: u64,
    /// Page size.
    pub limit: u64,
}

/// One page of events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPageResponse {
    /// Events on this page.
    pub events: Vec<Event>,
    /// Page metadata.
    pub pagination: PaginationMeta,
}

impl From<PageResponse<Event>> for EventPageResponse {
    fn from(page: PageResponse<Event>) -> Self {
        Self {
            pagination: PaginationMeta {
                current_page: page.page,
                total_pages: page.total_pages,
                total_events: page.total_items,
                limit: page.limit,
            },
            events: page.items,
        }
    }
}

/// The signed-in caller, as carried by the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    /// User id.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Department tag.
    pub department: String,
    /// Role.
    pub role: String,
}

impl From<&RequestContext> for CurrentUserResponse {
    fn from(ctx: &RequestContext) -> Self {
        Self {
            id: ctx.user_id,
            email: ctx.email.clone(),
            name: ctx.name.clone(),
            department: ctx.department.clone(),
            role: ctx.role.to_string(),
        }
    }
}
