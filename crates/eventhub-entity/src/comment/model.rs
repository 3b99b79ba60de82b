//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;

/// Longest accepted comment, in characters.
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// A note left on an event. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Author.
    pub user_id: Uuid,
    /// Event the comment belongs to.
    pub event_id: Uuid,
    /// Comment body.
    pub text: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
}

/// The author fields shown next to a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    /// Author id.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Author display name; `None` when the account no longer exists.
    pub name: Option<String>,
}

/// A comment joined with its author, as listed under an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    /// Comment id.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Comment body.
    pub text: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
    /// Author summary.
    pub user: CommentAuthor,
}

/// Trim a comment body and enforce its length bounds.
pub fn normalize_comment(text: &str) -> AppResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::validation("Comment text is required"));
    }
    if text.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::validation(format!(
            "Comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(text.to_string())
}
