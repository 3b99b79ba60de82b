//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email, stored lower-cased and unique.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Department tag, used as the access scope for events and notifications.
    pub department: String,
    /// Role, fixed at signup.
    pub role: UserRole,
    /// SHA-256 hex digest of the outstanding password-reset token.
    #[serde(skip_serializing, default)]
    pub reset_password_token: Option<String>,
    /// When the outstanding password-reset token stops being accepted.
    #[serde(skip_serializing, default)]
    pub reset_password_expire: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether a reset token digest is stored and still within its lifetime.
    pub fn has_live_reset_token(&self, now: DateTime<Utc>) -> bool {
        self.reset_password_token.is_some()
            && self.reset_password_expire.is_some_and(|exp| exp > now)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Login email (lower-cased by the caller).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Department tag.
    pub department: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Partial profile update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name.
    pub name: Option<String>,
    /// New department tag.
    pub department: Option<String>,
    /// New login email.
    pub email: Option<String>,
}

impl UpdateUser {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.department.is_none() && self.email.is_none()
    }
}
