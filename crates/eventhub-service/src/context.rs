//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eventhub_auth::jwt::Claims;
use eventhub_core::error::AppError;
use eventhub_entity::user::UserRole;

/// Message for operations restricted to admins.
pub const ADMIN_REQUIRED: &str = "Forbidden: Admin access required";

/// Context for the current authenticated request.
///
/// Built from verified session claims by the API layer and passed into
/// service methods so that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's user id.
    pub user_id: Uuid,
    /// Login email at token issuance.
    pub email: String,
    /// Display name at token issuance.
    pub name: String,
    /// Department at token issuance.
    pub department: String,
    /// Role at token issuance.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Build a context from verified claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.id,
            email: claims.email.clone(),
            name: claims.name.clone(),
            department: claims.department.clone(),
            role: claims.role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fail with `Forbidden` unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden(ADMIN_REQUIRED))
        }
    }

    /// Fail with `Forbidden` unless the caller is `user_id` or an admin.
    pub fn require_self_or_admin(&self, user_id: Uuid) -> Result<(), AppError> {
        if self.user_id == user_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Forbidden: you may only act on your own account",
            ))
        }
    }

    /// The user an engagement acts for: `requested` when given, else the
    /// caller. Naming someone else needs admin.
    pub fn acting_user(&self, requested: Option<Uuid>) -> Result<Uuid, AppError> {
        match requested {
            Some(id) => {
                self.require_self_or_admin(id)?;
                Ok(id)
            }
            None => Ok(self.user_id),
        }
    }
}
