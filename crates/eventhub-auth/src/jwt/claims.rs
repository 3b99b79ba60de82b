//! Claims carried by a session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eventhub_entity::user::{User, UserRole};

/// The identity snapshot signed into every session token.
///
/// The snapshot is taken at login; later profile edits are not reflected
/// until the user signs in again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Login email.
    pub email: String,
    /// User id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Department tag.
    pub department: String,
    /// Role at issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Snapshot `user` for a token valid from `issued_at` until `expires_at`.
    pub fn for_user(user: &User, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            email: user.email.clone(),
            id: user.id,
            name: user.name.clone(),
            department: user.department.clone(),
            role: user.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
