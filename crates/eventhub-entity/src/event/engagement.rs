//! Engagement collections: likes, saves and responses.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three toggleable membership sets on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    /// `likedBy`.
    Like,
    /// `savedBy`.
    Save,
    /// `responseBy` (RSVP / interest).
    Response,
}

impl EngagementKind {
    /// The column holding this collection.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Like => "liked_by",
            Self::Save => "saved_by",
            Self::Response => "response_by",
        }
    }

    /// The JSON field name of this collection.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Like => "likedBy",
            Self::Save => "savedBy",
            Self::Response => "responseBy",
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Like => "like",
            Self::Save => "save",
            Self::Response => "response",
        };
        write!(f, "{s}")
    }
}

/// Toggle `user_id` in `members`: remove it when present, append it
/// otherwise. Returns whether the user is a member afterwards.
pub fn toggle_member(members: &mut Vec<Uuid>, user_id: Uuid) -> bool {
    if let Some(pos) = members.iter().position(|m| *m == user_id) {
        members.remove(pos);
        false
    } else {
        members.push(user_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_original() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut members = vec![b];

        assert!(toggle_member(&mut members, a));
        assert_eq!(members, vec![b, a]);

        assert!(!toggle_member(&mut members, a));
        assert_eq!(members, vec![b]);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(EngagementKind::Response.column(), "response_by");
        assert_eq!(EngagementKind::Save.field(), "savedBy");
    }
}
