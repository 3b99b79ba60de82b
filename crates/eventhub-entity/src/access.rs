//! Access scopes for events and notifications.
//!
//! A scope is either the literal `"Public"` or a department tag. Matching is
//! exact: there is no hierarchy and no partial match.

/// The scope visible to every account.
pub const PUBLIC_ACCESS: &str = "Public";

/// Whether content tagged `access` falls inside `scopes`.
pub fn in_scopes(access: &str, scopes: &[String]) -> bool {
    scopes.iter().any(|s| s == access)
}

/// The set of tags a listing for `scope` should match.
///
/// `"Public"` is always included; a department scope adds that tag.
pub fn scopes_for(scope: &str) -> Vec<String> {
    let scope = scope.trim();
    if scope.is_empty() || scope == PUBLIC_ACCESS {
        vec![PUBLIC_ACCESS.to_string()]
    } else {
        vec![PUBLIC_ACCESS.to_string(), scope.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_is_visible_everywhere() {
        assert!(in_scopes("Public", &scopes_for("Sales")));
        assert!(in_scopes("Public", &scopes_for("")));
    }

    #[test]
    fn test_department_must_match_exactly() {
        assert!(in_scopes("Sales", &scopes_for("Sales")));
        assert!(!in_scopes("Sales", &scopes_for("Engineering")));
        assert!(!in_scopes("Sales", &scopes_for("sales")));
    }

    #[test]
    fn test_scopes_for() {
        assert_eq!(scopes_for("Public"), vec!["Public"]);
        assert_eq!(scopes_for("  Sales "), vec!["Public", "Sales"]);
    }
}
