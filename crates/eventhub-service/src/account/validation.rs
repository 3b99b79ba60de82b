//! Input rules for account fields.

use eventhub_core::error::AppError;

/// Display name length bounds, in characters.
const NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=100;

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Trim, lower-case, and shape-check an email.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if !is_email_shape(&email) {
        return Err(AppError::validation("Please provide a valid email address"));
    }
    Ok(email)
}

/// Reject emails outside `allowed`. An empty list allows any domain.
pub fn check_domain(email: &str, allowed: &[String]) -> Result<(), AppError> {
    if allowed.is_empty() {
        return Ok(());
    }
    let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
    if allowed.iter().any(|d| d.eq_ignore_ascii_case(domain)) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Email domain must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Trim a display name and enforce its length.
pub fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if !NAME_LENGTH.contains(&name.chars().count()) {
        return Err(AppError::validation(format!(
            "Name must be between {} and {} characters",
            NAME_LENGTH.start(),
            NAME_LENGTH.end()
        )));
    }
    Ok(name.to_string())
}

/// Trim a department tag; it must not be blank.
pub fn normalize_department(department: &str) -> Result<String, AppError> {
    let department = department.trim();
    if department.is_empty() {
        return Err(AppError::validation("Department is required"));
    }
    Ok(department.to_string())
}
