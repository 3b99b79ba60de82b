//! Password policy enforcement for new passwords.

use eventhub_core::config::AuthConfig;
use eventhub_core::error::AppError;

/// Checks new passwords against the configured length bounds.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length.max(config.password_min_length),
        }
    }

    /// Length is counted in characters, inclusive at both ends.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length || length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be between {} and {} characters long",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_are_inclusive() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("abcd").is_ok());
        assert!(validator.validate(&"x".repeat(100)).is_ok());
        assert!(validator.validate("abc").is_err());
        assert!(validator.validate(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("ñüéß").is_ok());
    }
}
