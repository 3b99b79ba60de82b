//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication, session cookie, and credential policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in hours. Also used as the cookie max-age.
    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_hours: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Set the `Secure` attribute on the session cookie.
    #[serde(default)]
    pub secure_cookie: bool,
    /// Password-reset token lifetime in minutes.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Email domains accepted at signup. Empty accepts any domain.
    #[serde(default = "default_allowed_domains")]
    pub allowed_email_domains: Vec<String>,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_hours: default_jwt_ttl(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
            reset_token_ttl_minutes: default_reset_ttl(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            allowed_email_domains: default_allowed_domains(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_jwt_ttl() -> u64 {
    24 * 24
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_reset_ttl() -> u64 {
    10
}

fn default_password_min() -> usize {
    4
}

fn default_password_max() -> usize {
    100
}

fn default_allowed_domains() -> Vec<String> {
    [
        "gmail.com",
        "yahoo.com",
        "outlook.com",
        "hotmail.com",
        "icloud.com",
        "example.com",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

fn default_argon2_memory() -> u32 {
    19 * 1024
}

fn default_argon2_iterations() -> u32 {
    2
}
