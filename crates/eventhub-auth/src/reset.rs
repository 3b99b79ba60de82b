//! Single-use password-reset tokens.
//!
//! The plaintext travels only in the emailed link. The store keeps its
//! SHA-256 digest and an expiry, and completion matches on the digest.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

/// Random bytes per token.
const TOKEN_BYTES: usize = 20;

/// A newly issued reset token.
#[derive(Debug, Clone)]
pub struct ResetToken {
    /// Hex plaintext for the reset link.
    pub plaintext: String,
    /// Hex SHA-256 of the plaintext, as stored.
    pub digest: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Draw a token from the OS RNG, valid for `ttl_minutes` from `now`.
    pub fn generate(ttl_minutes: u64, now: DateTime<Utc>) -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let plaintext: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Self {
            digest: digest(&plaintext),
            plaintext,
            expires_at: now + Duration::minutes(ttl_minutes as i64),
        }
    }
}

/// Hex SHA-256 of a presented token.
pub fn digest(plaintext: &str) -> String {
    format!("{:x}", Sha256::digest(plaintext.as_bytes()))
}
