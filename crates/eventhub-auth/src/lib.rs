//! # eventhub-auth
//!
//! Credential handling for EventHub.
//!
//! ## Modules
//!
//! - `jwt`: session token claims, signing, and verification
//! - `password`: Argon2id hashing and the length policy
//! - `reset`: single-use password-reset tokens

pub mod jwt;
pub mod password;
pub mod reset;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use reset::ResetToken;
