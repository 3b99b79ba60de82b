//! Accounts: credentials, sessions, password reset, and user administration.

pub mod auth;
pub mod service;
pub mod validation;

pub use auth::{AuthService, AuthSession, SignupInput};
pub use service::UserService;
