//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod path;
pub mod validated;

pub use auth::{AdminUser, AuthUser};
pub use pagination::PaginationParams;
pub use path::parse_uuid;
pub use validated::{ApiQuery, OptionalJson, ValidJson};
