//! Comment domain entities.

pub mod model;

pub use model::{Comment, CommentAuthor, CommentWithAuthor, MAX_COMMENT_LENGTH, normalize_comment};
