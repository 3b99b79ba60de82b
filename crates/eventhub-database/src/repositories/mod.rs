//! PostgreSQL implementations of the store traits.

pub mod event;
pub mod notification;
pub mod user;

pub use event::EventRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
