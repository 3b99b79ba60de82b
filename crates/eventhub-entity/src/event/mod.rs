//! Event domain entities and lifecycle rules.

pub mod engagement;
pub mod model;
pub mod status;

pub use engagement::{EngagementKind, toggle_member};
pub use model::{Event, EventContent, SoftDelete, UpdateEvent, normalize_time};
pub use status::{EventClock, EventStatus};
