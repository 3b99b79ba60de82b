//! Event listing configuration.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Settings for event classification and paginated listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Offset from UTC, in minutes, of the reference clock used to decide
    /// whether an event is live, past, or upcoming. Defaults to IST (+05:30).
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
    /// Page size used when a listing request does not specify one.
    #[serde(default = "default_page_limit")]
    pub default_page_limit: u64,
    /// Upper bound on the page size a client may request.
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: u64,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset(),
            default_page_limit: default_page_limit(),
            max_page_limit: default_max_page_limit(),
        }
    }
}

impl EventsConfig {
    /// The reference time zone as a fixed offset.
    ///
    /// Out-of-range offsets fall back to UTC.
    pub fn reference_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }
}

fn default_utc_offset() -> i32 {
    330
}

fn default_page_limit() -> u64 {
    5
}

fn default_max_page_limit() -> u64 {
    100
}
