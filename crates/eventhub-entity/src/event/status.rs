//! Event lifecycle classification.
//!
//! Events carry a calendar date and an `HH:MM` time for each end. The
//! classifier compares them against a [`EventClock`] taken in the reference
//! time zone: dates compare as calendar days, times as zero-padded strings.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use eventhub_core::error::AppError;

use super::model::Event;

/// "Now", split into a calendar day and a time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventClock {
    /// Today's date in the reference zone.
    pub today: NaiveDate,
    /// Current time of day in the reference zone, `HH:MM`.
    pub now: String,
}

impl EventClock {
    /// Build a clock from explicit parts.
    pub fn new(today: NaiveDate, now: impl Into<String>) -> Self {
        Self {
            today,
            now: now.into(),
        }
    }

    /// Read an instant in the given reference zone.
    pub fn at(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local = instant.with_timezone(&offset);
        Self {
            today: local.date_naive(),
            now: local.format("%H:%M").to_string(),
        }
    }
}

/// Status filter for event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Started (inclusive) and not yet ended.
    Live,
    /// Already ended.
    Past,
    /// Not yet started.
    Future,
    /// Soft-deleted.
    Cancelled,
    /// Every non-deleted event.
    All,
}

impl EventStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Past => "past",
            Self::Future => "future",
            Self::Cancelled => "cancelled",
            Self::All => "all",
        }
    }

    /// Whether this filter selects soft-deleted events instead of live ones.
    pub fn selects_deleted(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether results are ordered by start date and time.
    pub fn orders_by_start(&self) -> bool {
        matches!(self, Self::Live | Self::Past | Self::Future)
    }

    /// Whether `event` belongs in this listing at `clock`.
    pub fn matches(&self, event: &Event, clock: &EventClock) -> bool {
        match self {
            Self::Cancelled => event.is_deleted,
            _ if event.is_deleted => false,
            Self::All => true,
            Self::Live => has_started(event, clock) && !has_ended(event, clock),
            Self::Past => has_ended(event, clock),
            Self::Future => !has_started(event, clock),
        }
    }

    /// Filter and order events the way a listing for this status returns them.
    ///
    /// The input is expected in store default order (creation order).
    pub fn select(&self, events: impl IntoIterator<Item = Event>, clock: &EventClock) -> Vec<Event> {
        let mut selected: Vec<Event> = events
            .into_iter()
            .filter(|e| self.matches(e, clock))
            .collect();
        if self.orders_by_start() {
            selected.sort_by(|a, b| {
                (a.start_date, &a.start_time).cmp(&(b.start_date, &b.start_time))
            });
        }
        selected
    }
}

/// `start <= now`, with the start boundary inclusive.
fn has_started(event: &Event, clock: &EventClock) -> bool {
    event.start_date < clock.today
        || (event.start_date == clock.today && event.start_time.as_str() <= clock.now.as_str())
}

/// `end <= now`.
fn has_ended(event: &Event, clock: &EventClock) -> bool {
    event.end_date < clock.today
        || (event.end_date == clock.today && event.end_time.as_str() <= clock.now.as_str())
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "past" => Ok(Self::Past),
            "future" => Ok(Self::Future),
            "cancelled" => Ok(Self::Cancelled),
            "all" => Ok(Self::All),
            _ => Err(AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: live, past, future, cancelled, all"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::model::EventContent;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: (NaiveDate, &str), end: (NaiveDate, &str)) -> Event {
        let content = EventContent {
            name: "Demo".to_string(),
            start_date: start.0,
            start_time: start.1.to_string(),
            end_date: end.0,
            end_time: end.1.to_string(),
            thumbnail: None,
            description: String::new(),
            event_access: "Public".to_string(),
        };
        Event::from_content(content, Utc::now())
    }

    fn clock() -> EventClock {
        EventClock::new(date(2025, 6, 15), "12:00")
    }

    #[test]
    fn test_start_equal_to_now_is_live() {
        let e = event((date(2025, 6, 15), "12:00"), (date(2025, 6, 15), "13:00"));
        assert!(EventStatus::Live.matches(&e, &clock()));
        assert!(!EventStatus::Future.matches(&e, &clock()));
        assert!(!EventStatus::Past.matches(&e, &clock()));
    }

    #[test]
    fn test_end_equal_to_now_is_past() {
        let e = event((date(2025, 6, 15), "10:00"), (date(2025, 6, 15), "12:00"));
        assert!(EventStatus::Past.matches(&e, &clock()));
        assert!(!EventStatus::Live.matches(&e, &clock()));
    }

    #[test]
    fn test_multi_day_event_is_live_on_middle_day() {
        let e = event((date(2025, 6, 14), "18:00"), (date(2025, 6, 16), "09:00"));
        assert!(EventStatus::Live.matches(&e, &clock()));
    }

    #[test]
    fn test_future_event() {
        let later_today = event((date(2025, 6, 15), "12:01"), (date(2025, 6, 15), "13:00"));
        let tomorrow = event((date(2025, 6, 16), "08:00"), (date(2025, 6, 16), "09:00"));
        assert!(EventStatus::Future.matches(&later_today, &clock()));
        assert!(EventStatus::Future.matches(&tomorrow, &clock()));
    }

    #[test]
    fn test_deleted_events_only_under_cancelled() {
        let mut e = event((date(2025, 6, 15), "11:00"), (date(2025, 6, 15), "13:00"));
        e.is_deleted = true;
        for status in [EventStatus::Live, EventStatus::Past, EventStatus::Future, EventStatus::All] {
            assert!(!status.matches(&e, &clock()), "{status} should skip deleted");
        }
        assert!(EventStatus::Cancelled.matches(&e, &clock()));
    }

    #[test]
    fn test_select_orders_by_start() {
        let late = event((date(2025, 6, 20), "09:00"), (date(2025, 6, 20), "10:00"));
        let early = event((date(2025, 6, 18), "15:00"), (date(2025, 6, 18), "16:00"));
        let same_day_earlier = event((date(2025, 6, 18), "08:30"), (date(2025, 6, 18), "09:00"));
        let selected = EventStatus::Future.select(
            vec![late.clone(), early.clone(), same_day_earlier.clone()],
            &clock(),
        );
        let ids: Vec<_> = selected.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![same_day_earlier.id, early.id, late.id]);

        let all = EventStatus::All.select(vec![late.clone(), early.clone()], &clock());
        assert_eq!(all[0].id, late.id);
    }

    #[test]
    fn test_clock_uses_reference_offset() {
        let instant = DateTime::parse_from_rfc3339("2025-06-15T20:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ist = FixedOffset::east_opt(330 * 60).unwrap();
        let clock = EventClock::at(instant, ist);
        assert_eq!(clock.today, date(2025, 6, 16));
        assert_eq!(clock.now, "01:30");
    }

    #[test]
    fn test_parse_status() {
        assert_eq!("LIVE".parse::<EventStatus>().unwrap(), EventStatus::Live);
        assert!("upcoming".parse::<EventStatus>().is_err());
    }
}
