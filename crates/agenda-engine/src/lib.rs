//! # agenda-engine
//!
//! Deterministic timeline layout for a student agenda.
//!
//! Given the events a user created (a `YYYY-MM-DD` day, an `HH:MM` start and
//! a duration in minutes) the engine buckets them by day, finds overlaps,
//! packs overlapping events into the fewest parallel columns and turns the
//! result into pixel geometry for a fixed 24-hour canvas. A tracker keeps a
//! "now" marker positioned in any IANA timezone, independent of the device's
//! own zone.
//!
//! Everything except the indicator timer is a pure function of its inputs:
//! the event snapshot, the selected date and the timezone are passed in, and
//! nothing is cached between calls.
//!
//! ## Modules
//!
//! - [`time_math`] — `HH:MM` and timezone-aware minutes since midnight
//! - [`event`] — Event records, draft validation, timed events
//! - [`packer`] — Overlap clustering and minimal column assignment
//! - [`conflict`] — Directly overlapping event pairs
//! - [`layout`] — Day timeline geometry
//! - [`week`] — Seven-day timeline
//! - [`indicator`] — Live current-time marker with timer lifecycle
//! - [`grouping`] — Date buckets for the agenda list
//! - [`labels`] — Bucket headings ("Today", "Tomorrow", ...)
//! - [`store`] — Event store collaborator interface
//! - [`config`] — TOML settings
//! - [`error`] — Error types

pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod grouping;
pub mod indicator;
pub mod labels;
pub mod layout;
pub mod packer;
pub mod store;
pub mod time_math;
pub mod week;

pub use config::{AgendaConfig, IndicatorConfig, DEFAULT_TIMEZONE};
pub use conflict::{find_conflicts, Conflict};
pub use error::AgendaError;
pub use event::{Event, EventDraft, TimedEvent, ValidEvent, MAX_DURATION_MINUTES};
pub use grouping::{events_on, group_by_date, upcoming, AgendaDay};
pub use indicator::{
    indicator_position, spawn_indicator, Clock, IndicatorPosition, IndicatorSubscription,
    LiveIndicatorTracker, SystemClock, TrackerState,
};
pub use labels::{day_label, DayLabels, EnglishDayLabels};
pub use layout::{
    event_rect, hour_offset, indicator_offset, layout_day, DayLayout, LayoutRect,
    PositionedEvent, TimelineConfig,
};
pub use packer::{max_concurrency, pack, pack_day, Cluster, Column, PackedDay, Placement};
pub use store::EventStore;
#[cfg(feature = "memory-store")]
pub use store::MemoryEventStore;
pub use time_math::{
    format_minutes, local_minutes_since_midnight, minutes_since_midnight, parse_date,
    parse_time_to_minutes, resolve_timezone, zoned_minutes_since_midnight,
};
pub use week::{layout_week, week_dates, WeekLayout, WeekStartDay};
