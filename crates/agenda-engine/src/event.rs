//! Event records and their derived timed form.
//!
//! [`Event`] is what the document store hands back. [`EventDraft`] is what
//! a create form produces; it must pass [`EventDraft::validate`] before it
//! is given to a store. [`TimedEvent`] is the per-pass view the packer and
//! layout work on.

use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, Result};
use crate::time_math::{parse_date, parse_time_to_minutes};

/// A user-created event as stored by the document database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque identifier, stable for the event's lifetime.
    pub id: String,
    pub title: String,
    /// Day bucket as `YYYY-MM-DD`. Never timezone-converted.
    pub date: String,
    /// Start as zero-padded 24-hour `HH:MM`.
    pub time: String,
    /// Length in minutes.
    pub duration: u32,
}

/// Longest duration a draft may ask for: one week.
pub const MAX_DURATION_MINUTES: u32 = 7 * 24 * 60;

/// Unvalidated input from an event-creation form.
///
/// `duration` is signed so that a negative entry can be reported instead
/// of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: i64,
}

/// An [`EventDraft`] that passed validation and is ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidEvent {
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
}

impl EventDraft {
    /// Check the draft against the format contract every stored event obeys:
    /// a non-empty title, a `YYYY-MM-DD` date, an `HH:MM` time and a positive
    /// whole number of minutes.
    ///
    /// The title is trimmed; nothing else is normalized.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as [`AgendaError::InvalidTitle`],
    /// [`AgendaError::InvalidDate`], [`AgendaError::InvalidTime`] or
    /// [`AgendaError::InvalidDuration`].
    pub fn validate(&self) -> Result<ValidEvent> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AgendaError::InvalidTitle("title must not be empty".to_string()));
        }
        parse_date(&self.date)?;
        parse_time_to_minutes(&self.time)?;

        let duration = u32::try_from(self.duration)
            .ok()
            .filter(|d| (1..=MAX_DURATION_MINUTES).contains(d))
            .ok_or_else(|| {
                AgendaError::InvalidDuration(format!(
                    "duration must be between 1 and {MAX_DURATION_MINUTES} minutes, got {}",
                    self.duration
                ))
            })?;

        Ok(ValidEvent {
            title: title.to_string(),
            date: self.date.clone(),
            time: self.time.clone(),
            duration,
        })
    }
}

impl ValidEvent {
    /// Attach a store-assigned identifier.
    pub fn into_event(self, id: impl Into<String>) -> Event {
        Event {
            id: id.into(),
            title: self.title,
            date: self.date,
            time: self.time,
            duration: self.duration,
        }
    }
}

/// An event with its start and end resolved to minutes since midnight.
///
/// `end_minutes` may exceed 1440 when the event runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent<'a> {
    pub event: &'a Event,
    /// Position in the caller's input slice; orders events with equal starts.
    pub index: usize,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl<'a> TimedEvent<'a> {
    /// Resolve `event`'s start and end.
    ///
    /// # Errors
    ///
    /// Returns [`AgendaError::InvalidTime`] for a malformed `time` and
    /// [`AgendaError::InvalidDuration`] for a zero duration or one whose end
    /// does not fit in `u32` minutes.
    pub fn from_event(event: &'a Event, index: usize) -> Result<Self> {
        let start_minutes = parse_time_to_minutes(&event.time)?;
        if event.duration == 0 {
            return Err(AgendaError::InvalidDuration(format!(
                "event '{}' has zero duration",
                event.id
            )));
        }
        let end_minutes = start_minutes.checked_add(event.duration).ok_or_else(|| {
            AgendaError::InvalidDuration(format!(
                "event '{}' duration {} runs past the representable range",
                event.id, event.duration
            ))
        })?;
        Ok(Self {
            event,
            index,
            start_minutes,
            end_minutes,
        })
    }

    pub fn duration(&self) -> u32 {
        self.end_minutes - self.start_minutes
    }

    /// Half-open overlap: `[a, b)` and `[c, d)` overlap iff `a < d && c < b`.
    pub fn overlaps(&self, other: &TimedEvent<'_>) -> bool {
        self.start_minutes < other.end_minutes && other.start_minutes < self.end_minutes
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, date: &str, time: &str, duration: u32) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {id}"),
        date: date.to_string(),
        time: time.to_string(),
        duration,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
