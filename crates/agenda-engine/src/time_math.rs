//! Wall-clock minute arithmetic.
//!
//! Converts `HH:MM` strings and timezone-qualified instants into
//! minutes since midnight. The "now" instant is always supplied by the
//! caller, so every function here is deterministic and testable without
//! touching the system clock.
//!
//! # Functions
//!
//! - [`parse_time_to_minutes`] — strict `HH:MM` → minutes since midnight
//! - [`minutes_since_midnight`] — instant + IANA timezone → local minutes, with fallback
//! - [`zoned_minutes_since_midnight`] — the strict variant that reports resolution errors
//! - [`local_minutes_since_midnight`] — the host-local computation used as fallback
//! - [`resolve_timezone`] — IANA identifier → [`Tz`]

use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{AgendaError, Result};

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse a zero-padded 24-hour `HH:MM` string into minutes since midnight.
///
/// Only `00:00` through `23:59` are accepted; single-digit hours, seconds,
/// surrounding whitespace and 12-hour suffixes are all rejected.
///
/// # Errors
///
/// Returns [`AgendaError::InvalidTime`] if the string is not a valid `HH:MM`.
///
/// # Examples
///
/// ```
/// use agenda_engine::time_math::parse_time_to_minutes;
///
/// assert_eq!(parse_time_to_minutes("09:30").unwrap(), 570);
/// assert!(parse_time_to_minutes("24:00").is_err());
/// ```
pub fn parse_time_to_minutes(time: &str) -> Result<u32> {
    let invalid = || AgendaError::InvalidTime(format!("'{time}' is not HH:MM"));

    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }

    let digit = |b: u8| -> Result<u32> {
        if b.is_ascii_digit() {
            Ok(u32::from(b - b'0'))
        } else {
            Err(invalid())
        }
    };

    let hours = digit(bytes[0])? * 10 + digit(bytes[1])?;
    let minutes = digit(bytes[3])? * 10 + digit(bytes[4])?;

    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Render a minute offset as `HH:MM`. Offsets past midnight keep counting
/// hours (`1500` → `"25:00"`), which is how an event's end is shown when it
/// runs into the next day.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`AgendaError::InvalidDate`] for anything else, including
/// unpadded months/days and impossible dates like `2026-02-30`.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    if date.len() != 10 {
        return Err(AgendaError::InvalidDate(format!("'{date}' is not YYYY-MM-DD")));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| AgendaError::InvalidDate(format!("'{date}': {e}")))
}

/// Resolve an IANA timezone identifier.
///
/// # Errors
///
/// Returns [`AgendaError::MissingTimezone`] for an empty identifier and
/// [`AgendaError::InvalidTimezone`] for one the timezone database does not know.
pub fn resolve_timezone(identifier: &str) -> Result<Tz> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(AgendaError::MissingTimezone);
    }
    trimmed
        .parse::<Tz>()
        .map_err(|_| AgendaError::InvalidTimezone(format!("'{trimmed}'")))
}

/// Minutes since local midnight of `instant` in `timezone`.
///
/// # Errors
///
/// Propagates the error from [`resolve_timezone`].
pub fn zoned_minutes_since_midnight(instant: DateTime<Utc>, timezone: &str) -> Result<u32> {
    let tz = resolve_timezone(timezone)?;
    Ok(wall_clock_minutes(&instant.with_timezone(&tz)))
}

/// Minutes since local midnight of `instant` on the host's own clock.
pub fn local_minutes_since_midnight(instant: DateTime<Utc>) -> u32 {
    wall_clock_minutes(&instant.with_timezone(&Local))
}

/// Minutes since local midnight of `instant` in `timezone`, in `[0, 1439]`.
///
/// The result depends only on the instant and the timezone rules, never on
/// the host's configured zone. When the identifier cannot be resolved the
/// failure is logged and the host-local wall clock is used instead, so a
/// bad profile setting degrades the indicator rather than removing it.
pub fn minutes_since_midnight(instant: DateTime<Utc>, timezone: &str) -> u32 {
    resolve_minutes(instant, timezone).0
}

/// Like [`minutes_since_midnight`], also reporting whether the host-local
/// fallback was used.
pub(crate) fn resolve_minutes(instant: DateTime<Utc>, timezone: &str) -> (u32, bool) {
    match zoned_minutes_since_midnight(instant, timezone) {
        Ok(minutes) => (minutes, false),
        Err(err) => {
            tracing::warn!(
                timezone = %timezone,
                error = %err,
                "timezone resolution failed; using device-local time"
            );
            (local_minutes_since_midnight(instant), true)
        }
    }
}

pub(crate) fn wall_clock_minutes<T: Timelike>(t: &T) -> u32 {
    t.hour() * 60 + t.minute()
}

// ── Tests ───────────────────────────────────────────────────────────────────
