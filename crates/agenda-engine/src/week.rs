//! Seven-day timeline built from independent day layouts.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::Event;
use crate::layout::{layout_day, DayLayout, TimelineConfig};
use crate::time_math::parse_date;

/// Which day begins a week in the week view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

impl std::str::FromStr for WeekStartDay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "sunday" | "sun" => Ok(Self::Sunday),
            other => Err(format!("unknown week start '{other}', expected monday or sunday")),
        }
    }
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

/// The seven dates of the week containing `anchor`.
pub fn week_dates(anchor: NaiveDate, week_start: WeekStartDay) -> [NaiveDate; 7] {
    let first = anchor - Duration::days(days_from_week_start(anchor.weekday(), week_start));
    std::array::from_fn(|i| first + Duration::days(i as i64))
}

/// Geometry for a whole week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekLayout {
    pub week_start: WeekStartDay,
    pub days: Vec<DayLayout>,
}

/// Lay out every day of the week containing `anchor_date`.
///
/// Each day is packed on its own; an event never spills into the next
/// day's column even if it runs past midnight.
///
/// # Errors
///
/// Returns [`crate::AgendaError::InvalidDate`] if `anchor_date` is not
/// `YYYY-MM-DD`, and propagates any day's packing error.
pub fn layout_week(
    events: &[Event],
    anchor_date: &str,
    week_start: WeekStartDay,
    config: &TimelineConfig,
) -> Result<WeekLayout> {
    let anchor = parse_date(anchor_date)?;
    let days = week_dates(anchor, week_start)
        .iter()
        .map(|date| layout_day(events, &date.format("%Y-%m-%d").to_string(), config))
        .collect::<Result<Vec<_>>>()?;

    Ok(WeekLayout { week_start, days })
}

// ── Tests ───────────────────────────────────────────────────────────────────
