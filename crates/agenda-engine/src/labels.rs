//! Headings for agenda list buckets.

use chrono::NaiveDate;

/// Turns a bucket date into the heading shown above it.
///
/// Implement this to localize headings; [`EnglishDayLabels`] is the default.
pub trait DayLabels {
    fn label(&self, date: NaiveDate, today: NaiveDate) -> String;
}

/// "Today", "Tomorrow", "Yesterday", otherwise e.g. "Mon, Mar 16".
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishDayLabels;

impl DayLabels for EnglishDayLabels {
    fn label(&self, date: NaiveDate, today: NaiveDate) -> String {
        match (date - today).num_days() {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            -1 => "Yesterday".to_string(),
            _ => date.format("%a, %b %-d").to_string(),
        }
    }
}

/// Shorthand for [`EnglishDayLabels`].
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    EnglishDayLabels.label(date, today)
}
