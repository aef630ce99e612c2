//! Date buckets for the agenda list view.
//!
//! Grouping is a pure fan-out: buckets come out in date order (lexicographic
//! on `YYYY-MM-DD`, which is chronological), and each bucket keeps the order
//! the events arrived in. The store query already returns events ordered by
//! date and time, so nothing here re-sorts within a day.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::event::Event;

/// Events sharing one `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaDay<'a> {
    pub date: &'a str,
    pub events: Vec<&'a Event>,
}

/// Group `events` by date, earliest date first.
pub fn group_by_date(events: &[Event]) -> Vec<AgendaDay<'_>> {
    let mut buckets: BTreeMap<&str, Vec<&Event>> = BTreeMap::new();
    for event in events {
        buckets.entry(event.date.as_str()).or_default().push(event);
    }
    buckets
        .into_iter()
        .map(|(date, events)| AgendaDay { date, events })
        .collect()
}

/// Groups on or after `from_date`.
pub fn upcoming<'a>(events: &'a [Event], from_date: &str) -> Vec<AgendaDay<'a>> {
    let mut days = group_by_date(events);
    days.retain(|day| day.date >= from_date);
    days
}

/// The events of one day, in input order.
pub fn events_on<'a>(events: &'a [Event], date: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| e.date == date).collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────
