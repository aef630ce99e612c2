//! Detect directly overlapping events within one day.
//!
//! Only pairs that share time are reported. Adjacent events (one ends
//! exactly when another starts) are NOT conflicts, and neither are two
//! events that sit in the same cluster only through a third.

use serde::Serialize;

use crate::event::{Event, TimedEvent};
use crate::time_math::format_minutes;

/// A detected overlap between two events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub first_id: String,
    pub second_id: String,
    /// Overlap start as `HH:MM`.
    pub overlap_start: String,
    pub overlap_minutes: u32,
}

/// Find every overlapping pair among one day's events.
///
/// Pairs come out in start order of their earlier event. Events whose time
/// cannot be parsed, or that have no duration, cannot overlap anything and
/// are ignored.
pub fn find_conflicts(events: &[Event]) -> Vec<Conflict> {
    let mut timed: Vec<TimedEvent<'_>> = events
        .iter()
        .enumerate()
        .filter_map(|(i, e)| TimedEvent::from_event(e, i).ok())
        .collect();
    timed.sort_by_key(|e| (e.start_minutes, e.index));

    let mut conflicts = Vec::new();
    for (i, a) in timed.iter().enumerate() {
        // Sorted by start: once b starts at or after a ends, nothing later overlaps a.
        for b in timed[i + 1..]
            .iter()
            .take_while(|b| b.start_minutes < a.end_minutes)
        {
            let overlap_start = a.start_minutes.max(b.start_minutes);
            let overlap_end = a.end_minutes.min(b.end_minutes);
            conflicts.push(Conflict {
                first_id: a.event.id.clone(),
                second_id: b.event.id.clone(),
                overlap_start: format_minutes(overlap_start),
                overlap_minutes: overlap_end - overlap_start,
            });
        }
    }

    conflicts
}

// ── Tests ───────────────────────────────────────────────────────────────────
