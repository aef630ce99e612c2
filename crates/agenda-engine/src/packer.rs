//! Pack one day's events into parallel display columns.
//!
//! Packing runs in two passes over the events sorted by start time (ties
//! keep input order):
//!
//! 1. **Clustering.** An event joins the most recent cluster when it starts
//!    strictly before that cluster's latest end; otherwise it opens a new
//!    cluster. Clusters are therefore maximal transitive overlap chains: two
//!    members may not touch directly but are linked through a third.
//! 2. **Columns.** Inside a cluster each event goes to the first column whose
//!    last event has ended by the time it starts, or to a new column.
//!
//! First-fit over start-sorted intervals colours an interval graph with
//! exactly as many colours as its largest clique, so every cluster gets the
//! minimum number of columns. Intervals are half-open: an event ending at
//! 10:30 and one starting at 10:30 share a column.

use crate::error::{AgendaError, Result};
use crate::event::{Event, TimedEvent};

/// A lane of non-overlapping events inside one cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column<'a> {
    pub events: Vec<TimedEvent<'a>>,
}

impl Column<'_> {
    fn last_end(&self) -> u32 {
        self.events.last().map_or(0, |e| e.end_minutes)
    }
}

/// A maximal chain of transitively overlapping events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster<'a> {
    /// Members in start order.
    pub events: Vec<TimedEvent<'a>>,
    pub columns: Vec<Column<'a>>,
    /// Column index of `events[i]`.
    assignments: Vec<usize>,
    max_end: u32,
}

impl<'a> Cluster<'a> {
    fn open(first: TimedEvent<'a>) -> Self {
        Self {
            max_end: first.end_minutes,
            events: vec![first],
            columns: Vec::new(),
            assignments: Vec::new(),
        }
    }

    fn push(&mut self, event: TimedEvent<'a>) {
        self.max_end = self.max_end.max(event.end_minutes);
        self.events.push(event);
    }

    fn assign_columns(&mut self) {
        for event in &self.events {
            let slot = self
                .columns
                .iter()
                .position(|c| c.last_end() <= event.start_minutes);
            let column = match slot {
                Some(column) => column,
                None => {
                    self.columns.push(Column::default());
                    self.columns.len() - 1
                }
            };
            self.columns[column].events.push(*event);
            self.assignments.push(column);
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column index of the `i`-th member (in start order).
    pub fn column_of(&self, i: usize) -> Option<usize> {
        self.assignments.get(i).copied()
    }

    pub fn start_minutes(&self) -> u32 {
        self.events.first().map_or(0, |e| e.start_minutes)
    }

    pub fn end_minutes(&self) -> u32 {
        self.max_end
    }
}

/// Where one event landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub event: TimedEvent<'a>,
    pub cluster: usize,
    pub column: usize,
    /// Number of columns in the event's cluster.
    pub columns: usize,
}

/// Packing result for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedDay<'a> {
    pub clusters: Vec<Cluster<'a>>,
    /// Ids of events left out because their `time` could not be parsed.
    pub skipped: Vec<String>,
}

impl<'a> PackedDay<'a> {
    /// Every packed event in start order.
    pub fn placements(&self) -> impl Iterator<Item = Placement<'a>> + '_ {
        self.clusters.iter().enumerate().flat_map(|(ci, cluster)| {
            cluster
                .events
                .iter()
                .zip(&cluster.assignments)
                .map(move |(event, &column)| Placement {
                    event: *event,
                    cluster: ci,
                    column,
                    columns: cluster.column_count(),
                })
        })
    }

    pub fn len(&self) -> usize {
        self.clusters.iter().map(|c| c.events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Pack a day's events.
///
/// The caller passes only the events of one day; no date filtering happens
/// here. Input order is the tie-break for equal start times. An event whose
/// `time` is malformed is skipped and logged so one bad record cannot blank
/// the whole view.
///
/// # Errors
///
/// Returns [`AgendaError::InvalidDuration`] if an event has a zero
/// duration. Stored events are validated on creation, so this means the
/// upstream contract was broken.
pub fn pack_day<'a, I>(events: I) -> Result<PackedDay<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut timed = Vec::new();
    let mut skipped = Vec::new();

    for (index, event) in events.into_iter().enumerate() {
        match TimedEvent::from_event(event, index) {
            Ok(t) => timed.push(t),
            Err(AgendaError::InvalidTime(reason)) => {
                tracing::warn!(event_id = %event.id, %reason, "skipping event with malformed time");
                skipped.push(event.id.clone());
            }
            Err(err) => return Err(err),
        }
    }

    Ok(PackedDay {
        clusters: pack(timed),
        skipped,
    })
}

/// Cluster and column-assign already timed events.
pub fn pack(mut events: Vec<TimedEvent<'_>>) -> Vec<Cluster<'_>> {
    // Equal starts keep input order.
    events.sort_by_key(|e| (e.start_minutes, e.index));

    let mut clusters: Vec<Cluster<'_>> = Vec::new();
    for event in events {
        match clusters.last_mut() {
            Some(cluster) if event.start_minutes < cluster.max_end => cluster.push(event),
            _ => clusters.push(Cluster::open(event)),
        }
    }

    for cluster in &mut clusters {
        cluster.assign_columns();
    }
    clusters
}

/// Largest number of events active at one instant.
pub fn max_concurrency(events: &[TimedEvent<'_>]) -> usize {
    let mut edges: Vec<(u32, i32)> = events
        .iter()
        .flat_map(|e| [(e.start_minutes, 1), (e.end_minutes, -1)])
        .collect();
    // Ends sort before starts at the same minute: back-to-back is not concurrent.
    edges.sort_unstable();

    let mut active = 0i32;
    let mut peak = 0i32;
    for (_, delta) in edges {
        active += delta;
        peak = peak.max(active);
    }
    peak as usize
}

// ── Tests ───────────────────────────────────────────────────────────────────
