//! Pixel geometry for the 24-hour day timeline.
//!
//! The vertical axis is absolute: minute offsets scale by
//! [`TimelineConfig::pixels_per_hour`] onto a canvas of fixed height
//! `24 × pixels_per_hour`, whatever the day contains. The horizontal axis is
//! relative: each cluster splits the day column into equal percentage lanes,
//! so lanes never overlap at any render width.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::{Event, TimedEvent};
use crate::packer::pack_day;

/// Vertical scale of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub pixels_per_hour: f64,
    /// Floor for an event's height so short events stay tappable.
    pub min_event_height: f64,
    /// Space left below each event before the next one starts.
    pub vertical_gap: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            pixels_per_hour: 80.0,
            min_event_height: 40.0,
            vertical_gap: 4.0,
        }
    }
}

impl TimelineConfig {
    pub fn canvas_height(&self) -> f64 {
        24.0 * self.pixels_per_hour
    }
}

/// An event's box: `top`/`height` in pixels, `left`/`width` in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

/// One laid-out event, carrying what the renderer needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEvent {
    pub id: String,
    pub title: String,
    pub time: String,
    pub duration: u32,
    pub cluster: usize,
    pub column: usize,
    pub columns: usize,
    pub rect: LayoutRect,
}

/// Geometry for one day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub date: String,
    pub canvas_height: f64,
    /// Events in start order.
    pub items: Vec<PositionedEvent>,
    /// Ids of events dropped for an unparseable start time.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl DayLayout {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Box for `event` sitting in lane `column` of `columns`.
pub fn event_rect(
    event: &TimedEvent<'_>,
    column: usize,
    columns: usize,
    config: &TimelineConfig,
) -> LayoutRect {
    let top = f64::from(event.start_minutes) / 60.0 * config.pixels_per_hour;
    let natural = f64::from(event.duration()) / 60.0 * config.pixels_per_hour - config.vertical_gap;
    let width = 100.0 / columns.max(1) as f64;

    LayoutRect {
        top,
        height: natural.max(config.min_event_height),
        left: column as f64 * width,
        width,
    }
}

/// Y offset of the grid line for `hour` (0 through 24).
pub fn hour_offset(hour: u32, config: &TimelineConfig) -> f64 {
    f64::from(hour.min(24)) * config.pixels_per_hour
}

/// Y offset of the current-time marker at `minutes` past midnight.
pub fn indicator_offset(minutes: u32, config: &TimelineConfig) -> f64 {
    f64::from(minutes) / 60.0 * config.pixels_per_hour
}

/// Lay out the events of `selected_date`.
///
/// Events are picked by exact match of their `date` string against
/// `selected_date`, so both must be `YYYY-MM-DD`. A day with no events
/// yields an empty layout.
///
/// # Errors
///
/// Propagates [`crate::packer::pack_day`]'s zero-duration error.
pub fn layout_day(events: &[Event], selected_date: &str, config: &TimelineConfig) -> Result<DayLayout> {
    let packed = pack_day(events.iter().filter(|e| e.date == selected_date))?;

    let items = packed
        .placements()
        .map(|p| PositionedEvent {
            id: p.event.event.id.clone(),
            title: p.event.event.title.clone(),
            time: p.event.event.time.clone(),
            duration: p.event.duration(),
            cluster: p.cluster,
            column: p.column,
            columns: p.columns,
            rect: event_rect(&p.event, p.column, p.columns, config),
        })
        .collect();

    tracing::debug!(
        date = %selected_date,
        events = packed.len(),
        clusters = packed.clusters.len(),
        "laid out day"
    );

    Ok(DayLayout {
        date: selected_date.to_string(),
        canvas_height: config.canvas_height(),
        items,
        skipped: packed.skipped,
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
