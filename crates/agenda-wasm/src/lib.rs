//! WASM bindings for the agenda timeline engine.
//!
//! Every binding takes and returns JSON strings so the JS client can hand
//! over its event snapshot as-is and read `{top, height, left, width}`
//! straight off the result. Failures surface as a thrown `Error` carrying
//! the engine's message.

use agenda_engine::{
    group_by_date, layout_day, layout_week, minutes_since_midnight, AgendaConfig, Event,
    EventDraft, TimelineConfig, WeekStartDay,
};
use chrono::{DateTime, Utc};
use wasm_bindgen::prelude::*;

/// Lay out one day with the default timeline geometry.
#[wasm_bindgen(js_name = "layoutDay")]
pub fn layout_day_js(events_json: &str, date: &str) -> Result<String, JsError> {
    day_json(events_json, date, &TimelineConfig::default()).map_err(|e| JsError::new(&e))
}

/// Lay out one day with geometry from `config_json`
/// (`{"pixels_per_hour": .., "min_event_height": .., "vertical_gap": ..}`,
/// any field may be omitted).
#[wasm_bindgen(js_name = "layoutDayWithConfig")]
pub fn layout_day_with_config_js(
    events_json: &str,
    date: &str,
    config_json: &str,
) -> Result<String, JsError> {
    timeline_config(config_json)
        .and_then(|config| day_json(events_json, date, &config))
        .map_err(|e| JsError::new(&e))
}

/// Lay out the week containing `date`. `week_start` is `"monday"` or `"sunday"`.
#[wasm_bindgen(js_name = "layoutWeek")]
pub fn layout_week_js(events_json: &str, date: &str, week_start: &str) -> Result<String, JsError> {
    week_json(events_json, date, week_start).map_err(|e| JsError::new(&e))
}

/// Group events into `[{date, events}]`, earliest date first.
#[wasm_bindgen(js_name = "groupAgenda")]
pub fn group_agenda_js(events_json: &str) -> Result<String, JsError> {
    agenda_json(events_json).map_err(|e| JsError::new(&e))
}

/// Minutes since local midnight of an RFC 3339 instant in `timezone`.
/// An empty timezone means the default profile zone; an unknown one falls
/// back to the device clock.
#[wasm_bindgen(js_name = "minutesSinceMidnight")]
pub fn minutes_since_midnight_js(iso_instant: &str, timezone: &str) -> Result<u32, JsError> {
    zoned_minutes(iso_instant, timezone).map_err(|e| JsError::new(&e))
}

/// Check an event draft (`{title, date, time, duration}`) and return the
/// normalized event ready for the store.
#[wasm_bindgen(js_name = "validateEvent")]
pub fn validate_event_js(draft_json: &str) -> Result<String, JsError> {
    validated_json(draft_json).map_err(|e| JsError::new(&e))
}

fn parse_events(events_json: &str) -> Result<Vec<Event>, String> {
    serde_json::from_str(events_json).map_err(|e| format!("invalid events JSON: {e}"))
}

fn timeline_config(config_json: &str) -> Result<TimelineConfig, String> {
    serde_json::from_str(config_json).map_err(|e| format!("invalid timeline config JSON: {e}"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn day_json(events_json: &str, date: &str, config: &TimelineConfig) -> Result<String, String> {
    let events = parse_events(events_json)?;
    let layout = layout_day(&events, date, config).map_err(|e| e.to_string())?;
    to_json(&layout)
}

fn week_json(events_json: &str, date: &str, week_start: &str) -> Result<String, String> {
    let events = parse_events(events_json)?;
    let week_start: WeekStartDay = week_start.parse()?;
    let layout = layout_week(&events, date, week_start, &TimelineConfig::default())
        .map_err(|e| e.to_string())?;
    to_json(&layout)
}

fn agenda_json(events_json: &str) -> Result<String, String> {
    let events = parse_events(events_json)?;
    to_json(&group_by_date(&events))
}

fn zoned_minutes(iso_instant: &str, timezone: &str) -> Result<u32, String> {
    let instant = DateTime::parse_from_rfc3339(iso_instant)
        .map_err(|e| format!("invalid instant '{iso_instant}': {e}"))?
        .with_timezone(&Utc);
    let config = AgendaConfig::default();
    Ok(minutes_since_midnight(instant, config.timezone_or_default(Some(timezone))))
}

fn validated_json(draft_json: &str) -> Result<String, String> {
    let draft: EventDraft =
        serde_json::from_str(draft_json).map_err(|e| format!("invalid event JSON: {e}"))?;
    let valid = draft.validate().map_err(|e| e.to_string())?;
    to_json(&valid)
}

// ── Tests ───────────────────────────────────────────────────────────────────
//
// `JsError` can only be built on a wasm target, so the native tests drive
// the JSON-level helpers the bindings wrap.
