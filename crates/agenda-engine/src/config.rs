//! Engine settings, loaded from TOML.
//!
//! Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! default_timezone = "America/Sao_Paulo"
//! week_start = "monday"
//!
//! [timeline]
//! pixels_per_hour = 80.0
//! min_event_height = 40.0
//! vertical_gap = 4.0
//!
//! [indicator]
//! tick_seconds = 60
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AgendaError, Result};
use crate::layout::TimelineConfig;
use crate::time_math::resolve_timezone;
use crate::week::WeekStartDay;

/// Timezone used when the user profile has none.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

const DEFAULT_TICK_SECONDS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    pub default_timezone: String,
    pub week_start: WeekStartDay,
    pub timeline: TimelineConfig,
    pub indicator: IndicatorConfig,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            week_start: WeekStartDay::default(),
            timeline: TimelineConfig::default(),
            indicator: IndicatorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub tick_seconds: u64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            tick_seconds: DEFAULT_TICK_SECONDS,
        }
    }
}

impl IndicatorConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_secs(self.tick_seconds)
    }
}

impl AgendaConfig {
    /// Parse and sanitize a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AgendaError::InvalidConfig`] if the TOML does not parse or the
    /// default timezone is not a known IANA identifier.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: AgendaConfig =
            toml::from_str(raw).map_err(|e| AgendaError::InvalidConfig(e.to_string()))?;
        config.sanitize()?;
        Ok(config)
    }

    /// Read, parse and sanitize a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AgendaError::InvalidConfig`] if the file cannot be read, plus
    /// everything [`AgendaConfig::from_toml_str`] rejects.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| AgendaError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&raw)?;
        tracing::info!(
            file = %path.display(),
            timezone = %config.default_timezone,
            pixels_per_hour = config.timeline.pixels_per_hour,
            "loaded agenda config"
        );
        Ok(config)
    }

    /// The identifier to use for `requested`, falling back to the configured
    /// default when the profile has none.
    pub fn timezone_or_default<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested.map(str::trim) {
            Some(tz) if !tz.is_empty() => tz,
            _ => &self.default_timezone,
        }
    }

    /// Replace unusable numbers with defaults and check the default timezone.
    fn sanitize(&mut self) -> Result<()> {
        let defaults = TimelineConfig::default();
        let timeline = &mut self.timeline;

        if !(timeline.pixels_per_hour.is_finite() && timeline.pixels_per_hour > 0.0) {
            tracing::warn!(value = timeline.pixels_per_hour, "invalid pixels_per_hour; using default");
            timeline.pixels_per_hour = defaults.pixels_per_hour;
        }
        if !(timeline.min_event_height.is_finite() && timeline.min_event_height >= 0.0) {
            tracing::warn!(value = timeline.min_event_height, "invalid min_event_height; using default");
            timeline.min_event_height = defaults.min_event_height;
        }
        if !(timeline.vertical_gap.is_finite() && timeline.vertical_gap >= 0.0) {
            tracing::warn!(value = timeline.vertical_gap, "invalid vertical_gap; using default");
            timeline.vertical_gap = defaults.vertical_gap;
        }
        if self.indicator.tick_seconds == 0 {
            tracing::warn!("indicator tick_seconds is 0; using default");
            self.indicator.tick_seconds = DEFAULT_TICK_SECONDS;
        }

        if self.default_timezone.trim().is_empty() {
            self.default_timezone = DEFAULT_TIMEZONE.to_string();
        }
        resolve_timezone(&self.default_timezone)
            .map_err(|e| AgendaError::InvalidConfig(format!("default_timezone: {e}")))?;

        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
