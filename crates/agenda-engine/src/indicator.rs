//! The live "now" marker on the day timeline.
//!
//! A [`LiveIndicatorTracker`] belongs to one mounted timeline view. While
//! mounted it owns exactly one interval timer that recomputes the marker
//! position every tick for the view's timezone and publishes it on a
//! [`watch`] channel. Changing the timezone cancels the running timer before
//! the replacement starts; unmounting or dropping the tracker cancels it.
//!
//! Timers are tokio tasks spawned onto the host's runtime, which for a UI
//! host is a single `current_thread` runtime driven by its event loop.
//!
//! An unresolvable timezone never stops the marker: it is logged once per
//! timer and the device-local wall clock is used instead.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::AgendaConfig;
use crate::error::{AgendaError, Result};
use crate::layout::{indicator_offset, TimelineConfig};
use crate::time_math::{
    local_minutes_since_midnight, resolve_minutes, resolve_timezone, wall_clock_minutes,
};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Where the marker sits at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPosition {
    pub minutes: u32,
    /// Y offset on the timeline canvas, in pixels.
    pub top: f64,
    pub timezone: String,
    /// `true` when `timezone` could not be resolved and device-local time was used.
    pub fallback: bool,
}

/// Marker position for `instant` in `timezone`.
pub fn indicator_position(
    instant: DateTime<Utc>,
    timezone: &str,
    timeline: &TimelineConfig,
) -> IndicatorPosition {
    let (minutes, fallback) = resolve_minutes(instant, timezone);
    IndicatorPosition {
        minutes,
        top: indicator_offset(minutes, timeline),
        timezone: timezone.to_string(),
        fallback,
    }
}

fn position_in_zone(
    instant: DateTime<Utc>,
    zone: Option<Tz>,
    timezone: &str,
    timeline: &TimelineConfig,
) -> IndicatorPosition {
    let minutes = match zone {
        Some(tz) => wall_clock_minutes(&instant.with_timezone(&tz)),
        None => local_minutes_since_midnight(instant),
    };
    IndicatorPosition {
        minutes,
        top: indicator_offset(minutes, timeline),
        timezone: timezone.to_string(),
        fallback: zone.is_none(),
    }
}

/// Cancel handle for a running indicator timer.
///
/// Cancelling is idempotent and also happens on drop, so a subscription can
/// never outlive its owner.
#[derive(Debug)]
pub struct IndicatorSubscription {
    handle: JoinHandle<()>,
}

impl IndicatorSubscription {
    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for IndicatorSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start a timer that reports the marker position for `timezone`.
///
/// `on_tick` runs once immediately and then every `tick`. The timer lives
/// until the returned subscription is cancelled or dropped.
///
/// # Errors
///
/// Returns [`AgendaError::Timer`] when called outside a tokio runtime or
/// with a zero `tick`.
pub fn spawn_indicator<F>(
    clock: Arc<dyn Clock>,
    timezone: String,
    timeline: TimelineConfig,
    tick: Duration,
    mut on_tick: F,
) -> Result<IndicatorSubscription>
where
    F: FnMut(IndicatorPosition) + Send + 'static,
{
    if tick.is_zero() {
        return Err(AgendaError::Timer("tick must be longer than zero".to_string()));
    }
    let runtime = Handle::try_current().map_err(|e| AgendaError::Timer(e.to_string()))?;

    let zone = match resolve_timezone(&timezone) {
        Ok(tz) => Some(tz),
        Err(err) => {
            tracing::warn!(
                timezone = %timezone,
                error = %err,
                "timezone resolution failed; indicator uses device-local time"
            );
            None
        }
    };

    on_tick(position_in_zone(clock.now(), zone, &timezone, &timeline));

    let handle = runtime.spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + tick, tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            on_tick(position_in_zone(clock.now(), zone, &timezone, &timeline));
        }
    });

    Ok(IndicatorSubscription { handle })
}

/// Counts timer tasks that have not been torn down yet.
struct LiveTimer(Arc<AtomicUsize>);

impl LiveTimer {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LiveTimer {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Moved into a timer task; dropped with it.
struct Publisher {
    sender: Arc<watch::Sender<Option<IndicatorPosition>>>,
    _live: LiveTimer,
}

impl Publisher {
    fn publish(&self, position: IndicatorPosition) {
        self.sender.send_replace(Some(position));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Active,
    Stopped,
}

/// Owns the now-marker timer of one mounted timeline view.
pub struct LiveIndicatorTracker {
    clock: Arc<dyn Clock>,
    timeline: TimelineConfig,
    tick: Duration,
    default_timezone: String,
    sender: Arc<watch::Sender<Option<IndicatorPosition>>>,
    subscription: Option<IndicatorSubscription>,
    timezone: Option<String>,
    live: Arc<AtomicUsize>,
}

impl LiveIndicatorTracker {
    pub fn new(clock: Arc<dyn Clock>, config: &AgendaConfig) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            clock,
            timeline: config.timeline,
            tick: config.indicator.tick(),
            default_timezone: config.default_timezone.clone(),
            sender: Arc::new(sender),
            subscription: None,
            timezone: None,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Receiver of marker positions; `None` until first mounted.
    pub fn subscribe(&self) -> watch::Receiver<Option<IndicatorPosition>> {
        self.sender.subscribe()
    }

    /// Latest published position.
    pub fn current(&self) -> Option<IndicatorPosition> {
        self.sender.borrow().clone()
    }

    /// Start tracking `timezone` (blank means the configured default).
    /// Mounting an already mounted tracker restarts its timer.
    ///
    /// # Errors
    ///
    /// Returns [`AgendaError::Timer`] outside a tokio runtime; the tracker is
    /// left stopped.
    pub fn mount(&mut self, timezone: &str) -> Result<()> {
        self.stop();

        let timezone = match timezone.trim() {
            "" => self.default_timezone.clone(),
            tz => tz.to_string(),
        };

        let publisher = Publisher {
            sender: Arc::clone(&self.sender),
            _live: LiveTimer::new(Arc::clone(&self.live)),
        };
        let subscription = spawn_indicator(
            Arc::clone(&self.clock),
            timezone.clone(),
            self.timeline,
            self.tick,
            move |position| publisher.publish(position),
        )?;

        tracing::debug!(timezone = %timezone, tick_secs = self.tick.as_secs(), "indicator mounted");
        self.subscription = Some(subscription);
        self.timezone = Some(timezone);
        Ok(())
    }

    /// Follow a new timezone. The old timer is cancelled before the new one
    /// starts. A no-op when the timezone is unchanged and the tracker is active.
    ///
    /// # Errors
    ///
    /// See [`LiveIndicatorTracker::mount`].
    pub fn set_timezone(&mut self, timezone: &str) -> Result<()> {
        if self.state() == TrackerState::Active
            && self.timezone.as_deref() == Some(timezone.trim())
        {
            return Ok(());
        }
        self.mount(timezone)
    }

    /// Stop the timer. The last published position stays readable.
    pub fn unmount(&mut self) {
        if self.subscription.is_some() {
            tracing::debug!(timezone = ?self.timezone, "indicator unmounted");
        }
        self.stop();
        self.timezone = None;
    }

    fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }

    pub fn state(&self) -> TrackerState {
        if self.subscription.is_some() {
            TrackerState::Active
        } else {
            TrackerState::Stopped
        }
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// Timer tasks spawned by this tracker that have not been torn down.
    /// Cancellation completes on the runtime's next turn.
    pub fn active_timers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl Drop for LiveIndicatorTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
