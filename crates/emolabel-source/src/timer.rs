//! Manual timer: a software clock for annotating without observable media.
//!
//! While playing, the timer accumulates wall-clock time measured from the
//! instant it last resumed. A tick (see [`crate::TimerDriver`]) folds the
//! time elapsed since the previous tick into the position, and pausing folds
//! in the remainder, so no playing time is lost around transitions.
//! Reaching the configured duration clamps the time and stops the timer, so
//! it never overshoots.

use emolabel_core::{EmoLabelError, Result};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{clamp_time, ClockFidelity, SourceKind, TimeSource};

/// What a tick did to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not playing; nothing changed.
    Idle,
    Advanced,
    /// The duration was reached; the timer clamped and stopped.
    Finished,
}

/// Duration presets offered by the timer controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPreset {
    FiveMinutes,
    TenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    ThreeHours,
}

impl TimerPreset {
    pub const ALL: [Self; 6] = [
        Self::FiveMinutes,
        Self::TenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
        Self::ThreeHours,
    ];

    pub fn seconds(self) -> f64 {
        match self {
            Self::FiveMinutes => 300.0,
            Self::TenMinutes => 600.0,
            Self::ThirtyMinutes => 1800.0,
            Self::OneHour => 3600.0,
            Self::TwoHours => 7200.0,
            Self::ThreeHours => 10800.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5 min",
            Self::TenMinutes => "10 min",
            Self::ThirtyMinutes => "30 min",
            Self::OneHour => "1 hour",
            Self::TwoHours => "2 hours",
            Self::ThreeHours => "3 hours",
        }
    }
}

/// Custom duration from hours/minutes/seconds. A non-positive total falls
/// back to one minute.
pub fn custom_duration(hours: u32, minutes: u32, seconds: u32) -> f64 {
    let total = u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds);
    if total == 0 {
        60.0
    } else {
        total as f64
    }
}

/// The timer state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualTimer {
    current: f64,
    duration: f64,
    playing: bool,
    /// Wall-clock instant up to which playing time has been applied.
    resumed_at: Option<Instant>,
}

impl ManualTimer {
    /// Create a stopped timer at zero. Non-positive or non-finite durations
    /// are rejected.
    pub fn new(duration: f64) -> Result<Self> {
        validate_duration(duration)?;
        Ok(Self {
            current: 0.0,
            duration,
            playing: false,
            resumed_at: None,
        })
    }

    pub fn current_time(&self) -> f64 {
        self.current
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Change the duration; the current time is clamped into the new range.
    pub fn set_duration(&mut self, duration: f64) -> Result<()> {
        validate_duration(duration)?;
        self.duration = duration;
        if self.current >= duration {
            self.current = duration;
            self.stop_playing();
        }
        Ok(())
    }

    /// Start playing now. A timer already at its end stays stopped.
    pub fn play(&mut self) {
        self.play_at(Instant::now());
    }

    /// Start playing, counting elapsed time from `now`.
    pub fn play_at(&mut self, now: Instant) {
        if self.playing || self.current >= self.duration {
            return;
        }
        self.playing = true;
        self.resumed_at = Some(now);
        debug!(at = self.current, "Timer started");
    }

    /// Apply the time played so far and stop.
    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn pause_at(&mut self, now: Instant) {
        self.tick(now);
        self.stop_playing();
    }

    /// Fold the wall-clock time since the last tick (or resume) into the
    /// position.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Idle;
        }
        let delta = match self.resumed_at.replace(now) {
            Some(since) => now.saturating_duration_since(since).as_secs_f64(),
            None => 0.0,
        };
        self.advance(delta)
    }

    /// Stop and rewind to zero.
    pub fn reset(&mut self) {
        self.stop_playing();
        self.current = 0.0;
    }

    pub fn seek(&mut self, time: f64) {
        self.current = clamp_time(time, self.duration);
    }

    /// Advance by `delta` seconds, independent of the wall clock.
    pub fn advance(&mut self, delta: f64) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Idle;
        }
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let next = self.current + delta;
        if next >= self.duration {
            self.current = self.duration;
            self.stop_playing();
            info!(duration = self.duration, "Timer reached its duration");
            TickOutcome::Finished
        } else {
            self.current = next;
            TickOutcome::Advanced
        }
    }

    fn stop_playing(&mut self) {
        self.playing = false;
        self.resumed_at = None;
    }
}

fn validate_duration(duration: f64) -> Result<()> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(EmoLabelError::InvalidParameter(format!(
            "Timer duration must be positive, got {}",
            duration
        )))
    }
}

/// Shared handle to a timer, cloned between the active-source slot and the
/// tick driver.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    inner: Arc<Mutex<ManualTimer>>,
}

impl TimerHandle {
    pub fn new(timer: ManualTimer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(timer)),
        }
    }

    /// Lock the timer for a compound update.
    pub fn lock(&self) -> MutexGuard<'_, ManualTimer> {
        self.inner.lock()
    }

    pub fn snapshot(&self) -> ManualTimer {
        self.inner.lock().clone()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn set_duration(&self, duration: f64) -> Result<()> {
        self.inner.lock().set_duration(duration)
    }
}

impl TimeSource for TimerHandle {
    fn kind(&self) -> SourceKind {
        SourceKind::Timer
    }

    fn current_time(&self) -> f64 {
        self.inner.lock().current_time()
    }

    fn duration(&self) -> f64 {
        self.inner.lock().duration()
    }

    fn is_playing(&self) -> bool {
        self.inner.lock().is_playing()
    }

    fn seek(&mut self, time: f64) {
        self.inner.lock().seek(time);
    }

    fn play(&mut self) {
        self.inner.lock().play();
    }

    fn pause(&mut self) {
        self.inner.lock().pause();
    }

    fn fidelity(&self) -> ClockFidelity {
        ClockFidelity::Manual
    }
}
