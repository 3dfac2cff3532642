//! EmoLabel Source - Time source adapters
//!
//! Normalizes heterogeneous time providers behind one contract
//! ([`TimeSource`]): current time, duration, playing state, seek, play and
//! pause.
//!
//! Variants:
//! - `LocalMedia`: a native media element with metadata events
//! - `EmbedSource`: an opaque embedded player driven by a manual clock
//! - `CapturedStream`: a captured stream bound to a hidden media element
//! - `TimerHandle`: a software clock advanced by `TimerDriver` ticks
//!
//! Exactly one source is active at a time, owned by [`ActiveSource`], which
//! releases native resources before activating the next source.

pub mod capture;
pub mod driver;
pub mod embed;
pub mod local;
pub mod slot;
pub mod timer;

pub use capture::{CaptureProvider, CaptureStream, CapturedStream};
pub use driver::TimerDriver;
pub use embed::EmbedSource;
pub use local::{LocalMedia, MediaElement};
pub use slot::ActiveSource;
pub use timer::{custom_duration, ManualTimer, TickOutcome, TimerHandle, TimerPreset};

use std::fmt;

/// Which kind of provider backs a time source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    LocalMedia,
    Embed,
    CapturedStream,
    Timer,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LocalMedia => "local media",
            Self::Embed => "embed",
            Self::CapturedStream => "captured stream",
            Self::Timer => "manual timer",
        };
        f.write_str(name)
    }
}

/// Whether the reported time is observed from the media or driven by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockFidelity {
    /// Time is read from the playing media.
    Observed,
    /// Time comes from a manual clock the annotator starts and stops; it is
    /// not synchronized with any underlying content.
    Manual,
}

/// Something a source reports when polled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceEvent {
    /// Nothing changed that the owner must react to.
    Idle,
    /// Media metadata arrived; playback was reset to zero.
    MetadataLoaded { duration: f64 },
    /// The native resource went away (e.g. the user revoked sharing).
    Revoked,
}

/// Transient state of the active source.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SourceState {
    pub current_time: f64,
    pub duration: f64,
    pub is_playing: bool,
}

/// The contract every time provider implements.
///
/// This is the only interface the annotation core depends on from the
/// surrounding host.
pub trait TimeSource: Send {
    fn kind(&self) -> SourceKind;

    /// Current position in seconds from the source's zero point.
    fn current_time(&self) -> f64;

    /// Total length in seconds; zero when unknown.
    fn duration(&self) -> f64;

    fn is_playing(&self) -> bool;

    /// Move the position; implementations clamp to `[0, duration]`.
    fn seek(&mut self, time: f64);

    fn play(&mut self);

    fn pause(&mut self);

    fn fidelity(&self) -> ClockFidelity {
        ClockFidelity::Observed
    }

    /// Pull pending notifications from the native handle.
    fn poll(&mut self) -> SourceEvent {
        SourceEvent::Idle
    }

    /// Release any native resource. Must be idempotent.
    fn release(&mut self) {}

    fn state(&self) -> SourceState {
        SourceState {
            current_time: self.current_time(),
            duration: self.duration(),
            is_playing: self.is_playing(),
        }
    }
}

/// Clamp a seek target into `[0, duration]`; non-finite targets become zero.
pub(crate) fn clamp_time(time: f64, duration: f64) -> f64 {
    if !time.is_finite() {
        return 0.0;
    }
    time.clamp(0.0, duration.max(0.0))
}

/// Replace NaN/negative/infinite readings from native handles with zero.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
