//! Captured stream adapter.
//!
//! A captured screen/media stream is bound to a hidden media element that
//! reports time the same way local media does. The stream is the one
//! resource with a real external lifetime: its tracks are stopped on
//! explicit release, on source switch (via [`crate::ActiveSource`]), on drop,
//! and when the provider reports that sharing was revoked, whichever comes
//! first. Stopping happens exactly once.

use emolabel_core::Result;
use tracing::{info, warn};

use crate::local::MediaElement;
use crate::{clamp_time, sanitize, SourceEvent, SourceKind, TimeSource};

/// A live captured stream with its bound element.
pub trait CaptureStream: MediaElement {
    /// Stop every track of the stream.
    fn stop_tracks(&mut self);

    /// False once the stream ended outside our control.
    fn is_live(&self) -> bool;
}

/// Acquires capture streams (permission prompts, device selection).
pub trait CaptureProvider {
    type Stream: CaptureStream + 'static;

    /// Acquire a stream. Permission or device failures are
    /// [`emolabel_core::EmoLabelError::Capture`] errors.
    fn acquire(&mut self) -> Result<Self::Stream>;
}

/// Time source backed by a captured stream.
pub struct CapturedStream<S: CaptureStream> {
    stream: S,
    released: bool,
}

impl<S: CaptureStream> CapturedStream<S> {
    pub fn new(stream: S) -> Self {
        info!("Capture stream bound");
        Self {
            stream,
            released: false,
        }
    }

    /// Acquire a stream from `provider` and bind it.
    pub fn acquire<P>(provider: &mut P) -> Result<Self>
    where
        P: CaptureProvider<Stream = S>,
    {
        provider.acquire().map(Self::new).map_err(|e| {
            warn!(error = %e, "Capture acquisition failed");
            e
        })
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<S: CaptureStream> TimeSource for CapturedStream<S> {
    fn kind(&self) -> SourceKind {
        SourceKind::CapturedStream
    }

    fn current_time(&self) -> f64 {
        sanitize(self.stream.position())
    }

    /// Live captures report no finite duration; the elapsed time stands in.
    fn duration(&self) -> f64 {
        match self.stream.duration() {
            Some(d) if d.is_finite() => sanitize(d),
            _ => self.current_time(),
        }
    }

    fn is_playing(&self) -> bool {
        !self.released && !self.stream.is_paused()
    }

    fn seek(&mut self, time: f64) {
        if self.released {
            return;
        }
        let target = clamp_time(time, self.duration());
        self.stream.set_position(target);
    }

    fn play(&mut self) {
        if !self.released {
            self.stream.play();
        }
    }

    fn pause(&mut self) {
        if !self.released {
            self.stream.pause();
        }
    }

    fn poll(&mut self) -> SourceEvent {
        if !self.released && !self.stream.is_live() {
            info!("Capture ended by the user");
            self.release();
            return SourceEvent::Revoked;
        }
        SourceEvent::Idle
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.stream.stop_tracks();
        self.released = true;
        info!("Capture stream released");
    }
}

impl<S: CaptureStream> Drop for CapturedStream<S> {
    fn drop(&mut self) {
        self.release();
    }
}
