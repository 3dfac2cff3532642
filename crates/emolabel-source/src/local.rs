//! Local media adapter.
//!
//! Time and duration come from a native media element. Duration is unknown
//! until the element reports metadata; at that moment playback is reset to
//! zero, matching a freshly loaded file.

use tracing::{debug, info};

use crate::{clamp_time, sanitize, SourceEvent, SourceKind, TimeSource};

/// A native media element the host can play, pause and position.
pub trait MediaElement: Send {
    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Write the playback position.
    fn set_position(&mut self, seconds: f64);

    /// Total duration once metadata is available. Live streams may report
    /// a non-finite value.
    fn duration(&self) -> Option<f64>;

    fn is_paused(&self) -> bool;

    fn play(&mut self);

    fn pause(&mut self);
}

/// Time source backed by a local media element.
pub struct LocalMedia<E: MediaElement> {
    element: E,
    duration: f64,
    metadata_loaded: bool,
}

impl<E: MediaElement> LocalMedia<E> {
    /// Bind an element. Metadata already present is applied immediately.
    pub fn new(element: E) -> Self {
        let mut media = Self {
            element,
            duration: 0.0,
            metadata_loaded: false,
        };
        media.load_metadata();
        media
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub fn metadata_loaded(&self) -> bool {
        self.metadata_loaded
    }

    fn load_metadata(&mut self) -> Option<f64> {
        if self.metadata_loaded {
            return None;
        }
        let duration = self.element.duration()?;
        self.duration = sanitize(duration);
        self.metadata_loaded = true;
        self.element.set_position(0.0);
        info!(duration = self.duration, "Local media metadata loaded");
        Some(self.duration)
    }
}

impl<E: MediaElement> TimeSource for LocalMedia<E> {
    fn kind(&self) -> SourceKind {
        SourceKind::LocalMedia
    }

    fn current_time(&self) -> f64 {
        sanitize(self.element.position())
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn is_playing(&self) -> bool {
        !self.element.is_paused()
    }

    fn seek(&mut self, time: f64) {
        let target = clamp_time(time, self.duration);
        debug!(requested = time, target, "Seek local media");
        self.element.set_position(target);
    }

    fn play(&mut self) {
        self.element.play();
    }

    fn pause(&mut self) {
        self.element.pause();
    }

    fn poll(&mut self) -> SourceEvent {
        match self.load_metadata() {
            Some(duration) => SourceEvent::MetadataLoaded { duration },
            None => SourceEvent::Idle,
        }
    }
}
