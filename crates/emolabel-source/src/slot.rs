//! The single active-source slot.
//!
//! Exactly one time source is active at a time. Activating a new source
//! releases the previous one first, and the newly activated source starts
//! at time zero. Acquisition failures leave the previous source active.

use emolabel_core::Result;
use tracing::{info, warn};

use crate::{SourceEvent, SourceKind, SourceState, TimeSource};

/// Owns the currently active time source.
#[derive(Default)]
pub struct ActiveSource {
    current: Option<Box<dyn TimeSource>>,
}

impl ActiveSource {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Release the previous source and activate `source` at time zero.
    pub fn activate(&mut self, mut source: Box<dyn TimeSource>) {
        self.release_current();
        source.seek(0.0);
        info!(kind = %source.kind(), "Time source activated");
        self.current = Some(source);
    }

    /// Acquire a source with `acquire`, then activate it. On failure the
    /// previous source stays active and the error is returned.
    pub fn try_activate<F>(&mut self, acquire: F) -> Result<()>
    where
        F: FnOnce() -> Result<Box<dyn TimeSource>>,
    {
        match acquire() {
            Ok(source) => {
                self.activate(source);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Time source acquisition failed; keeping current source");
                Err(e)
            }
        }
    }

    /// Release and drop the active source.
    pub fn deactivate(&mut self) {
        self.release_current();
    }

    fn release_current(&mut self) {
        if let Some(mut previous) = self.current.take() {
            previous.pause();
            previous.release();
            info!(kind = %previous.kind(), "Time source released");
        }
    }

    pub fn kind(&self) -> Option<SourceKind> {
        self.current.as_ref().map(|s| s.kind())
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn source(&self) -> Option<&dyn TimeSource> {
        self.current.as_deref()
    }

    pub fn source_mut(&mut self) -> Option<&mut (dyn TimeSource + 'static)> {
        self.current.as_deref_mut()
    }

    /// Snapshot of the active source; all zero when nothing is active.
    pub fn state(&self) -> SourceState {
        self.current
            .as_ref()
            .map(|s| s.state())
            .unwrap_or_default()
    }

    pub fn current_time(&self) -> f64 {
        self.state().current_time
    }

    pub fn duration(&self) -> f64 {
        self.state().duration
    }

    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|s| s.is_playing())
    }

    pub fn seek(&mut self, time: f64) {
        if let Some(source) = self.current.as_mut() {
            source.seek(time);
        }
    }

    pub fn play(&mut self) {
        if let Some(source) = self.current.as_mut() {
            source.play();
        }
    }

    pub fn pause(&mut self) {
        if let Some(source) = self.current.as_mut() {
            source.pause();
        }
    }

    pub fn toggle_playback(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Poll the active source. A revoked source is released and dropped.
    pub fn poll(&mut self) -> SourceEvent {
        let event = match self.current.as_mut() {
            Some(source) => source.poll(),
            None => SourceEvent::Idle,
        };
        if event == SourceEvent::Revoked {
            self.release_current();
        }
        event
    }
}

impl Drop for ActiveSource {
    fn drop(&mut self) {
        self.release_current();
    }
}
