//! Embedded player adapter.
//!
//! An embedded player exposes no callback channel, so its playback position
//! cannot be observed. The adapter reports the time of a parallel manual
//! timer that the annotator starts and stops alongside the embedded video,
//! and advertises [`ClockFidelity::Manual`] so hosts can say so.

use emolabel_core::{EmoLabelError, Result};
use tracing::info;

use crate::timer::TimerHandle;
use crate::{ClockFidelity, SourceKind, TimeSource};

/// Time source for an embedded player URL, clocked by hand.
#[derive(Debug, Clone)]
pub struct EmbedSource {
    url: String,
    clock: TimerHandle,
}

impl EmbedSource {
    /// Create an embed source. Only `http(s)` URLs are accepted.
    pub fn new(url: &str, clock: TimerHandle) -> Result<Self> {
        let url = url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(EmoLabelError::InvalidParameter(format!(
                "Embed URL must be http(s): {}",
                url
            )));
        }
        info!(url, "Embed source created (manual clock)");
        Ok(Self {
            url: url.to_string(),
            clock,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The manual clock standing in for the embedded player's position.
    pub fn clock(&self) -> &TimerHandle {
        &self.clock
    }
}

impl TimeSource for EmbedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Embed
    }

    fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    fn duration(&self) -> f64 {
        self.clock.duration()
    }

    fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    fn seek(&mut self, time: f64) {
        self.clock.seek(time);
    }

    fn play(&mut self) {
        self.clock.play();
    }

    fn pause(&mut self) {
        self.clock.pause();
    }

    fn fidelity(&self) -> ClockFidelity {
        ClockFidelity::Manual
    }
}
