//! Wall-clock media element.

use emolabel_source::MediaElement;
use std::time::Instant;

/// A media element whose playback position advances with real time while
/// playing. It stops by itself at the end of a finite duration.
#[derive(Debug, Clone)]
pub struct ClockedMedia {
    duration: Option<f64>,
    /// Position at the last play/seek/pause.
    base: f64,
    /// Set while playing.
    started: Option<Instant>,
}

impl ClockedMedia {
    /// `None` means metadata has not arrived; `Some(f64::INFINITY)` is a
    /// live stream.
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            duration,
            base: 0.0,
            started: None,
        }
    }

    /// Supply duration metadata after creation.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = Some(duration);
    }

    pub(crate) fn position_at(&self, now: Instant) -> f64 {
        let elapsed = self
            .started
            .map(|t| now.saturating_duration_since(t).as_secs_f64())
            .unwrap_or(0.0);
        let position = self.base + elapsed;
        match self.duration {
            Some(d) if d.is_finite() => position.min(d.max(0.0)),
            _ => position,
        }
    }

    fn ended_at(&self, now: Instant) -> bool {
        match self.duration {
            Some(d) if d.is_finite() => self.position_at(now) >= d,
            _ => false,
        }
    }
}

impl MediaElement for ClockedMedia {
    fn position(&self) -> f64 {
        self.position_at(Instant::now())
    }

    fn set_position(&mut self, seconds: f64) {
        self.base = seconds.max(0.0);
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.started.is_none() || self.ended_at(Instant::now())
    }

    fn play(&mut self) {
        let now = Instant::now();
        if self.ended_at(now) {
            self.base = 0.0;
        }
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    fn pause(&mut self) {
        let now = Instant::now();
        self.base = self.position_at(now);
        self.started = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_paused_until_played() {
        let media = ClockedMedia::new(Some(10.0));
        assert!(media.is_paused());
        assert_eq!(media.position(), 0.0);
    }

    #[test]
    fn test_position_stops_at_duration() {
        let mut media = ClockedMedia::new(Some(10.0));
        media.play();
        let start = media.started.unwrap();
        assert_eq!(media.position_at(start + Duration::from_secs(4)), 4.0);
        assert_eq!(media.position_at(start + Duration::from_secs(12)), 10.0);
        assert!(media.ended_at(start + Duration::from_secs(12)));
    }

    #[test]
    fn test_pause_freezes_position() {
        let mut media = ClockedMedia::new(Some(10.0));
        media.set_position(3.5);
        media.play();
        media.pause();
        assert!(media.is_paused());
        assert!(media.position() >= 3.5);
        assert!(media.position() < 4.0);
    }

    #[test]
    fn test_live_stream_has_no_end() {
        let mut media = ClockedMedia::new(Some(f64::INFINITY));
        media.play();
        let start = media.started.unwrap();
        assert_eq!(media.position_at(start + Duration::from_secs(7200)), 7200.0);
        assert!(!media.is_paused());
    }
}
