//! Timeline projection: maps events and the playhead to percent offsets.
//!
//! The projector holds nothing but a borrow of the log; every call resolves
//! events and catalog entries afresh.

use emolabel_core::{format_compact, Rgb};

use crate::event::EventId;
use crate::log::EventLog;

/// Position of `time` as a percentage of `duration`, clamped to `[0, 100]`.
/// A zero, negative or non-finite duration projects everything to 0.
pub fn project(time: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !time.is_finite() {
        return 0.0;
    }
    ((time / duration) * 100.0).clamp(0.0, 100.0)
}

/// A renderable marker for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<'a> {
    pub id: EventId,
    pub percent: f64,
    pub color: Rgb,
    pub label: &'a str,
}

/// What a hovered marker shows.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    pub label: String,
    pub time_display: String,
    pub color: Rgb,
}

/// Read-only projection of an event log onto a timeline of `duration` seconds.
pub struct TimelineProjector<'a> {
    log: &'a EventLog,
    duration: f64,
}

impl<'a> TimelineProjector<'a> {
    pub fn new(log: &'a EventLog, duration: f64) -> Self {
        Self { log, duration }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// One marker per event, in insertion order.
    pub fn markers(&self) -> Vec<Marker<'a>> {
        let catalog = self.log.catalog();
        self.log
            .iter()
            .map(|event| Marker {
                id: event.id(),
                percent: project(event.time(), self.duration),
                color: catalog.color_or_fallback(event.emotion_id()),
                label: catalog.short_label_or_id(event.emotion_id()),
            })
            .collect()
    }

    /// Playhead position in percent.
    pub fn playhead(&self, current_time: f64) -> f64 {
        project(current_time, self.duration)
    }

    /// Seconds for a click at `fraction` (0..1) of the timeline width, or
    /// `None` when the duration is unknown.
    pub fn seek_target(&self, fraction: f64) -> Option<f64> {
        if !self.duration.is_finite() || self.duration <= 0.0 || !fraction.is_finite() {
            return None;
        }
        Some(fraction.clamp(0.0, 1.0) * self.duration)
    }

    /// Tooltip content for a hovered marker. Pure lookup, no mutation.
    pub fn hover(&self, id: EventId) -> Option<HoverInfo> {
        let event = self.log.get(id)?;
        let catalog = self.log.catalog();
        Some(HoverInfo {
            label: catalog.label_or_id(event.emotion_id()).to_string(),
            time_display: format_compact(event.time()),
            color: catalog.color_or_fallback(event.emotion_id()),
        })
    }

    /// Short labels of the events within `window` of `current_time`.
    pub fn active_labels(&self, current_time: f64, window: f64) -> Vec<&'a str> {
        let catalog = self.log.catalog();
        self.log
            .query_near(current_time, window)
            .into_iter()
            .map(|event| catalog.short_label_or_id(event.emotion_id()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_basic_and_clamped() {
        assert_eq!(project(5.0, 10.0), 50.0);
        assert_eq!(project(15.0, 10.0), 100.0);
        assert_eq!(project(-1.0, 10.0), 0.0);
    }

    #[test]
    fn test_zero_duration_projects_to_zero() {
        let mut log = EventLog::with_standard_catalog();
        log.record("joy", 0.0).unwrap();
        log.record("fear", 12.0).unwrap();

        let projector = TimelineProjector::new(&log, 0.0);
        assert!(projector.markers().iter().all(|m| m.percent == 0.0));
        assert_eq!(projector.playhead(3.0), 0.0);
        assert_eq!(projector.seek_target(0.5), None);
        assert!(!project(1.0, f64::NAN).is_nan());
    }

    #[test]
    fn test_markers_resolve_catalog() {
        let mut log = EventLog::with_standard_catalog();
        let id = log.record("surprise", 30.0).unwrap();

        let projector = TimelineProjector::new(&log, 120.0);
        let markers = projector.markers();
        assert_eq!(markers[0].percent, 25.0);
        assert_eq!(markers[0].label, "Surprise");
        assert_eq!(markers[0].color.to_string(), "#9370DB");

        let hover = projector.hover(id).unwrap();
        assert_eq!(hover.label, "Surprise（驚き）");
        assert_eq!(hover.time_display, "0:30");
        assert!(projector.hover(EventId::new()).is_none());
    }

    #[test]
    fn test_seek_target_and_active_labels() {
        let mut log = EventLog::with_standard_catalog();
        log.record("joy", 10.0).unwrap();
        log.record("trust", 10.3).unwrap();
        log.record("fear", 50.0).unwrap();

        let projector = TimelineProjector::new(&log, 100.0);
        assert_eq!(projector.seek_target(0.25), Some(25.0));
        assert_eq!(projector.seek_target(1.5), Some(100.0));
        assert_eq!(projector.active_labels(10.1, 0.5), vec!["Joy", "Trust"]);
    }
}
