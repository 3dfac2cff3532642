//! The event log engine.
//!
//! Owns the multiset of recorded events in insertion order. Storage order
//! carries no meaning beyond tie-breaking; presentation order is produced
//! on demand by [`EventLog::sorted`] and never persisted.
//!
//! Recording is not gated on playback here; callers decide when a record
//! is meaningful. Duplicate `(time, emotion)` pairs are kept as separate
//! observations.

use emolabel_core::{defaults, format_clock, EmoLabelError, EmotionCatalog, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::event::{EmotionEvent, EventId, EventPatch};

/// Presentation order for [`EventLog::sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Ascending time; equal times keep insertion order.
    #[default]
    Time,
    /// Catalog display label; dangling ids sort by the raw id.
    EmotionLabel,
}

/// The ordered collection of recorded emotion events.
#[derive(Debug, Clone)]
pub struct EventLog {
    catalog: Arc<EmotionCatalog>,
    events: Vec<EmotionEvent>,
}

impl EventLog {
    pub fn new(catalog: Arc<EmotionCatalog>) -> Self {
        Self {
            catalog,
            events: Vec::new(),
        }
    }

    /// A log over the built-in catalog.
    pub fn with_standard_catalog() -> Self {
        Self::new(Arc::new(EmotionCatalog::standard()))
    }

    pub fn catalog(&self) -> &EmotionCatalog {
        &self.catalog
    }

    pub fn catalog_arc(&self) -> Arc<EmotionCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Append a new event. The emotion must exist in the catalog and the
    /// time must be a finite, non-negative number of seconds; it is not
    /// checked against any duration.
    pub fn record(&mut self, emotion_id: &str, time: f64) -> Result<EventId> {
        validate_time(time)?;
        self.validate_emotion(emotion_id)?;
        let id = EventId::new();
        self.events.push(EmotionEvent::new(id, time, emotion_id));
        debug!(%id, emotion = emotion_id, time, "Recorded emotion event");
        Ok(id)
    }

    /// Append a previously serialized event without catalog validation.
    /// A colliding id is replaced by a fresh one.
    pub(crate) fn restore(&mut self, id: Option<EventId>, time: f64, emotion_id: String) {
        let id = match id {
            Some(id) if self.get(id).is_none() => id,
            _ => EventId::new(),
        };
        self.events.push(EmotionEvent::new(id, time, emotion_id));
    }

    /// Apply a partial update. Returns `Ok(false)` when `id` is unknown,
    /// which callers should treat as a desynchronization bug. Invalid patch
    /// values are rejected without touching the event.
    pub fn update(&mut self, id: EventId, patch: &EventPatch) -> Result<bool> {
        if let Some(time) = patch.time {
            validate_time(time)?;
        }
        if let Some(emotion_id) = &patch.emotion_id {
            self.validate_emotion(emotion_id)?;
        }
        match self.events.iter_mut().find(|e| e.id() == id) {
            Some(event) => {
                event.apply(patch);
                debug!(%id, "Updated emotion event");
                Ok(true)
            }
            None => {
                warn!(%id, "Update for unknown event id ignored");
                Ok(false)
            }
        }
    }

    /// Remove an event. Deleting a missing id is a no-op returning `false`.
    pub fn delete(&mut self, id: EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id() != id);
        let removed = self.events.len() != before;
        if removed {
            debug!(%id, "Deleted emotion event");
        } else {
            warn!(%id, "Delete for unknown event id ignored");
        }
        removed
    }

    pub fn get(&self, id: EventId) -> Option<&EmotionEvent> {
        self.events.iter().find(|e| e.id() == id)
    }

    /// Events with `|time - near| <= window`, in insertion order.
    pub fn query_near(&self, near: f64, window: f64) -> Vec<&EmotionEvent> {
        let window = if window.is_nan() { 0.0 } else { window.max(0.0) };
        self.events
            .iter()
            .filter(|e| (e.time() - near).abs() <= window)
            .collect()
    }

    /// [`EventLog::query_near`] with the default half-second window.
    pub fn active_at(&self, near: f64) -> Vec<&EmotionEvent> {
        self.query_near(near, defaults::QUERY_WINDOW_SECS)
    }

    /// All events in presentation order. The sort is stable.
    pub fn sorted(&self, key: SortKey) -> Vec<&EmotionEvent> {
        let mut view: Vec<&EmotionEvent> = self.events.iter().collect();
        match key {
            SortKey::Time => view.sort_by(|a, b| a.time().total_cmp(&b.time())),
            SortKey::EmotionLabel => view.sort_by(|a, b| {
                collate(
                    self.catalog.label_or_id(a.emotion_id()),
                    self.catalog.label_or_id(b.emotion_id()),
                )
            }),
        }
        view
    }

    /// Events whose resolved label or `HH:MM:SS` time contains `term`,
    /// ignoring case. An empty term matches everything.
    pub fn filter(&self, term: &str) -> Vec<&EmotionEvent> {
        self.events.iter().filter(|e| self.matches(e, term)).collect()
    }

    /// Sorted, then filtered: what the editor shows.
    pub fn view(&self, key: SortKey, term: &str) -> Vec<&EmotionEvent> {
        self.sorted(key)
            .into_iter()
            .filter(|e| self.matches(e, term))
            .collect()
    }

    fn matches(&self, event: &EmotionEvent, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.catalog
            .label_or_id(event.emotion_id())
            .to_lowercase()
            .contains(&needle)
            || format_clock(event.time()).contains(&needle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmotionEvent> {
        self.events.iter()
    }

    /// `(time, emotion_id)` pairs in insertion order, ignoring ids.
    pub fn entries(&self) -> Vec<(f64, &str)> {
        self.events
            .iter()
            .map(|e| (e.time(), e.emotion_id()))
            .collect()
    }

    /// Ids of events whose emotion is missing from the catalog.
    pub fn dangling_ids(&self) -> HashSet<EventId> {
        self.events
            .iter()
            .filter(|e| !self.catalog.contains(e.emotion_id()))
            .map(EmotionEvent::id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn validate_emotion(&self, emotion_id: &str) -> Result<()> {
        if self.catalog.contains(emotion_id) {
            Ok(())
        } else {
            Err(EmoLabelError::UnknownEmotion(emotion_id.to_string()))
        }
    }
}

fn validate_time(time: f64) -> Result<()> {
    if time.is_finite() && time >= 0.0 {
        Ok(())
    } else {
        Err(EmoLabelError::InvalidParameter(format!(
            "Event time must be a non-negative number of seconds, got {}",
            time
        )))
    }
}

/// Case-insensitive label ordering; falls back to exact comparison so the
/// order is total.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
