//! Recorded emotion events.

use emolabel_core::format_clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, immutable event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// One recorded emotion tag.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionEvent {
    id: EventId,
    time: f64,
    emotion_id: String,
}

impl EmotionEvent {
    pub(crate) fn new(id: EventId, time: f64, emotion_id: impl Into<String>) -> Self {
        Self {
            id,
            time,
            emotion_id: emotion_id.into(),
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    /// Seconds from the time source's zero point.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Catalog id; may dangle if the catalog no longer has it.
    pub fn emotion_id(&self) -> &str {
        &self.emotion_id
    }

    /// `HH:MM:SS`, always derived from `time`.
    pub fn time_formatted(&self) -> String {
        format_clock(self.time)
    }

    pub(crate) fn apply(&mut self, patch: &EventPatch) {
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(emotion_id) = &patch.emotion_id {
            self.emotion_id.clone_from(emotion_id);
        }
    }
}

/// A partial update to an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub time: Option<f64>,
    pub emotion_id: Option<String>,
}

impl EventPatch {
    pub fn time(time: f64) -> Self {
        Self {
            time: Some(time),
            emotion_id: None,
        }
    }

    pub fn emotion(emotion_id: impl Into<String>) -> Self {
        Self {
            time: None,
            emotion_id: Some(emotion_id.into()),
        }
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_emotion(mut self, emotion_id: impl Into<String>) -> Self {
        self.emotion_id = Some(emotion_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.emotion_id.is_none()
    }
}
