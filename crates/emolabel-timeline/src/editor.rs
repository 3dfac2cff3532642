//! Editor surface: sorted and searchable rows plus edit-in-place drafts.
//!
//! The editor keeps no copy of the events. Rows are rebuilt from the log on
//! every call, and a draft holds only scratch values until it is saved
//! through [`EventLog::update`] in a single patch.

use emolabel_core::{format_clock, format_precise, EmoLabelError, Result, Rgb, Timecode};
use tracing::warn;

use crate::event::{EventId, EventPatch};
use crate::log::{EventLog, SortKey};

/// One display row.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorRow {
    pub id: EventId,
    pub time: f64,
    /// `HH:MM:SS`
    pub time_formatted: String,
    /// `HH:MM:SS.mmm`
    pub time_precise: String,
    pub label: String,
    pub color: Rgb,
}

/// Scratch copy of an event being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub id: EventId,
    pub time: f64,
    pub emotion_id: String,
    /// Text shown in the time field; kept in sync with `time`.
    pub time_text: String,
    time_error: Option<String>,
}

impl EditDraft {
    /// Take the time from `HH:MM:SS.mmm` text. Invalid text leaves the
    /// draft time unchanged and is reported by [`Self::time_error`] until
    /// the field holds a valid time again.
    pub fn set_time_text(&mut self, text: &str) -> Result<()> {
        self.time_text = text.to_string();
        match text.parse::<Timecode>() {
            Ok(timecode) => {
                self.time = timecode.as_seconds();
                self.time_error = None;
                Ok(())
            }
            Err(e) => {
                self.time_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Why the time text was rejected, if it currently is.
    pub fn time_error(&self) -> Option<&str> {
        self.time_error.as_deref()
    }

    /// Take the time from a slider bounded to `[0, duration]`.
    pub fn set_time_slider(&mut self, value: f64, duration: f64) {
        let upper = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        self.time = if value.is_finite() { value.clamp(0.0, upper) } else { 0.0 };
        self.time_text = format_precise(self.time);
        self.time_error = None;
    }

    pub fn set_emotion(&mut self, emotion_id: impl Into<String>) {
        self.emotion_id = emotion_id.into();
    }
}

/// Sort, search and edit state for the event table.
#[derive(Debug, Clone, Default)]
pub struct EventEditor {
    pub sort: SortKey,
    pub search: String,
    draft: Option<EditDraft>,
}

impl EventEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in the current sort order matching the current search term.
    pub fn rows(&self, log: &EventLog) -> Vec<EditorRow> {
        let catalog = log.catalog();
        log.view(self.sort, &self.search)
            .into_iter()
            .map(|event| EditorRow {
                id: event.id(),
                time: event.time(),
                time_formatted: format_clock(event.time()),
                time_precise: format_precise(event.time()),
                label: catalog.label_or_id(event.emotion_id()).to_string(),
                color: catalog.color_or_fallback(event.emotion_id()),
            })
            .collect()
    }

    /// Start editing `id`, replacing any open draft. Returns `false` when
    /// the event does not exist.
    pub fn begin_edit(&mut self, log: &EventLog, id: EventId) -> bool {
        match log.get(id) {
            Some(event) => {
                self.draft = Some(EditDraft {
                    id,
                    time: event.time(),
                    emotion_id: event.emotion_id().to_string(),
                    time_text: format_precise(event.time()),
                    time_error: None,
                });
                true
            }
            None => {
                warn!(%id, "Edit requested for unknown event id");
                false
            }
        }
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    pub fn is_editing(&self, id: EventId) -> bool {
        self.draft.as_ref().is_some_and(|d| d.id == id)
    }

    /// Save time and emotion in one update. A rejected update keeps the
    /// draft open; an update on a vanished event closes it and reports a
    /// parameter error.
    pub fn save(&mut self, log: &mut EventLog) -> Result<()> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(());
        };
        let patch = EventPatch::time(draft.time).with_emotion(draft.emotion_id.clone());
        let id = draft.id;
        let applied = log.update(id, &patch)?;
        self.draft = None;
        if applied {
            Ok(())
        } else {
            Err(EmoLabelError::InvalidParameter(format!(
                "Edited event {} no longer exists",
                id
            )))
        }
    }

    /// Drop the draft without touching the log.
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
