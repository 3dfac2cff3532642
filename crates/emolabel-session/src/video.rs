//! Time-based annotation: the event log driven by the active time source.

use emolabel_core::{defaults, Command, EmoLabelError, EmotionCatalog, LabelMode, Result};
use emolabel_source::{ActiveSource, SourceEvent, SourceKind, TimeSource};
use emolabel_timeline::{
    decode_events_csv, encode_events_csv, EmotionDataExport, EventEditor, EventId, EventLog,
    TimelineProjector,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::keyboard::{KeyboardHub, Subscription};

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoAction {
    Recorded(EventId),
    /// The source is paused or absent; nothing was recorded.
    NotPlaying,
    UnknownTrigger(char),
    /// Playback toggled; carries the new playing state.
    PlaybackToggled(bool),
    Ignored,
}

/// Event log, active source and editor state for one annotation session.
pub struct VideoAnnotator {
    log: EventLog,
    source: ActiveSource,
    editor: EventEditor,
    subscription: Option<Subscription>,
    query_window: f64,
}

impl VideoAnnotator {
    pub fn new(catalog: Arc<EmotionCatalog>) -> Self {
        Self {
            log: EventLog::new(catalog),
            source: ActiveSource::new(),
            editor: EventEditor::new(),
            subscription: None,
            query_window: defaults::QUERY_WINDOW_SECS,
        }
    }

    pub fn with_query_window(mut self, window: f64) -> Self {
        self.query_window = window;
        self
    }

    /// Start receiving key presses from `hub`, replacing any prior
    /// subscription.
    pub fn attach(&mut self, hub: &KeyboardHub) {
        self.subscription = Some(hub.subscribe(LabelMode::Timed));
    }

    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    pub fn source(&self) -> &ActiveSource {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut ActiveSource {
        &mut self.source
    }

    pub fn editor(&self) -> &EventEditor {
        &self.editor
    }

    /// Editor and log together, for saving a draft.
    pub fn editor_and_log_mut(&mut self) -> (&mut EventEditor, &mut EventLog) {
        (&mut self.editor, &mut self.log)
    }

    pub fn editor_mut(&mut self) -> &mut EventEditor {
        &mut self.editor
    }

    /// Replace the active source; the previous one is released first.
    pub fn switch_source(&mut self, source: Box<dyn TimeSource>) {
        self.source.activate(source);
    }

    /// Acquire and switch. On failure the current source stays active.
    pub fn try_switch_source<F>(&mut self, acquire: F) -> Result<()>
    where
        F: FnOnce() -> Result<Box<dyn TimeSource>>,
    {
        self.source.try_activate(acquire)
    }

    /// Record `emotion_id` at the source's current time, but only while
    /// the source is playing.
    pub fn record(&mut self, emotion_id: &str) -> Result<VideoAction> {
        if !self.source.is_playing() {
            debug!(emotion = emotion_id, "Record ignored while not playing");
            return Ok(VideoAction::NotPlaying);
        }
        let time = self.source.current_time();
        self.log.record(emotion_id, time).map(VideoAction::Recorded)
    }

    /// Record the catalog entry bound to `key`.
    pub fn record_trigger(&mut self, key: char) -> Result<VideoAction> {
        let emotion_id = match self.log.catalog().by_trigger(key) {
            Some(def) => def.id.clone(),
            None => return Ok(VideoAction::UnknownTrigger(key)),
        };
        self.record(&emotion_id)
    }

    /// Space toggles playback for local media only.
    pub fn toggle_playback(&mut self) -> VideoAction {
        if self.source.kind() != Some(SourceKind::LocalMedia) {
            return VideoAction::Ignored;
        }
        self.source.toggle_playback();
        VideoAction::PlaybackToggled(self.source.is_playing())
    }

    pub fn apply(&mut self, command: Command) -> Result<VideoAction> {
        match command {
            Command::RecordEmotion(key) => self.record_trigger(key),
            Command::TogglePlayback => Ok(self.toggle_playback()),
            _ => Ok(VideoAction::Ignored),
        }
    }

    /// Apply every queued key command. A failing command is logged and the
    /// rest still run.
    pub fn process_input(&mut self) -> Vec<VideoAction> {
        let commands = match &self.subscription {
            Some(sub) => sub.drain(),
            None => return Vec::new(),
        };
        commands
            .into_iter()
            .filter_map(|command| match self.apply(command) {
                Ok(action) => Some(action),
                Err(e) => {
                    warn!(?command, error = %e, "Key command failed");
                    None
                }
            })
            .collect()
    }

    /// Poll the active source for metadata and revocation.
    pub fn poll(&mut self) -> SourceEvent {
        let event = self.source.poll();
        if event == SourceEvent::Revoked {
            info!("Time source revoked; annotation source cleared");
        }
        event
    }

    pub fn seek(&mut self, time: f64) {
        self.source.seek(time);
    }

    /// Projection of the log against the live source duration.
    pub fn projector(&self) -> TimelineProjector<'_> {
        TimelineProjector::new(&self.log, self.source.duration())
    }

    /// Short labels of events near the playhead.
    pub fn active_labels(&self) -> Vec<&str> {
        self.projector()
            .active_labels(self.source.current_time(), self.query_window)
    }

    pub fn export_csv(&self) -> Result<String> {
        encode_events_csv(&self.log)
    }

    pub fn export_json(&self) -> Result<Vec<u8>> {
        EmotionDataExport::from_log(&self.log, self.source.duration()).to_json()
    }

    /// Replace the log with a decoded CSV. The current log is untouched on
    /// failure.
    pub fn import_csv(&mut self, data: &str) -> Result<usize> {
        let log = decode_events_csv(data, self.log.catalog_arc())?;
        Ok(self.replace_log(log))
    }

    /// [`Self::import_csv`] over raw file bytes. Bytes that are not UTF-8
    /// fail the import instead of being replaced with U+FFFD.
    pub fn import_csv_bytes(&mut self, data: &[u8]) -> Result<usize> {
        let text = std::str::from_utf8(data)
            .map_err(|e| EmoLabelError::Csv(format!("File is not valid UTF-8: {}", e)))?;
        self.import_csv(text)
    }

    /// Replace the log with a decoded JSON export.
    pub fn import_json(&mut self, data: &[u8]) -> Result<usize> {
        let log = EmotionDataExport::from_json(data)?.into_log(self.log.catalog_arc())?;
        Ok(self.replace_log(log))
    }

    fn replace_log(&mut self, log: EventLog) -> usize {
        self.editor.cancel();
        self.log = log;
        info!(events = self.log.len(), "Event log replaced from import");
        self.log.len()
    }

    /// Delete through the log, surfacing a missing id as an error.
    pub fn delete_event(&mut self, id: EventId) -> Result<()> {
        if self.editor.is_editing(id) {
            self.editor.cancel();
        }
        if self.log.delete(id) {
            Ok(())
        } else {
            Err(EmoLabelError::InvalidParameter(format!(
                "Event {} does not exist",
                id
            )))
        }
    }
}
