//! Text labeling session: the loaded entries plus a cursor.

use emolabel_core::{EmoLabelError, EmotionKey, Result};
use tracing::{debug, info};

use crate::codec;
use crate::entry::TextEntry;

/// Result of moving the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The cursor moved to this index.
    Moved(usize),
    /// Already on the last entry.
    AtEnd,
    /// Already on the first entry.
    AtStart,
    /// No entries are loaded.
    Empty,
}

/// Entries being labeled and the index of the one on screen.
#[derive(Debug, Clone, Default)]
pub struct TextSession {
    entries: Vec<TextEntry>,
    cursor: usize,
}

impl TextSession {
    pub fn new(entries: Vec<TextEntry>) -> Self {
        Self { entries, cursor: 0 }
    }

    /// Replace every entry with a freshly imported set.
    pub fn load(&mut self, entries: Vec<TextEntry>) {
        info!(entries = entries.len(), "Loaded text entries");
        self.entries = entries;
        self.cursor = 0;
    }

    pub fn entries(&self) -> &[TextEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&TextEntry> {
        self.entries.get(self.cursor)
    }

    /// Jump to `index`. Out-of-range indexes are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> Navigation {
        if self.entries.is_empty() {
            Navigation::Empty
        } else if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            Navigation::Moved(self.cursor)
        } else {
            Navigation::AtEnd
        }
    }

    pub fn previous(&mut self) -> Navigation {
        if self.entries.is_empty() {
            Navigation::Empty
        } else if self.cursor > 0 {
            self.cursor -= 1;
            Navigation::Moved(self.cursor)
        } else {
            Navigation::AtStart
        }
    }

    /// Toggle `key` on the current entry; `None` when nothing is loaded.
    pub fn toggle(&mut self, key: EmotionKey) -> Option<u8> {
        let index = self.cursor;
        let entry = self.entries.get_mut(index)?;
        let score = entry.emotions.toggle(key);
        debug!(index, emotion = %key, score, "Toggled emotion");
        Some(score)
    }

    /// Set `key` on the current entry to 0 or 1.
    pub fn set_score(&mut self, key: EmotionKey, score: u8) -> Result<()> {
        let entry = self
            .entries
            .get_mut(self.cursor)
            .ok_or_else(|| EmoLabelError::EmptyInput("No entry selected".into()))?;
        entry.emotions.set(key, score)
    }

    /// Entries with at least one emotion set.
    pub fn completed(&self) -> usize {
        self.entries.iter().filter(|e| e.is_completed()).count()
    }

    /// Completed entries as a percentage; 0 when nothing is loaded.
    pub fn progress_percent(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.completed() as f64 / self.entries.len() as f64 * 100.0
        }
    }

    /// CSV export of every entry in original row order.
    pub fn export_csv(&self) -> Result<String> {
        if self.entries.is_empty() {
            return Err(EmoLabelError::EmptyInput("No data to export".into()));
        }
        codec::export_entries(&self.entries)
    }
}
