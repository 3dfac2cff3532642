//! Text entries and their emotion scores.

use emolabel_core::{EmoLabelError, EmotionKey, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Binary score per [`EmotionKey`], stored in key order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmotionScores([u8; 8]);

impl EmotionScores {
    pub fn get(&self, key: EmotionKey) -> u8 {
        self.0[key.index()]
    }

    /// Set a score. Only 0 and 1 are valid.
    pub fn set(&mut self, key: EmotionKey, score: u8) -> Result<()> {
        if score > 1 {
            return Err(EmoLabelError::InvalidParameter(format!(
                "Score for {} must be 0 or 1, got {}",
                key, score
            )));
        }
        self.0[key.index()] = score;
        Ok(())
    }

    /// Flip between 0 and 1, returning the new score.
    pub fn toggle(&mut self, key: EmotionKey) -> u8 {
        let slot = &mut self.0[key.index()];
        *slot = if *slot == 0 { 1 } else { 0 };
        *slot
    }

    /// True when any emotion is set.
    pub fn any(&self) -> bool {
        self.0.iter().any(|&s| s > 0)
    }

    /// `(key, score)` pairs in export column order.
    pub fn iter(&self) -> impl Iterator<Item = (EmotionKey, u8)> + '_ {
        EmotionKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

/// One imported text row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEntry {
    pub id: Uuid,
    pub text: String,
    pub emotions: EmotionScores,
    /// Row position in the imported file; export order follows it.
    pub original_index: usize,
}

impl TextEntry {
    /// A fresh entry with every score at zero.
    pub fn new(text: impl Into<String>, original_index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            emotions: EmotionScores::default(),
            original_index,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.emotions.any()
    }
}
