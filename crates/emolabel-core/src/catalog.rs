//! The emotion catalog: eight nameable emotions with display metadata.
//!
//! The catalog is loaded once per session and never mutated. Lookups are by
//! `id`; events that reference an id missing from the catalog fall back to
//! displaying the raw id.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{EmoLabelError, Result};

/// An 8-bit RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(EmoLabelError::InvalidParameter(format!(
                "Invalid hex color: {}",
                hex
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                EmoLabelError::InvalidParameter(format!("Invalid hex color: {}", hex))
            })
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Neutral grey used for dangling emotion references.
    pub const FALLBACK: Self = Self::new(0x99, 0x99, 0x99);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionDef {
    /// Stable identifier referenced by recorded events.
    pub id: String,
    /// Human label, optionally with a parenthetical localized gloss.
    pub label: String,
    /// Single-character trigger key.
    pub trigger_key: char,
    /// Display color as `#RRGGBB`.
    pub color: String,
}

impl EmotionDef {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        trigger_key: char,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            trigger_key,
            color: color.into(),
        }
    }

    /// The label without its parenthetical gloss: `Joy（喜び）` becomes `Joy`.
    pub fn short_label(&self) -> &str {
        short_label(&self.label)
    }

    /// Parsed display color, falling back to grey on a malformed hex string.
    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex(&self.color).unwrap_or(Rgb::FALLBACK)
    }
}

/// Strip a trailing gloss in ASCII or full-width parentheses.
pub fn short_label(label: &str) -> &str {
    label
        .split(&['（', '('][..])
        .next()
        .map(str::trim)
        .unwrap_or(label)
}

/// Ordered, immutable set of emotion definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCatalog {
    entries: Vec<EmotionDef>,
}

impl EmotionCatalog {
    /// Build a catalog, rejecting duplicate ids or trigger keys.
    pub fn new(entries: Vec<EmotionDef>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut keys = HashSet::new();
        for entry in &entries {
            if entry.id.is_empty() {
                return Err(EmoLabelError::InvalidParameter(
                    "Emotion id must not be empty".into(),
                ));
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(EmoLabelError::InvalidParameter(format!(
                    "Duplicate emotion id: {}",
                    entry.id
                )));
            }
            if !keys.insert(entry.trigger_key) {
                return Err(EmoLabelError::InvalidParameter(format!(
                    "Duplicate trigger key: {}",
                    entry.trigger_key
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in catalog used for time-based annotation.
    pub fn standard() -> Self {
        let entries = vec![
            EmotionDef::new("joy", "Joy（喜び）", '1', "#FFD166"),
            EmotionDef::new("trust", "Trust（信頼）", '2', "#7AC74F"),
            EmotionDef::new("fear", "Fear（恐れ）", '3', "#6F58C9"),
            EmotionDef::new("surprise", "Surprise（驚き）", '4', "#9370DB"),
            EmotionDef::new("sadness", "Sadness（悲しみ）", '5', "#118AB2"),
            EmotionDef::new("disgust", "Disgust（嫌悪）", '6', "#5D675B"),
            EmotionDef::new("anger", "Anger（怒り）", '7', "#EF476F"),
            EmotionDef::new("anticipation", "Anticipation（期待）", '8', "#06D6A0"),
        ];
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&EmotionDef> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Entry bound to a trigger key.
    pub fn by_trigger(&self, key: char) -> Option<&EmotionDef> {
        self.entries.iter().find(|e| e.trigger_key == key)
    }

    /// Entry whose full label matches exactly.
    pub fn by_label(&self, label: &str) -> Option<&EmotionDef> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Entry at catalog position `index`.
    pub fn at(&self, index: usize) -> Option<&EmotionDef> {
        self.entries.get(index)
    }

    /// Display label for `id`, or the raw id when the entry is missing.
    pub fn label_or_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|e| e.label.as_str()).unwrap_or(id)
    }

    /// Short display label for `id`, or the raw id when the entry is missing.
    pub fn short_label_or_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(EmotionDef::short_label).unwrap_or(id)
    }

    /// Display color for `id`, grey when the entry is missing.
    pub fn color_or_fallback(&self, id: &str) -> Rgb {
        self.get(id).map(EmotionDef::rgb).unwrap_or(Rgb::FALLBACK)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmotionDef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EmotionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The eight fixed emotion keys of the text labeling mode, in export column
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionKey {
    Joy,
    Sadness,
    Anticipation,
    Surprise,
    Anger,
    Fear,
    Disgust,
    Trust,
}

impl EmotionKey {
    pub const ALL: [Self; 8] = [
        Self::Joy,
        Self::Sadness,
        Self::Anticipation,
        Self::Surprise,
        Self::Anger,
        Self::Fear,
        Self::Disgust,
        Self::Trust,
    ];

    /// Lowercase id, matching the time-based catalog ids.
    pub fn id(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anticipation => "anticipation",
            Self::Surprise => "surprise",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Disgust => "disgust",
            Self::Trust => "trust",
        }
    }

    /// Column header used by the text-entry CSV export.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Joy => "Joy",
            Self::Sadness => "Sadness",
            Self::Anticipation => "Anticipation",
            Self::Surprise => "Surprise",
            Self::Anger => "Anger",
            Self::Fear => "Fear",
            Self::Disgust => "Disgust",
            Self::Trust => "Trust",
        }
    }

    /// Position in [`EmotionKey::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key for digit `1`..=`8`.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1..=8 => Some(Self::ALL[(digit - 1) as usize]),
            _ => None,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

impl fmt::Display for EmotionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
