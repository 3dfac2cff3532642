//! EmoLabel Core - Foundation types for emotion annotation
//!
//! This crate provides the fundamental types used throughout EmoLabel:
//! - Time formatting and parsing (clock, compact and precise forms)
//! - The emotion catalog shared by every labeling surface
//! - Text-mode emotion keys
//! - The keyboard surface (key input to command mapping)

pub mod catalog;
pub mod error;
pub mod keymap;
pub mod time;

pub use catalog::{EmotionCatalog, EmotionDef, EmotionKey, Rgb};
pub use error::{EmoLabelError, Result};
pub use keymap::{Command, KeyInput, LabelMode};
pub use time::{format_clock, format_compact, format_precise, Timecode};

/// Defaults shared by the annotation engines.
pub mod defaults {
    /// Half-width of the "active now" window around the playhead, in seconds.
    pub const QUERY_WINDOW_SECS: f64 = 0.5;

    /// Manual timer tick period in milliseconds.
    pub const TICK_INTERVAL_MS: u64 = 50;

    /// Manual timer duration when none is configured (one hour).
    pub const TIMER_DURATION_SECS: f64 = 3600.0;
}
