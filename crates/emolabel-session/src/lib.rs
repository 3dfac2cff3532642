//! EmoLabel Session - Annotators and their keyboard wiring
//!
//! An annotator composes the engines with an input surface:
//! - `VideoAnnotator`: event log + active time source + editor
//! - `TextAnnotator`: text session over imported CSV rows
//!
//! Keyboard input reaches an annotator only through a [`Subscription`]
//! handed out by a [`KeyboardHub`]; dropping the subscription detaches it.

pub mod keyboard;
pub mod text;
pub mod video;

pub use keyboard::{KeyboardHub, Subscription};
pub use text::{TextAction, TextAnnotator};
pub use video::{VideoAction, VideoAnnotator};
