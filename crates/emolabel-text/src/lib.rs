//! EmoLabel Text - Emotion labeling over CSV text records
//!
//! The alternate labeling mode: a CSV of text rows is imported in bulk,
//! each row gets a binary score per emotion, and the result is exported
//! back in the original row order.

pub mod codec;
pub mod entry;
pub mod session;

pub use codec::{
    decode_export, export_entries, export_file_name, export_file_name_today, load_entries_from_file,
    parse_entries, EXPORT_HEADER,
};
pub use entry::{EmotionScores, TextEntry};
pub use session::{Navigation, TextSession};
