//! EmoLabel Timeline - The time-synchronized emotion event log
//!
//! Implements the event log and everything that reads through it:
//! - Recorded emotion events with stable ids
//! - The event log engine (record, update, delete, query, sort, filter)
//! - Timeline projection (percent offsets, click-to-seek, hover info)
//! - The editor surface (sorted/filtered rows, edit-in-place drafts)
//! - CSV and JSON codecs

pub mod editor;
pub mod event;
pub mod log;
pub mod projector;
pub mod serialization;

pub use editor::{EditDraft, EditorRow, EventEditor};
pub use event::{EmotionEvent, EventId, EventPatch};
pub use log::{EventLog, SortKey};
pub use projector::{project, HoverInfo, Marker, TimelineProjector};
pub use serialization::{
    decode_events_csv, encode_events_csv, EmotionDataExport, EmotionDataItem, EVENTS_CSV_FILE_NAME,
    JSON_FILE_NAME,
};
