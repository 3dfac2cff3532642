//! EmoLabel UI - egui widgets for emotion annotation
//!
//! Every widget is a free `show_*` function that draws from borrowed state
//! and returns the actions the user took; the host applies them.

pub mod editor;
pub mod keys;
pub mod pad;
pub mod text_panel;
pub mod theme;
pub mod timeline;
pub mod transport;

pub use editor::{show_editor, EditorAction};
pub use keys::key_inputs;
pub use pad::{show_emotion_pad, show_text_pad};
pub use text_panel::{show_score_bars, show_text_panel, TextPanelAction};
pub use theme::Theme;
pub use timeline::{show_timeline, TimelineAction};
pub use transport::{show_transport, TransportAction, TransportState};
