//! EmoLabel Media - Native handles behind the time source adapters
//!
//! - `probe`: duration lookup through ffprobe
//! - `clock`: a media element whose position follows the wall clock
//! - `capture`: screen capture as an ffmpeg grab process

pub mod capture;
pub mod clock;
pub mod probe;

pub use capture::{CaptureInput, ScreenCapture, ScreenCaptureProvider};
pub use clock::ClockedMedia;
pub use probe::{open_local_media, MediaProbe};
