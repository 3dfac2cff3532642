//! Screen capture through an ffmpeg grab process.
//!
//! The running process is the captured stream: killing it stops the
//! tracks, and the process exiting on its own (the user closed the shared
//! window, the display went away) reads as revocation.

use emolabel_core::{EmoLabelError, Result};
use emolabel_source::{CaptureProvider, CaptureStream, MediaElement};
use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::{ffmpeg_is_installed, FfmpegCommand};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clock::ClockedMedia;

/// ffmpeg input device and target, e.g. `x11grab` + `:0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureInput {
    pub format: String,
    pub target: String,
}

impl CaptureInput {
    pub fn new(format: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            target: target.into(),
        }
    }

    /// The usual whole-screen grab device for this platform.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "windows") {
            Self::new("gdigrab", "desktop")
        } else if cfg!(target_os = "macos") {
            Self::new("avfoundation", "1:none")
        } else {
            Self::new("x11grab", ":0.0")
        }
    }
}

impl Default for CaptureInput {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// Spawns grab processes for [`ScreenCapture`].
#[derive(Debug, Clone, Default)]
pub struct ScreenCaptureProvider {
    input: CaptureInput,
}

impl ScreenCaptureProvider {
    pub fn new(input: CaptureInput) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &CaptureInput {
        &self.input
    }
}

impl CaptureProvider for ScreenCaptureProvider {
    type Stream = ScreenCapture;

    fn acquire(&mut self) -> Result<ScreenCapture> {
        if !ffmpeg_is_installed() {
            return Err(EmoLabelError::Capture("ffmpeg is not installed".into()));
        }
        let mut child = FfmpegCommand::new()
            .hide_banner()
            .args(["-loglevel", "error", "-nostats"])
            .format(&self.input.format)
            .args(["-framerate", "5"])
            .input(&self.input.target)
            .args(["-f", "null"])
            .output("-")
            .spawn()
            .map_err(|e| EmoLabelError::Capture(format!("Failed to start capture: {}", e)))?;

        // A denied or missing device makes ffmpeg exit straight away.
        match child.as_inner_mut().try_wait() {
            Ok(Some(status)) => {
                return Err(EmoLabelError::Capture(format!(
                    "Capture device {} {} unavailable ({})",
                    self.input.format, self.input.target, status
                )));
            }
            Ok(None) => {}
            Err(e) => return Err(EmoLabelError::Capture(e.to_string())),
        }

        info!(format = %self.input.format, target = %self.input.target, "Screen capture started");
        Ok(ScreenCapture::new(child))
    }
}

/// A running screen grab.
pub struct ScreenCapture {
    clock: ClockedMedia,
    child: Mutex<Option<FfmpegChild>>,
}

impl ScreenCapture {
    fn new(child: FfmpegChild) -> Self {
        let mut clock = ClockedMedia::new(Some(f64::INFINITY));
        clock.play();
        Self {
            clock,
            child: Mutex::new(Some(child)),
        }
    }
}

impl MediaElement for ScreenCapture {
    fn position(&self) -> f64 {
        self.clock.position()
    }

    fn set_position(&mut self, seconds: f64) {
        self.clock.set_position(seconds);
    }

    fn duration(&self) -> Option<f64> {
        self.clock.duration()
    }

    fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    fn play(&mut self) {
        self.clock.play();
    }

    fn pause(&mut self) {
        self.clock.pause();
    }
}

impl CaptureStream for ScreenCapture {
    fn stop_tracks(&mut self) {
        self.clock.pause();
        if let Some(mut child) = self.child.lock().take() {
            if let Err(e) = child.kill() {
                warn!(error = %e, "Failed to stop capture process");
            }
            let _ = child.wait();
            info!("Screen capture stopped");
        }
    }

    fn is_live(&self) -> bool {
        let mut guard = self.child.lock();
        let Some(child) = guard.as_mut() else {
            return false;
        };
        match child.as_inner_mut().try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                info!(%status, "Capture process exited");
                false
            }
            Err(e) => {
                warn!(error = %e, "Capture process status unavailable");
                false
            }
        }
    }
}

impl Drop for ScreenCapture {
    fn drop(&mut self) {
        self.stop_tracks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_default_input() {
        let input = CaptureInput::platform_default();
        assert!(!input.format.is_empty());
        assert!(!input.target.is_empty());
    }

    #[test]
    fn test_capture_input_serde() {
        let input = CaptureInput::new("x11grab", ":1.0");
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(json, r#"{"format":"x11grab","target":":1.0"}"#);
        let back: CaptureInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }
}
