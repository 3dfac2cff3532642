//! Media file probing through ffprobe.

use emolabel_core::{EmoLabelError, Result};
use emolabel_source::LocalMedia;
use ffmpeg_sidecar::ffprobe::{ffprobe_is_installed, ffprobe_path};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::clock::ClockedMedia;

/// Metadata needed to annotate a local file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaProbe {
    pub path: PathBuf,
    /// Container duration in seconds.
    pub duration: f64,
    /// Container format name reported by ffprobe.
    pub format: String,
}

#[derive(Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
}

#[derive(Deserialize)]
struct ProbeFormat {
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    format_name: Option<String>,
}

impl MediaProbe {
    /// Ask ffprobe for the container duration of `path`.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EmoLabelError::Media(format!(
                "File not found: {}",
                path.display()
            )));
        }
        if !ffprobe_is_installed() {
            return Err(EmoLabelError::Media("ffprobe is not installed".into()));
        }

        let output = Command::new(ffprobe_path())
            .args(["-v", "error", "-show_entries", "format=duration,format_name", "-of", "json"])
            .arg(path)
            .output()?;
        if !output.status.success() {
            return Err(EmoLabelError::Media(format!(
                "ffprobe failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let probe = Self::from_ffprobe_json(path, &output.stdout)?;
        info!(path = %path.display(), duration = probe.duration, "Probed media file");
        Ok(probe)
    }

    /// Parse ffprobe's `-of json` output.
    pub fn from_ffprobe_json(path: &Path, json: &[u8]) -> Result<Self> {
        let parsed: ProbeOutput = serde_json::from_slice(json).map_err(|e| {
            EmoLabelError::Media(format!("Unreadable ffprobe output: {}", e))
        })?;
        debug!(duration = ?parsed.format.duration, "ffprobe format section");

        let duration = parsed
            .format
            .duration
            .as_deref()
            .and_then(|d| d.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or_else(|| {
                EmoLabelError::Media(format!("No duration reported for {}", path.display()))
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            duration,
            format: parsed.format.format_name.unwrap_or_default(),
        })
    }
}

/// Probe `path` and wrap it as a local media source, paused at zero.
pub fn open_local_media(path: &Path) -> Result<LocalMedia<ClockedMedia>> {
    let probe = MediaProbe::probe(path)?;
    Ok(LocalMedia::new(ClockedMedia::new(Some(probe.duration))))
}
