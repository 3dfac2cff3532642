//! User configuration stored as JSON under the platform config directory.

use anyhow::{Context, Result};
use emolabel_core::defaults;
use emolabel_media::CaptureInput;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Manual timer tick period.
    pub tick_interval_ms: u64,
    /// Half-width of the "active now" window on the timeline.
    pub query_window_secs: f64,
    /// Duration for embed clocks.
    pub timer_duration_secs: f64,
    /// Starting directory for export dialogs.
    pub export_dir: Option<PathBuf>,
    /// `tracing` filter used when `EMOLABEL_LOG` is unset.
    pub log_filter: String,
    /// Screen grab device; the platform default when unset.
    pub capture_input: Option<CaptureInput>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: defaults::TICK_INTERVAL_MS,
            query_window_secs: defaults::QUERY_WINDOW_SECS,
            timer_duration_secs: defaults::TIMER_DURATION_SECS,
            export_dir: None,
            log_filter: "info".to_string(),
            capture_input: None,
        }
    }
}

/// Result of reading the config file. Logging is not up yet when this
/// runs, so problems are carried back to be logged later.
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: Option<PathBuf>,
    pub problem: Option<String>,
}

/// `<config_dir>/emolabel/config.json`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("emolabel").join("config.json"))
}

/// Load from the default location. A missing file yields defaults; an
/// unreadable or malformed one yields defaults plus a problem report.
pub fn load() -> LoadedConfig {
    let Some(path) = default_path() else {
        return LoadedConfig {
            config: AppConfig::default(),
            path: None,
            problem: Some("No config directory on this platform".into()),
        };
    };
    let (config, problem) = match load_from(&path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(format!("{:#}", e))),
    };
    LoadedConfig {
        config,
        path: Some(path),
        problem,
    }
}

/// Read `path`; a missing file is not an error.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AppConfig = serde_json::from_slice(&data)
        .with_context(|| format!("Malformed config {}", path.display()))?;
    Ok(config.sanitized())
}

pub fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_vec_pretty(config)?)
        .with_context(|| format!("Failed to write config {}", path.display()))
}

impl AppConfig {
    /// Replace out-of-range values with defaults.
    fn sanitized(mut self) -> Self {
        let fallback = Self::default();
        if self.tick_interval_ms == 0 {
            self.tick_interval_ms = fallback.tick_interval_ms;
        }
        if !self.query_window_secs.is_finite() || self.query_window_secs < 0.0 {
            self.query_window_secs = fallback.query_window_secs;
        }
        if !self.timer_duration_secs.is_finite() || self.timer_duration_secs <= 0.0 {
            self.timer_duration_secs = fallback.timer_duration_secs;
        }
        self
    }
}
