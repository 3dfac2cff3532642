//! EmoLabel - Emotion annotation for video, screen capture and text
//!
//! Entry point: configuration, logging, the tick runtime and the window.

mod app;
mod config;

use anyhow::Result;
use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::EmoLabelApp;

fn main() -> Result<()> {
    let loaded = config::load();

    let filter = EnvFilter::try_from_env("EMOLABEL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&loaded.config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("EmoLabel starting...");
    if let Some(problem) = &loaded.problem {
        warn!(%problem, "Using default configuration");
    } else if let Some(path) = loaded.path.as_deref().filter(|p| !p.exists()) {
        if let Err(e) = config::save_to(&loaded.config, path) {
            warn!(error = %e, "Could not write default configuration");
        }
    }

    // Timer ticks run here; the UI thread only reads the shared timer.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("emolabel-tick")
        .enable_time()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("EmoLabel"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    let config = loaded.config;
    eframe::run_native(
        "EmoLabel",
        options,
        Box::new(move |cc| Ok(Box::new(EmoLabelApp::new(cc, config, runtime)))),
    )?;

    Ok(())
}
