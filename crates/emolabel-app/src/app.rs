//! The eframe application: mode switching, source wiring, dialogs and the
//! status line.

use eframe::egui;
use emolabel_core::{Command, EmoLabelError, EmotionCatalog, Result as CoreResult};
use emolabel_media::{open_local_media, ScreenCaptureProvider};
use emolabel_session::{KeyboardHub, TextAction, TextAnnotator, VideoAction, VideoAnnotator};
use emolabel_source::driver::TickCallback;
use emolabel_source::{
    CapturedStream, EmbedSource, ManualTimer, SourceEvent, TickOutcome, TimeSource, TimerDriver,
    TimerHandle,
};
use emolabel_text::{export_file_name_today, load_entries_from_file, Navigation};
use emolabel_timeline::{EVENTS_CSV_FILE_NAME, JSON_FILE_NAME};
use emolabel_ui::{
    key_inputs, show_editor, show_emotion_pad, show_text_panel, show_timeline, show_transport,
    EditorAction, TextPanelAction, Theme, TimelineAction, TransportAction, TransportState,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{error, info};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Video,
    Text,
}

struct Status {
    message: String,
    is_error: bool,
}

pub struct EmoLabelApp {
    config: AppConfig,
    runtime: Runtime,
    ctx: egui::Context,
    catalog: Arc<EmotionCatalog>,
    hub: KeyboardHub,
    mode: Mode,
    video: VideoAnnotator,
    text: TextAnnotator,
    transport: TransportState,
    /// Ticks the manual clock behind timer and embed sources.
    timer_driver: Option<TimerDriver>,
    status: Option<Status>,
}

impl EmoLabelApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, runtime: Runtime) -> Self {
        Theme::apply(&cc.egui_ctx);

        let catalog = Arc::new(EmotionCatalog::standard());
        let hub = KeyboardHub::new();
        let mut video =
            VideoAnnotator::new(Arc::clone(&catalog)).with_query_window(config.query_window_secs);
        video.attach(&hub);

        Self {
            config,
            runtime,
            ctx: cc.egui_ctx.clone(),
            catalog,
            hub,
            mode: Mode::Video,
            video,
            text: TextAnnotator::new(),
            transport: TransportState::default(),
            timer_driver: None,
            status: None,
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        match mode {
            Mode::Video => {
                self.text.detach();
                self.video.attach(&self.hub);
            }
            Mode::Text => {
                self.video.detach();
                self.text.attach(&self.hub);
            }
        }
        self.mode = mode;
    }

    fn info(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            message: message.into(),
            is_error: false,
        });
    }

    fn fail(&mut self, context: &str, e: impl std::fmt::Display) {
        error!(error = %e, "{}", context);
        self.status = Some(Status {
            message: format!("{}: {}", context, e),
            is_error: true,
        });
    }

    // ── Sources ───────────────────────────────────────────────

    /// Start ticking `timer`, replacing the previous driver.
    fn drive(&mut self, timer: &TimerHandle) {
        let ctx = self.ctx.clone();
        let repaint: TickCallback = Arc::new(move |_: TickOutcome| ctx.request_repaint());
        self.timer_driver = Some(TimerDriver::spawn(
            self.runtime.handle(),
            timer.clone(),
            Duration::from_millis(self.config.tick_interval_ms),
            Some(repaint),
        ));
    }

    fn apply_transport(&mut self, action: TransportAction) {
        match action {
            TransportAction::UseTimer(duration) => match ManualTimer::new(duration) {
                Ok(timer) => {
                    let timer = TimerHandle::new(timer);
                    self.drive(&timer);
                    self.video.switch_source(Box::new(timer));
                    self.info("Manual timer ready");
                }
                Err(e) => self.fail("Timer not started", e),
            },
            TransportAction::UseEmbed(url) => {
                let result = ManualTimer::new(self.config.timer_duration_secs)
                    .map(TimerHandle::new)
                    .and_then(|timer| EmbedSource::new(&url, timer));
                match result {
                    Ok(embed) => {
                        self.drive(embed.clock());
                        self.video.switch_source(Box::new(embed));
                        self.info("Embed selected; its clock runs by hand");
                    }
                    Err(e) => self.fail("Embed not opened", e),
                }
            }
            TransportAction::OpenLocalFile => {
                let Some(path) = rfd::FileDialog::new()
                    .add_filter("Video", &["mp4", "mov", "mkv", "webm", "avi", "m4v"])
                    .pick_file()
                else {
                    return;
                };
                let result = self.video.try_switch_source(|| {
                    open_local_media(&path).map(|media| Box::new(media) as Box<dyn TimeSource>)
                });
                match result {
                    Ok(()) => {
                        self.timer_driver = None;
                        self.info(format!("Opened {}", path.display()));
                    }
                    Err(e) => self.fail("Video not opened", e),
                }
            }
            TransportAction::StartCapture => {
                let mut provider =
                    ScreenCaptureProvider::new(self.config.capture_input.clone().unwrap_or_default());
                let result = self.video.try_switch_source(|| {
                    CapturedStream::acquire(&mut provider)
                        .map(|stream| Box::new(stream) as Box<dyn TimeSource>)
                });
                match result {
                    Ok(()) => {
                        self.timer_driver = None;
                        self.info("Screen capture started");
                    }
                    Err(e) => self.fail("Screen capture unavailable", e),
                }
            }
            TransportAction::StopSource => {
                self.video.source_mut().deactivate();
                self.timer_driver = None;
            }
            TransportAction::Play => self.video.source_mut().play(),
            TransportAction::Pause => self.video.source_mut().pause(),
            TransportAction::Reset => {
                if let Some(driver) = &self.timer_driver {
                    driver.timer().reset();
                }
            }
        }
    }

    // ── Files ─────────────────────────────────────────────────

    fn save_dialog(&self, file_name: &str, extension: &str) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(file_name)
            .add_filter(extension.to_uppercase(), &[extension]);
        if let Some(dir) = &self.config.export_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    }

    fn write_export(&mut self, path: PathBuf, data: CoreResult<Vec<u8>>) {
        match data.and_then(|bytes| std::fs::write(&path, bytes).map_err(EmoLabelError::from)) {
            Ok(()) => {
                info!(path = %path.display(), "Export written");
                self.info(format!("Exported to {}", path.display()));
            }
            Err(e) => self.fail("Export failed", e),
        }
    }

    fn export_events_csv(&mut self) {
        if let Some(path) = self.save_dialog(EVENTS_CSV_FILE_NAME, "csv") {
            let data = self.video.export_csv().map(String::into_bytes);
            self.write_export(path, data);
        }
    }

    fn export_events_json(&mut self) {
        if let Some(path) = self.save_dialog(JSON_FILE_NAME, "json") {
            let data = self.video.export_json();
            self.write_export(path, data);
        }
    }

    fn import_events(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Event log", &["csv", "json"])
            .pick_file()
        else {
            return;
        };
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let result = std::fs::read(&path).map_err(EmoLabelError::from).and_then(|bytes| {
            if is_json {
                self.video.import_json(&bytes)
            } else {
                self.video.import_csv_bytes(&bytes)
            }
        });
        match result {
            Ok(count) => self.info(format!("Loaded {} events", count)),
            Err(e) => self.fail("Import failed", e),
        }
    }

    fn import_text(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .pick_file()
        else {
            return;
        };
        match load_entries_from_file(&path) {
            Ok(entries) => {
                let count = entries.len();
                self.text.session_mut().load(entries);
                self.info(format!("Loaded {} entries", count));
            }
            Err(e) => self.fail("Import failed", e),
        }
    }

    fn export_text(&mut self) {
        let data = match self.text.export_csv() {
            Ok(csv) => csv.into_bytes(),
            Err(e) => return self.fail("Export failed", e),
        };
        if let Some(path) = self.save_dialog(&export_file_name_today(), "csv") {
            self.write_export(path, Ok(data));
        }
    }

    // ── Input ─────────────────────────────────────────────────

    fn handle_keys(&mut self, ctx: &egui::Context) {
        for key in key_inputs(ctx) {
            self.hub.dispatch(key);
        }
        match self.mode {
            Mode::Video => {
                for action in self.video.process_input() {
                    self.report_video(action);
                }
            }
            Mode::Text => {
                for action in self.text.process_input() {
                    self.report_text(action);
                }
            }
        }
    }

    fn report_video(&mut self, action: VideoAction) {
        if action == VideoAction::NotPlaying {
            self.info("Start playback to record emotions");
        }
    }

    fn report_text(&mut self, action: TextAction) {
        match action {
            TextAction::Navigated(Navigation::AtEnd) => {
                self.info("You have reached the end of the entries!")
            }
            TextAction::Navigated(Navigation::AtStart) => self.info("This is the first entry."),
            _ => {}
        }
    }

    // ── Panels ────────────────────────────────────────────────

    fn show_video(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Export CSV…").clicked() {
                self.export_events_csv();
            }
            if ui.button("Export JSON…").clicked() {
                self.export_events_json();
            }
            if ui.button("Import…").clicked() {
                self.import_events();
            }
            ui.label(format!("{} events", self.video.log().len()));
        });
        ui.separator();

        let active = self
            .video
            .source()
            .source()
            .map(|s| (s.kind(), s.fidelity()));
        let state = self.video.source().state();
        for action in show_transport(ui, &mut self.transport, active, state) {
            self.apply_transport(action);
        }
        ui.separator();

        let mut seek = None;
        {
            let projector = self.video.projector();
            let labels = self.video.active_labels();
            for action in show_timeline(ui, &projector, state.current_time, &labels) {
                let TimelineAction::SeekTo(t) = action;
                seek = Some(t);
            }
        }
        if let Some(t) = seek {
            self.video.seek(t);
        }

        ui.add_space(Theme::SPACE_SM);
        if let Some(key) = show_emotion_pad(ui, &self.catalog, state.is_playing) {
            match self.video.apply(Command::RecordEmotion(key)) {
                Ok(action) => self.report_video(action),
                Err(e) => self.fail("Record failed", e),
            }
        }
        ui.separator();

        let actions = {
            let (editor, log) = self.video.editor_and_log_mut();
            show_editor(ui, editor, log, state.duration)
        };
        for action in actions {
            match action {
                EditorAction::Seek(t) => self.video.seek(t),
                EditorAction::Save => {
                    let (editor, log) = self.video.editor_and_log_mut();
                    if let Err(e) = editor.save(log) {
                        self.fail("Edit not saved", e);
                    }
                }
                EditorAction::Delete(id) => {
                    if let Err(e) = self.video.delete_event(id) {
                        self.fail("Delete failed", e);
                    }
                }
            }
        }
    }

    fn show_text(&mut self, ui: &mut egui::Ui) {
        let actions = show_text_panel(ui, self.text.session(), &self.catalog);
        for action in actions {
            match action {
                TextPanelAction::Import => self.import_text(),
                TextPanelAction::Export => self.export_text(),
                TextPanelAction::Toggle(key) => {
                    self.text.apply(Command::ToggleEmotion(key));
                }
                TextPanelAction::Next => {
                    let action = self.text.apply(Command::NextEntry);
                    self.report_text(action);
                }
                TextPanelAction::Previous => {
                    let action = self.text.apply(Command::PreviousEntry);
                    self.report_text(action);
                }
            }
        }
    }
}

impl eframe::App for EmoLabelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        if self.video.poll() == SourceEvent::Revoked {
            self.info("Screen sharing ended");
        }

        egui::TopBottomPanel::top("mode_bar")
            .frame(Theme::panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("EmoLabel");
                    ui.separator();
                    let mut mode = self.mode;
                    ui.selectable_value(&mut mode, Mode::Video, "Video annotation");
                    ui.selectable_value(&mut mode, Mode::Text, "Text labeling");
                    self.set_mode(mode);
                });
            });

        egui::TopBottomPanel::bottom("status_line")
            .frame(Theme::panel_frame())
            .show(ctx, |ui| match &self.status {
                Some(status) if status.is_error => {
                    ui.colored_label(Theme::playhead(), &status.message);
                }
                Some(status) => {
                    ui.label(&status.message);
                }
                None => {
                    ui.label(egui::RichText::new("Ready").color(Theme::t2()));
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.mode {
                Mode::Video => self.show_video(ui),
                Mode::Text => self.show_text(ui),
            });
        });

        // Local media and captures advance on the wall clock.
        if self.mode == Mode::Video && self.video.source().is_playing() {
            ctx.request_repaint_after(Duration::from_millis(self.config.tick_interval_ms));
        }
    }
}
