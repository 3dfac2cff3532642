//! Source selection and playback controls.

use egui::{self, RichText};
use emolabel_core::format_compact;
use emolabel_source::{custom_duration, ClockFidelity, SourceKind, SourceState, TimerPreset};

use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum TransportAction {
    /// Activate a manual timer of this many seconds.
    UseTimer(f64),
    UseEmbed(String),
    OpenLocalFile,
    StartCapture,
    StopSource,
    Play,
    Pause,
    /// Stop and rewind to zero.
    Reset,
}

/// Form state kept by the host between frames.
#[derive(Debug, Clone)]
pub struct TransportState {
    pub preset: TimerPreset,
    pub custom: bool,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub embed_url: String,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            preset: TimerPreset::OneHour,
            custom: false,
            hours: 0,
            minutes: 0,
            seconds: 0,
            embed_url: String::new(),
        }
    }
}

impl TransportState {
    /// Timer duration currently selected in the form.
    pub fn timer_duration(&self) -> f64 {
        if self.custom {
            custom_duration(self.hours, self.minutes, self.seconds)
        } else {
            self.preset.seconds()
        }
    }
}

pub fn show_transport(
    ui: &mut egui::Ui,
    form: &mut TransportState,
    active: Option<(SourceKind, ClockFidelity)>,
    state: SourceState,
) -> Vec<TransportAction> {
    let mut actions = Vec::new();

    ui.horizontal_wrapped(|ui| {
        egui::ComboBox::from_id_salt("timer_preset")
            .selected_text(if form.custom { "Custom" } else { form.preset.label() })
            .show_ui(ui, |ui| {
                for preset in TimerPreset::ALL {
                    if ui
                        .selectable_label(!form.custom && form.preset == preset, preset.label())
                        .clicked()
                    {
                        form.preset = preset;
                        form.custom = false;
                    }
                }
                ui.selectable_value(&mut form.custom, true, "Custom");
            });
        if form.custom {
            ui.add(egui::DragValue::new(&mut form.hours).range(0..=23).suffix("h"));
            ui.add(egui::DragValue::new(&mut form.minutes).range(0..=59).suffix("m"));
            ui.add(egui::DragValue::new(&mut form.seconds).range(0..=59).suffix("s"));
        }
        if ui.button("Use timer").clicked() {
            actions.push(TransportAction::UseTimer(form.timer_duration()));
        }
        ui.separator();
        if ui.button("Open video…").clicked() {
            actions.push(TransportAction::OpenLocalFile);
        }
        if ui.button("Capture screen").clicked() {
            actions.push(TransportAction::StartCapture);
        }
    });

    ui.horizontal(|ui| {
        ui.label("Embed URL");
        ui.text_edit_singleline(&mut form.embed_url);
        if ui
            .add_enabled(!form.embed_url.trim().is_empty(), egui::Button::new("Use embed"))
            .clicked()
        {
            actions.push(TransportAction::UseEmbed(form.embed_url.clone()));
        }
    });

    ui.add_space(Theme::SPACE_XS);
    ui.horizontal(|ui| {
        let Some((kind, fidelity)) = active else {
            ui.label(RichText::new("No time source").color(Theme::t2()));
            return;
        };
        ui.label(RichText::new(kind.to_string()).strong());
        let toggle = if state.is_playing { "Pause" } else { "Play" };
        if ui.button(toggle).clicked() {
            actions.push(if state.is_playing {
                TransportAction::Pause
            } else {
                TransportAction::Play
            });
        }
        if matches!(kind, SourceKind::Timer | SourceKind::Embed) && ui.button("Reset").clicked() {
            actions.push(TransportAction::Reset);
        }
        if ui.button("Stop source").clicked() {
            actions.push(TransportAction::StopSource);
        }
        ui.label(
            RichText::new(format!(
                "{} / {}",
                format_compact(state.current_time),
                format_compact(state.duration)
            ))
            .monospace()
            .size(Theme::FONT_LG),
        );
        if fidelity == ClockFidelity::Manual && kind == SourceKind::Embed {
            ui.label(
                RichText::new("Embedded playback is not observable; start and stop the clock with the video")
                    .color(Theme::warning()),
            );
        }
    });

    actions
}
