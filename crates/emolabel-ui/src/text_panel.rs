//! Text labeling panel: current entry, toggles, navigation and progress.

use egui::{self, Align2, FontId, Pos2, Rect, RichText, Rounding, Sense, Vec2};
use emolabel_core::{EmotionCatalog, EmotionKey};
use emolabel_text::{EmotionScores, TextSession};

use crate::pad::show_text_pad;
use crate::theme::Theme;

const CHART_HEIGHT: f32 = 64.0;
const BAR_GAP: f32 = 6.0;
/// Height of an unset score's bar, as a fraction of the full bar.
const BASELINE: f32 = 0.06;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPanelAction {
    Import,
    Export,
    Toggle(EmotionKey),
    Next,
    Previous,
}

pub fn show_text_panel(
    ui: &mut egui::Ui,
    session: &TextSession,
    catalog: &EmotionCatalog,
) -> Vec<TextPanelAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        if ui.button("Import CSV…").clicked() {
            actions.push(TextPanelAction::Import);
        }
        if ui
            .add_enabled(!session.is_empty(), egui::Button::new("Export CSV…"))
            .clicked()
        {
            actions.push(TextPanelAction::Export);
        }
    });

    let Some(entry) = session.current() else {
        ui.add_space(Theme::SPACE_MD);
        ui.label(
            RichText::new("Import a CSV file; its first column is labeled row by row")
                .color(Theme::t2()),
        );
        return actions;
    };

    ui.add_space(Theme::SPACE_SM);
    ui.add(
        egui::ProgressBar::new((session.progress_percent() / 100.0) as f32).text(format!(
            "{} / {} labeled",
            session.completed(),
            session.len()
        )),
    );

    ui.add_space(Theme::SPACE_SM);
    ui.label(
        RichText::new(format!("Entry {} of {}", session.current_index() + 1, session.len()))
            .color(Theme::t2()),
    );
    egui::Frame::none()
        .fill(Theme::bg())
        .rounding(Theme::RADIUS)
        .inner_margin(egui::Margin::same(Theme::SPACE_MD))
        .show(ui, |ui| {
            ui.label(RichText::new(&entry.text).size(Theme::FONT_LG));
        });

    ui.add_space(Theme::SPACE_SM);
    show_score_bars(ui, catalog, &entry.emotions);

    ui.add_space(Theme::SPACE_SM);
    if let Some(key) = show_text_pad(ui, catalog, &entry.emotions) {
        actions.push(TextPanelAction::Toggle(key));
    }

    ui.horizontal(|ui| {
        if ui.button("◀ Previous").clicked() {
            actions.push(TextPanelAction::Previous);
        }
        if ui.button("Next ▶").clicked() {
            actions.push(TextPanelAction::Next);
        }
        ui.label(RichText::new("Keys: 1-8 toggle, ←/→ navigate").color(Theme::t2()));
    });

    actions
}

/// One bar per emotion for the current entry: full height when set, a thin
/// baseline otherwise.
pub fn show_score_bars(ui: &mut egui::Ui, catalog: &EmotionCatalog, scores: &EmotionScores) {
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(Vec2::new(width, CHART_HEIGHT), Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, Rounding::same(Theme::RADIUS), Theme::bg());

    let columns = EmotionKey::ALL.len() as f32;
    let column_width = rect.width() / columns;
    let label_height = Theme::FONT_XS + Theme::SPACE_XS;
    let full = rect.height() - label_height - Theme::SPACE_XS;

    for (index, (key, score)) in scores.iter().enumerate() {
        let left = rect.left() + column_width * index as f32;
        let base_y = rect.bottom() - label_height;
        let height = bar_height(score, full);
        let bar = Rect::from_min_max(
            Pos2::new(left + BAR_GAP / 2.0, base_y - height),
            Pos2::new(left + column_width - BAR_GAP / 2.0, base_y),
        );
        let color = Theme::emotion(catalog.color_or_fallback(key.id()));
        let fill = if score > 0 { color } else { Theme::with_alpha(color, 90) };
        painter.rect_filled(bar, Rounding::same(2.0), fill);

        painter.text(
            Pos2::new(left + column_width / 2.0, rect.bottom() - 2.0),
            Align2::CENTER_BOTTOM,
            abbreviation(key),
            FontId::proportional(Theme::FONT_XS),
            Theme::t2(),
        );
    }
}

fn bar_height(score: u8, full: f32) -> f32 {
    let full = full.max(0.0);
    if score > 0 {
        full
    } else {
        full * BASELINE
    }
}

fn abbreviation(key: EmotionKey) -> &'static str {
    let name = key.column_name();
    name.get(..3).unwrap_or(name)
}
