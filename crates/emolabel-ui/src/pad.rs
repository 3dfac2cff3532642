//! Emotion buttons for both labeling modes.

use egui::{self, RichText, Vec2};
use emolabel_core::{EmotionCatalog, EmotionKey};
use emolabel_text::EmotionScores;

use crate::theme::Theme;

const BUTTON_SIZE: Vec2 = Vec2::new(132.0, 36.0);

/// Catalog buttons for time-based recording. Returns the trigger key of a
/// clicked button. Buttons are disabled while `enabled` is false.
pub fn show_emotion_pad(ui: &mut egui::Ui, catalog: &EmotionCatalog, enabled: bool) -> Option<char> {
    let mut clicked = None;
    ui.horizontal_wrapped(|ui| {
        for def in catalog.iter() {
            let fill = Theme::emotion(def.rgb());
            let text = RichText::new(format!("{} {}", def.trigger_key, def.label))
                .color(Theme::text_on(fill));
            let button = egui::Button::new(text).fill(fill).min_size(BUTTON_SIZE);
            if ui.add_enabled(enabled, button).clicked() {
                clicked = Some(def.trigger_key);
            }
        }
    });
    clicked
}

/// Toggle buttons for the text mode. Returns the key that was clicked.
pub fn show_text_pad(
    ui: &mut egui::Ui,
    catalog: &EmotionCatalog,
    scores: &EmotionScores,
) -> Option<EmotionKey> {
    let mut clicked = None;
    ui.horizontal_wrapped(|ui| {
        for (index, (key, score)) in scores.iter().enumerate() {
            let color = Theme::emotion(catalog.color_or_fallback(key.id()));
            let (fill, text_color) = if score > 0 {
                (color, Theme::text_on(color))
            } else {
                (Theme::with_alpha(color, 40), Theme::t1())
            };
            let text = RichText::new(format!("{} {}", index + 1, key)).color(text_color);
            let button = egui::Button::new(text).fill(fill).min_size(BUTTON_SIZE);
            if ui.add(button).clicked() {
                clicked = Some(key);
            }
        }
    });
    clicked
}
