//! Timeline strip: event markers, playhead, click-to-seek and hover info.

use egui::{self, Align2, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};
use emolabel_core::format_compact;
use emolabel_timeline::TimelineProjector;

use crate::theme::Theme;

const STRIP_HEIGHT: f32 = 56.0;
const MARKER_WIDTH: f32 = 4.0;
const MARKER_HIT_SLOP: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineAction {
    SeekTo(f64),
}

/// Draw the strip. `current_time` positions the playhead; `active` lists
/// the short labels near it.
pub fn show_timeline(
    ui: &mut egui::Ui,
    projector: &TimelineProjector<'_>,
    current_time: f64,
    active: &[&str],
) -> Vec<TimelineAction> {
    let mut actions = Vec::new();
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(Vec2::new(width, STRIP_HEIGHT), Sense::click());
    let rect = response.rect;

    painter.rect_filled(rect, Rounding::same(Theme::RADIUS), Theme::bg());

    let x_at = |percent: f64| rect.left() + rect.width() * (percent as f32 / 100.0);

    let markers = projector.markers();
    let mut hovered = None;
    for marker in &markers {
        let x = x_at(marker.percent);
        let marker_rect = Rect::from_center_size(
            Pos2::new(x, rect.center().y),
            Vec2::new(MARKER_WIDTH, rect.height() - Theme::SPACE_SM * 2.0),
        );
        painter.rect_filled(marker_rect, Rounding::same(1.0), Theme::emotion(marker.color));

        let hit = marker_rect.expand2(Vec2::new(MARKER_HIT_SLOP, 0.0));
        if response.hover_pos().is_some_and(|p| hit.contains(p)) {
            hovered = Some(marker.id);
        }
    }

    let playhead_x = x_at(projector.playhead(current_time));
    painter.line_segment(
        [
            Pos2::new(playhead_x, rect.top()),
            Pos2::new(playhead_x, rect.bottom()),
        ],
        Stroke::new(2.0, Theme::playhead()),
    );

    painter.text(
        rect.left_bottom() + Vec2::new(Theme::SPACE_XS, -2.0),
        Align2::LEFT_BOTTOM,
        "0:00",
        FontId::proportional(Theme::FONT_XS),
        Theme::t2(),
    );
    painter.text(
        rect.right_bottom() + Vec2::new(-Theme::SPACE_XS, -2.0),
        Align2::RIGHT_BOTTOM,
        format_compact(projector.duration()),
        FontId::proportional(Theme::FONT_XS),
        Theme::t2(),
    );

    if let Some(id) = hovered {
        if let Some(info) = projector.hover(id) {
            response.clone().on_hover_ui_at_pointer(|ui| {
                ui.colored_label(Theme::emotion(info.color), &info.label);
                ui.label(&info.time_display);
            });
        }
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let fraction = ((pos.x - rect.left()) / rect.width()) as f64;
            if let Some(target) = projector.seek_target(fraction) {
                actions.push(TimelineAction::SeekTo(target));
            }
        }
    }

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!(
                "{} / {}",
                format_compact(current_time),
                format_compact(projector.duration())
            ))
            .monospace(),
        );
        if !active.is_empty() {
            ui.separator();
            ui.label(active.join(", "));
        }
    });

    actions
}
