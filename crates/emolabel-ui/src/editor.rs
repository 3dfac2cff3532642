//! Event table with search, sort and edit-in-place.

use egui::{self, RichText};
use emolabel_core::format_precise;
use emolabel_timeline::{EventEditor, EventId, EventLog, SortKey};

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorAction {
    /// Jump the source to an event's time.
    Seek(f64),
    /// Commit the open draft.
    Save,
    Delete(EventId),
}

/// Draw the event table. Search, sort, draft edits and cancel are applied
/// to `editor` directly; anything touching the log comes back as an action.
pub fn show_editor(
    ui: &mut egui::Ui,
    editor: &mut EventEditor,
    log: &EventLog,
    duration: f64,
) -> Vec<EditorAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.label("Search");
        ui.text_edit_singleline(&mut editor.search);
        ui.separator();
        ui.selectable_value(&mut editor.sort, SortKey::Time, "By time");
        ui.selectable_value(&mut editor.sort, SortKey::EmotionLabel, "By emotion");
    });
    ui.add_space(Theme::SPACE_XS);

    let rows = editor.rows(log);
    if rows.is_empty() {
        ui.label(RichText::new("No events recorded").color(Theme::t2()));
        return actions;
    }

    let mut begin = None;
    let mut cancel = false;
    egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
        egui::Grid::new("event_table")
            .striped(true)
            .num_columns(3)
            .show(ui, |ui| {
                for row in &rows {
                    if editor.is_editing(row.id) {
                        if let Some(draft) = editor.draft_mut() {
                            let mut text = draft.time_text.clone();
                            let mut field =
                                egui::TextEdit::singleline(&mut text).desired_width(110.0);
                            if draft.time_error().is_some() {
                                field = field.text_color(Theme::playhead());
                            }
                            let mut text_response = ui.add(field);
                            if let Some(error) = draft.time_error() {
                                text_response = text_response.on_hover_text(format!(
                                    "{}; keeping {}",
                                    error,
                                    format_precise(draft.time)
                                ));
                            }
                            if text_response.changed() {
                                // Rejected text is flagged through `time_error`.
                                draft.set_time_text(&text).ok();
                            }

                            let mut slider = draft.time;
                            if ui
                                .add(egui::Slider::new(&mut slider, 0.0..=duration.max(0.0)))
                                .changed()
                            {
                                draft.set_time_slider(slider, duration);
                            }

                            egui::ComboBox::from_id_salt(("draft_emotion", row.id))
                                .selected_text(log.catalog().label_or_id(&draft.emotion_id))
                                .show_ui(ui, |ui| {
                                    for def in log.catalog().iter() {
                                        if ui
                                            .selectable_label(draft.emotion_id == def.id, &def.label)
                                            .clicked()
                                        {
                                            draft.set_emotion(def.id.clone());
                                        }
                                    }
                                });
                        }
                        ui.horizontal(|ui| {
                            if ui.button("Save").clicked() {
                                actions.push(EditorAction::Save);
                            }
                            if ui.button("Cancel").clicked() {
                                cancel = true;
                            }
                        });
                    } else {
                        if ui
                            .link(RichText::new(&row.time_precise).monospace())
                            .clicked()
                        {
                            actions.push(EditorAction::Seek(row.time));
                        }
                        ui.colored_label(Theme::emotion(row.color), &row.label);
                        ui.horizontal(|ui| {
                            if ui.button("Edit").clicked() {
                                begin = Some(row.id);
                            }
                            if ui.button("Delete").clicked() {
                                actions.push(EditorAction::Delete(row.id));
                            }
                        });
                    }
                    ui.end_row();
                }
            });
    });

    if cancel {
        editor.cancel();
    }
    if let Some(id) = begin {
        editor.begin_edit(log, id);
    }
    actions
}
