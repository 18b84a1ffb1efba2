//! Ideas/goals panel: inline add/edit, two-step delete, swap-with-main-text
//! and drag-and-drop reordering with a transient preview.

use eframe::egui;

use crate::config::settings::Settings;
use crate::ideas::{DragState, IdeasList};
use crate::ui::hex_color;

pub enum IdeasAction {
    Add(String),
    Edit { id: String, text: String },
    RequestDelete(String),
    CancelDelete,
    ConfirmDelete,
    Reorder { from: usize, to: usize },
    SwapWithMainText(String),
    ToggleVisibility,
}

/// Drag payload: the committed index of the row being dragged.
#[derive(Clone, Copy)]
struct DragPayload(usize);

#[derive(Default)]
pub struct IdeasPanel {
    input_text: String,
    show_input: bool,
    editing_id: Option<String>,
    edit_text: String,
    original_edit_text: String,
    drag: DragState,
}

impl IdeasPanel {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        list: &IdeasList,
        visible: bool,
        settings: &Settings,
    ) -> Option<IdeasAction> {
        let text_color = hex_color(&settings.main_text_color, egui::Color32::WHITE);
        let main_text_empty = settings.text.trim().is_empty();

        if !visible {
            let mut action = None;
            ui.vertical_centered(|ui| {
                if ui
                    .link(egui::RichText::new("Ideas/Goals").small().color(text_color))
                    .clicked()
                {
                    action = Some(IdeasAction::ToggleVisibility);
                }
            });
            return action;
        }

        let mut action = None;
        egui::Frame::group(ui.style())
            .fill(egui::Color32::from_black_alpha(40))
            .show(ui, |ui| {
                ui.set_width(480.0);

                if list.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(12.0);
                        ui.label(
                            egui::RichText::new("No ideas/goals yet. Click \"add\" below to add one!")
                                .small()
                                .color(text_color.gamma_multiply(0.6)),
                        );
                        ui.add_space(12.0);
                    });
                } else {
                    egui::ScrollArea::vertical()
                        .max_height(140.0)
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            if let Some(a) = self.show_rows(ui, list, main_text_empty, text_color) {
                                action = Some(a);
                            }
                        });
                }

                if let Some(a) = self.show_controls(ui, text_color) {
                    action = Some(a);
                }
            });

        action
    }

    fn show_rows(
        &mut self,
        ui: &mut egui::Ui,
        list: &IdeasList,
        main_text_empty: bool,
        text_color: egui::Color32,
    ) -> Option<IdeasAction> {
        let mut action = None;
        let draggable = list.len() > 1;
        let display_order = self.drag.preview(list.ideas());
        let mut hovered_row = None;

        for (row_index, idea) in display_order.into_iter().enumerate() {
            // Drag payloads carry committed indices, not preview positions.
            let committed_index = list
                .ideas()
                .iter()
                .position(|i| i.id == idea.id)
                .unwrap_or(row_index);
            let is_dragged = self.drag.source == Some(committed_index) && self.drag.is_active();

            let row = ui
                .horizontal(|ui| {
                    if self.editing_id.as_deref() == Some(idea.id.as_str()) {
                        self.show_edit_row(ui, &idea.id, text_color, &mut action);
                    } else {
                        self.show_view_row(
                            ui,
                            idea,
                            committed_index,
                            draggable,
                            is_dragged,
                            main_text_empty,
                            list,
                            text_color,
                            &mut action,
                        );
                    }
                })
                .response;

            if draggable {
                if row.dnd_hover_payload::<DragPayload>().is_some() {
                    hovered_row = Some(row_index);
                }
                if let Some(payload) = row.dnd_release_payload::<DragPayload>() {
                    if payload.0 != row_index {
                        action = Some(IdeasAction::Reorder {
                            from: payload.0,
                            to: row_index,
                        });
                    }
                }
            }
        }

        // The preview tracks the live payload; when the gesture ends without
        // a drop the payload vanishes and the committed order shows again.
        match egui::DragAndDrop::payload::<DragPayload>(ui.ctx()) {
            Some(payload) => {
                self.drag.source = Some(payload.0);
                self.drag.hover = hovered_row;
            }
            None => self.drag.clear(),
        }

        action
    }

    fn show_edit_row(
        &mut self,
        ui: &mut egui::Ui,
        id: &str,
        text_color: egui::Color32,
        action: &mut Option<IdeasAction>,
    ) {
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.edit_text)
                .desired_width(340.0)
                .text_color(text_color),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));

        let mut save = ui.small_button("✔").on_hover_text("Save").clicked();
        let cancel = ui.small_button("✖").on_hover_text("Cancel").clicked();
        save |= enter;

        if save && !self.edit_text.trim().is_empty() {
            *action = Some(IdeasAction::Edit {
                id: id.to_string(),
                text: self.edit_text.clone(),
            });
            self.stop_editing();
        } else if cancel || escape {
            self.stop_editing();
        } else if response.lost_focus()
            && !enter
            && self.edit_text.trim() == self.original_edit_text.trim()
        {
            // Blur without changes cancels; with changes the edit stays open.
            self.stop_editing();
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn show_view_row(
        &mut self,
        ui: &mut egui::Ui,
        idea: &crate::ideas::Idea,
        committed_index: usize,
        draggable: bool,
        is_dragged: bool,
        main_text_empty: bool,
        list: &IdeasList,
        text_color: egui::Color32,
        action: &mut Option<IdeasAction>,
    ) {
        if draggable {
            ui.dnd_drag_source(
                egui::Id::new(("idea_drag", idea.id.as_str())),
                DragPayload(committed_index),
                |ui| {
                    ui.label(
                        egui::RichText::new("⠿")
                            .small()
                            .color(text_color.gamma_multiply(0.5)),
                    );
                },
            );
        }

        let label_color = if is_dragged {
            text_color.gamma_multiply(0.3)
        } else {
            text_color
        };
        let label = ui
            .label(egui::RichText::new(&idea.text).color(label_color))
            .on_hover_text("Double-click to edit");
        if label.double_clicked() {
            self.start_editing(idea);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if list.pending_delete() == Some(idea.id.as_str()) {
                if ui.small_button("✖").on_hover_text("Cancel delete").clicked() {
                    *action = Some(IdeasAction::CancelDelete);
                }
                if ui.small_button("✔").on_hover_text("Confirm delete").clicked() {
                    *action = Some(IdeasAction::ConfirmDelete);
                }
            } else {
                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                    *action = Some(IdeasAction::RequestDelete(idea.id.clone()));
                }
                if ui.small_button("✏").on_hover_text("Edit").clicked() {
                    self.start_editing(idea);
                }
                let hint = swap_hint(main_text_empty);
                if ui.small_button("↗").on_hover_text(hint).clicked() {
                    *action = Some(IdeasAction::SwapWithMainText(idea.id.clone()));
                }
            }
        });
    }

    fn show_controls(
        &mut self,
        ui: &mut egui::Ui,
        text_color: egui::Color32,
    ) -> Option<IdeasAction> {
        let mut action = None;

        if self.show_input {
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.input_text)
                        .hint_text("add an idea...")
                        .desired_width(380.0)
                        .text_color(text_color),
                );
                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let mut save = false;
                if !self.input_text.trim().is_empty() {
                    save = ui.small_button("✔").on_hover_text("Save idea").clicked();
                }
                save |= enter && !self.input_text.trim().is_empty();

                if save {
                    action = Some(IdeasAction::Add(self.input_text.clone()));
                    self.input_text.clear();
                    self.show_input = false;
                } else if ui.small_button("✖").on_hover_text("Cancel").clicked() {
                    self.input_text.clear();
                    self.show_input = false;
                }
            });
        } else {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .link(egui::RichText::new("hide").small().color(text_color.gamma_multiply(0.6)))
                    .clicked()
                {
                    action = Some(IdeasAction::ToggleVisibility);
                }
                if ui
                    .link(egui::RichText::new("add").small().color(text_color.gamma_multiply(0.6)))
                    .clicked()
                {
                    self.show_input = true;
                }
            });
        }

        action
    }

    fn start_editing(&mut self, idea: &crate::ideas::Idea) {
        self.editing_id = Some(idea.id.clone());
        self.edit_text = idea.text.clone();
        self.original_edit_text = idea.text.clone();
    }

    fn stop_editing(&mut self) {
        self.editing_id = None;
        self.edit_text.clear();
        self.original_edit_text.clear();
    }
}

/// An empty main text means the swap only promotes the idea, so the hover
/// hint says what will actually happen.
fn swap_hint(main_text_empty: bool) -> &'static str {
    if main_text_empty {
        "Use as main text"
    } else {
        "Swap with main text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_hint_reflects_empty_main_text() {
        assert_eq!(swap_hint(true), "Use as main text");
        assert_eq!(swap_hint(false), "Swap with main text");
    }
}
