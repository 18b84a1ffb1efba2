//! Settings popup: staged edits with an explicit save, except theme clicks
//! which commit immediately.

use eframe::egui;

use crate::config::settings::{Settings, Theme, DECIMAL_DIGITS_RANGE};
use crate::utils::colors;

pub enum SettingsAction {
    /// Persist immediately and keep the popup open (theme selection).
    Apply(Settings),
    /// Persist and close ("Save Preferences").
    SaveAndClose(Settings),
    /// Route back to the birthday entry view.
    ChangeBirthday,
}

/// Holds the staged draft. The draft is reseeded from committed settings each
/// time the popup opens, so closing without saving discards pending edits.
#[derive(Default)]
pub struct SettingsPopup {
    draft: Settings,
}

impl SettingsPopup {
    pub fn open(&mut self, committed: &Settings) {
        self.draft = committed.clone();
    }

    pub fn show(&mut self, ctx: &egui::Context, open: &mut bool) -> Option<SettingsAction> {
        let mut action = None;

        egui::Window::new("Customize")
            .open(open)
            .collapsible(false)
            .resizable(false)
            .default_width(260.0)
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(20.0, -60.0))
            .show(ctx, |ui| {
                ui.strong("Customize Text");
                ui.add_space(4.0);

                ui.label("Tab Name");
                ui.add(egui::TextEdit::singleline(&mut self.draft.tab_name).desired_width(f32::INFINITY));
                ui.add_space(4.0);

                ui.label("Text");
                ui.add(egui::TextEdit::singleline(&mut self.draft.text).desired_width(f32::INFINITY));

                ui.add_space(8.0);
                ui.strong("Customize Colors");
                ui.add_space(4.0);

                ui.label("Theme");
                ui.horizontal(|ui| {
                    for theme in Theme::all() {
                        let selected = self.draft.theme == theme;
                        if ui.selectable_label(selected, theme.label()).clicked() {
                            self.draft.apply_theme(theme);
                            // Theme changes skip the explicit save step.
                            action = Some(SettingsAction::Apply(self.draft.clone()));
                        }
                    }
                });

                ui.add_space(4.0);
                ui.label("Background color");
                color_row(ui, "bg_color", &mut self.draft.background_color);

                ui.add_space(4.0);
                ui.label("Main text color");
                color_row(ui, "text_color", &mut self.draft.main_text_color);

                ui.add_space(4.0);
                ui.label("Decimal Digits");
                ui.add(egui::Slider::new(
                    &mut self.draft.decimal_digits,
                    DECIMAL_DIGITS_RANGE,
                ));

                ui.add_space(12.0);
                ui.vertical_centered_justified(|ui| {
                    if ui.button("Save Preferences").clicked() {
                        action = Some(SettingsAction::SaveAndClose(self.draft.clone()));
                    }
                    if ui
                        .button(egui::RichText::new("Change Birthday").color(egui::Color32::from_rgb(255, 68, 68)))
                        .clicked()
                    {
                        action = Some(SettingsAction::ChangeBirthday);
                    }
                });
            });

        action
    }
}

/// Hex text field with a synced color picker swatch. Edits stay staged in the
/// draft; nothing is persisted here.
fn color_row(ui: &mut egui::Ui, id: &str, hex: &mut String) {
    ui.push_id(id, |ui| {
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(hex).desired_width(100.0));
            let mut rgb = colors::parse_hex(hex).unwrap_or([0, 0, 0]);
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                *hex = colors::to_hex(rgb);
            }
        });
    });
}
