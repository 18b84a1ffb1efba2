//! Birthday entry view, shown until a birthday is stored and again via the
//! "Change Birthday" flow.

use chrono::NaiveDate;
use eframe::egui;

use crate::config::settings::Settings;
use crate::ui::hex_color;

pub enum BirthdayAction {
    Save(NaiveDate),
}

pub struct BirthdayPanel {
    date: NaiveDate,
}

impl Default for BirthdayPanel {
    fn default() -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
        }
    }
}

impl BirthdayPanel {
    /// Pre-fill the picker when re-entering the view. Keeps the previously
    /// stored birthday so "Change Birthday" starts from the old value.
    pub fn seed(&mut self, birthday: Option<NaiveDate>) {
        if let Some(date) = birthday {
            self.date = date;
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, settings: &Settings) -> Option<BirthdayAction> {
        let mut action = None;
        let text_color = hex_color(&settings.main_text_color, egui::Color32::WHITE);

        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.25);
            ui.heading(
                egui::RichText::new("Motivational Age Counter")
                    .size(32.0)
                    .strong()
                    .color(text_color),
            );
            ui.add_space(16.0);
            ui.label(
                egui::RichText::new("Please enter your birthday to get started")
                    .size(16.0)
                    .color(text_color),
            );
            ui.add_space(24.0);

            ui.add(
                egui_extras::DatePickerButton::new(&mut self.date)
                    .id_salt("birthday_picker")
                    .show_icon(true),
            );

            ui.add_space(16.0);
            if ui
                .button(egui::RichText::new("Continue").size(16.0))
                .clicked()
            {
                action = Some(BirthdayAction::Save(self.date));
            }
        });

        action
    }
}
