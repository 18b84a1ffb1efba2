use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use eframe::egui;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::RwLock;

use crate::age;
use crate::config::settings::Settings;
use crate::ideas::IdeasList;
use crate::storage::{
    LocalStore, Snapshot, KEY_BIRTHDAY, KEY_IDEAS, KEY_IDEAS_VISIBLE, KEY_SETTINGS,
    KEY_SHOW_BIRTHDAY_INPUT,
};
use crate::ui::birthday::{BirthdayAction, BirthdayPanel};
use crate::ui::hex_color;
use crate::ui::ideas_panel::{IdeasAction, IdeasPanel};
use crate::ui::settings_popup::{SettingsAction, SettingsPopup};

/// Poll cadence for the backend channel while no counter is on screen.
/// Backend messages are only drained inside `update`, so without a scheduled
/// repaint a quiescent window would never see the startup snapshot.
const BACKEND_POLL_INTERVAL_MS: u64 = 100;

/// Messages from storage tasks back to the UI thread.
#[derive(Debug)]
pub enum StorageMessage {
    /// Startup read finished; apply the persisted state.
    Loaded(Snapshot),
    SaveComplete {
        key: &'static str,
    },
    /// A write failed. Not surfaced to the user; in-memory state stays
    /// authoritative until the next successful write.
    SaveFailed {
        key: &'static str,
        error: String,
    },
}

pub struct MomentumApp {
    runtime: Handle,

    store: Arc<RwLock<LocalStore>>,

    backend_tx: mpsc::Sender<StorageMessage>,

    backend_rx: mpsc::Receiver<StorageMessage>,

    /// Startup snapshot applied; until then the window shows a spinner.
    loaded: bool,

    settings: Settings,

    birthday: Option<NaiveDate>,

    show_birthday_input: bool,

    ideas: IdeasList,

    ideas_visible: bool,

    show_settings: bool,

    settings_popup: SettingsPopup,

    birthday_panel: BirthdayPanel,

    ideas_panel: IdeasPanel,

    /// Last title pushed to the viewport, to avoid resending every frame.
    applied_title: String,
}

impl MomentumApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, runtime: Handle, store: LocalStore) -> Self {
        let (backend_tx, backend_rx) = mpsc::channel::<StorageMessage>();
        let store = Arc::new(RwLock::new(store));

        // Initial read happens off the UI thread; the snapshot arrives as the
        // first backend message.
        {
            let store = store.clone();
            let tx = backend_tx.clone();
            runtime.spawn(async move {
                let snapshot = store.read().await.snapshot();
                let _ = tx.send(StorageMessage::Loaded(snapshot));
            });
        }

        Self {
            runtime,
            store,
            backend_tx,
            backend_rx,
            loaded: false,
            settings: Settings::default(),
            birthday: None,
            show_birthday_input: false,
            ideas: IdeasList::default(),
            ideas_visible: true,
            show_settings: false,
            settings_popup: SettingsPopup::default(),
            birthday_panel: BirthdayPanel::default(),
            ideas_panel: IdeasPanel::default(),
            applied_title: String::new(),
        }
    }

    fn process_backend_messages(&mut self) {
        while let Ok(msg) = self.backend_rx.try_recv() {
            match msg {
                StorageMessage::Loaded(snapshot) => {
                    if let Some(settings) = snapshot.settings {
                        self.settings = settings;
                    }
                    self.birthday = snapshot.birthday;
                    self.show_birthday_input = snapshot.show_birthday_input;
                    self.ideas = IdeasList::from_ideas(snapshot.ideas);
                    self.ideas_visible = snapshot.ideas_visible;
                    self.birthday_panel.seed(self.birthday);
                    self.loaded = true;
                }
                StorageMessage::SaveComplete { key } => {
                    tracing::debug!("Persisted {key}");
                }
                StorageMessage::SaveFailed { key, error } => {
                    tracing::warn!("Failed to persist {key}: {error}");
                }
            }
        }
    }

    /// Fire-and-forget full-key overwrite. Completion comes back through the
    /// backend channel.
    fn persist<T: Serialize>(&self, key: &'static str, value: &T) {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Could not serialize value for {key}: {e}");
                return;
            }
        };
        let store = self.store.clone();
        let tx = self.backend_tx.clone();
        self.runtime.spawn(async move {
            let result = store.write().await.set_raw(key.to_string(), json).await;
            let msg = match result {
                Ok(()) => StorageMessage::SaveComplete { key },
                Err(e) => StorageMessage::SaveFailed {
                    key,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    fn persist_ideas(&self) {
        self.persist(KEY_IDEAS, &self.ideas.ideas().to_vec());
    }

    fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.sanitize();
        self.persist(KEY_SETTINGS, &self.settings);
    }

    fn save_birthday(&mut self, date: NaiveDate) {
        self.birthday = Some(date);
        self.show_birthday_input = false;
        self.persist(KEY_BIRTHDAY, &date.to_string());
        self.persist(KEY_SHOW_BIRTHDAY_INPUT, &false);
    }

    fn handle_settings_action(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::Apply(settings) => self.apply_settings(settings),
            SettingsAction::SaveAndClose(settings) => {
                self.apply_settings(settings);
                self.show_settings = false;
            }
            SettingsAction::ChangeBirthday => {
                self.show_birthday_input = true;
                self.persist(KEY_SHOW_BIRTHDAY_INPUT, &true);
                self.birthday_panel.seed(self.birthday);
                self.show_settings = false;
            }
        }
    }

    fn handle_ideas_action(&mut self, action: IdeasAction) {
        match action {
            IdeasAction::Add(text) => {
                if self.ideas.add(&text) {
                    self.persist_ideas();
                }
            }
            IdeasAction::Edit { id, text } => {
                if self.ideas.edit(&id, &text) {
                    self.persist_ideas();
                }
            }
            IdeasAction::RequestDelete(id) => self.ideas.request_delete(&id),
            IdeasAction::CancelDelete => self.ideas.cancel_delete(),
            IdeasAction::ConfirmDelete => {
                if self.ideas.confirm_delete() {
                    self.persist_ideas();
                }
            }
            IdeasAction::Reorder { from, to } => {
                if self.ideas.reorder(from, to) {
                    self.persist_ideas();
                }
            }
            IdeasAction::SwapWithMainText(id) => {
                if let Some(new_main) = self.ideas.swap_with_main_text(&id, &self.settings.text) {
                    self.settings.text = new_main;
                    self.persist(KEY_SETTINGS, &self.settings);
                    self.persist_ideas();
                }
            }
            IdeasAction::ToggleVisibility => {
                self.ideas_visible = !self.ideas_visible;
                self.persist(KEY_IDEAS_VISIBLE, &self.ideas_visible);
            }
        }
    }

    /// The counter ticks fast while it is on screen; otherwise the backend
    /// channel is still polled so the startup snapshot and write results are
    /// processed without waiting for an input event.
    fn repaint_interval(loaded: bool, show_entry: bool) -> Duration {
        if loaded && !show_entry {
            Duration::from_millis(age::REFRESH_INTERVAL_MS)
        } else {
            Duration::from_millis(BACKEND_POLL_INTERVAL_MS)
        }
    }

    fn sync_window_title(&mut self, ctx: &egui::Context) {
        if self.applied_title != self.settings.tab_name {
            self.applied_title = self.settings.tab_name.clone();
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.applied_title.clone()));
        }
    }

    fn show_counter(&self, ui: &mut egui::Ui) {
        let text_color = hex_color(&self.settings.main_text_color, egui::Color32::WHITE);

        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            if !self.settings.text.is_empty() {
                ui.label(
                    egui::RichText::new(&self.settings.text)
                        .size(40.0)
                        .strong()
                        .color(text_color),
                );
                ui.add_space(8.0);
            }
            if let Some(birthday) = self.birthday {
                let age = age::format_age(birthday, Utc::now(), self.settings.decimal_digits);
                ui.label(
                    egui::RichText::new(age)
                        .size(44.0)
                        .strong()
                        .monospace()
                        .color(text_color),
                );
            }
        });
    }
}

impl eframe::App for MomentumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_backend_messages();
        self.sync_window_title(ctx);

        let background = hex_color(
            &self.settings.background_color,
            egui::Color32::from_rgb(0x1f, 0x1f, 0x1f),
        );
        let text_color = hex_color(&self.settings.main_text_color, egui::Color32::WHITE);
        let show_entry = self.birthday.is_none() || self.show_birthday_input;

        ctx.request_repaint_after(Self::repaint_interval(self.loaded, show_entry));

        let mut birthday_action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(background))
            .show(ctx, |ui| {
                if !self.loaded {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                } else if show_entry {
                    birthday_action = self.birthday_panel.show(ui, &self.settings);
                } else {
                    self.show_counter(ui);
                }
            });

        if let Some(BirthdayAction::Save(date)) = birthday_action {
            self.save_birthday(date);
        }

        if !self.loaded || show_entry {
            return;
        }

        // Ideas panel, centered along the bottom edge.
        let mut ideas_action = None;
        egui::Area::new(egui::Id::new("ideas_panel"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -16.0))
            .show(ctx, |ui| {
                ideas_action = self
                    .ideas_panel
                    .show(ui, &self.ideas, self.ideas_visible, &self.settings);
            });
        if let Some(action) = ideas_action {
            self.handle_ideas_action(action);
        }

        // Settings affordance in the bottom-left corner.
        let mut open_settings = false;
        egui::Area::new(egui::Id::new("settings_button"))
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(20.0, -16.0))
            .show(ctx, |ui| {
                if ui
                    .link(egui::RichText::new("Settings").color(text_color))
                    .clicked()
                {
                    open_settings = true;
                }
            });
        if open_settings && !self.show_settings {
            self.settings_popup.open(&self.settings);
            self.show_settings = true;
        }

        if self.show_settings {
            let mut open = self.show_settings;
            let action = self.settings_popup.show(ctx, &mut open);
            self.show_settings = open;
            if let Some(action) = action {
                self.handle_settings_action(action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repaint_polls_backend_until_snapshot_arrives() {
        // The spinner and the birthday view must keep draining the channel.
        assert_eq!(
            MomentumApp::repaint_interval(false, false),
            Duration::from_millis(BACKEND_POLL_INTERVAL_MS)
        );
        assert_eq!(
            MomentumApp::repaint_interval(false, true),
            Duration::from_millis(BACKEND_POLL_INTERVAL_MS)
        );
        assert_eq!(
            MomentumApp::repaint_interval(true, true),
            Duration::from_millis(BACKEND_POLL_INTERVAL_MS)
        );
    }

    #[test]
    fn test_repaint_ticks_fast_while_counter_visible() {
        assert_eq!(
            MomentumApp::repaint_interval(true, false),
            Duration::from_millis(age::REFRESH_INTERVAL_MS)
        );
    }
}
