//! UI components module

pub mod birthday;
pub mod ideas_panel;
pub mod settings_popup;

use eframe::egui;

use crate::utils::colors;

/// Resolve a stored hex color for rendering, falling back when the stored
/// string is malformed (manual hex entry is free-text).
pub fn hex_color(hex: &str, fallback: egui::Color32) -> egui::Color32 {
    colors::parse_hex(hex)
        .map(|[r, g, b]| egui::Color32::from_rgb(r, g, b))
        .unwrap_or(fallback)
}
