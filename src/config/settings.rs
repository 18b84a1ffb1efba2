use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::utils::colors;

/// Allowed precision of the displayed age.
pub const DECIMAL_DIGITS_RANGE: RangeInclusive<u8> = 8..=12;

pub const DEFAULT_TEXT: &str = "Make every moment count!";
pub const DEFAULT_TAB_NAME: &str = "New Tab";

/// How the background/text color pair is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Random,
}

impl Theme {
    pub fn all() -> Vec<Self> {
        vec![Self::Light, Self::Dark, Self::Random]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Random => "Random",
        }
    }

    /// Fixed (background, text) palette. `Random` has no fixed palette; its
    /// colors are sampled at selection time.
    pub fn palette(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Light => Some(("#FFFFFF", "#000000")),
            Self::Dark => Some(("#1F1F1F", "#DFDFDF")),
            Self::Random => None,
        }
    }
}

/// Display settings, persisted wholesale under the `settings` key.
///
/// Field names stay camelCase on disk so an existing store written by earlier
/// builds keeps loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub text: String,
    pub background_color: String,
    pub main_text_color: String,
    pub theme: Theme,
    pub decimal_digits: u8,
    pub tab_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        let (bg, text_color) = Theme::Dark.palette().unwrap_or(("#1F1F1F", "#DFDFDF"));
        Self {
            text: DEFAULT_TEXT.to_string(),
            background_color: bg.to_string(),
            main_text_color: text_color.to_string(),
            theme: Theme::Dark,
            decimal_digits: 10,
            tab_name: DEFAULT_TAB_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Overwrite the color pair for the selected theme. Light/dark use the
    /// fixed palette; random samples a fresh contrasting pair.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        match theme.palette() {
            Some((bg, text_color)) => {
                self.background_color = bg.to_string();
                self.main_text_color = text_color.to_string();
            }
            None => {
                let (bg, text_color) = colors::random_theme();
                self.background_color = bg;
                self.main_text_color = text_color;
            }
        }
    }

    /// Clamp out-of-range values loaded from an old or hand-edited store.
    pub fn sanitize(&mut self) {
        self.decimal_digits = self
            .decimal_digits
            .clamp(*DECIMAL_DIGITS_RANGE.start(), *DECIMAL_DIGITS_RANGE.end());
    }
}
