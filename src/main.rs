#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Momentum
//!
//! A motivational age counter dashboard: a running fractional-year age
//! derived from your birthday, a customizable headline, and a small
//! user-ordered list of ideas/goals. All state persists to a local JSON
//! store next to the executable.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use momentum::app::MomentumApp;
use momentum::config::settings::Settings;
use momentum::storage::LocalStore;

fn main() -> Result<()> {
    // Initialize file logging
    let file_appender = tracing_appender::rolling::never(".", "momentum.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Momentum");

    // Install panic hook to log panics
    let next = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("Application panic: {}", info);
        next(info);
    }));

    // Tokio runtime for storage writes
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let store = LocalStore::load()?;

    let initial_title = store
        .get::<Settings>(momentum::storage::KEY_SETTINGS)
        .map(|s| s.tab_name)
        .unwrap_or_else(|| Settings::default().tab_name);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title(initial_title.clone()),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        &initial_title,
        native_options,
        Box::new(move |cc| {
            setup_egui_style(cc);
            Ok(Box::new(MomentumApp::new(cc, handle.clone(), store)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Setup egui visual style
fn setup_egui_style(cc: &eframe::CreationContext<'_>) {
    let mut style = (*cc.egui_ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);

    use egui::CornerRadius;
    style.visuals.widgets.noninteractive.corner_radius = CornerRadius::same(4);
    style.visuals.widgets.inactive.corner_radius = CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = CornerRadius::same(6);
    style.visuals.window_corner_radius = CornerRadius::same(10);

    cc.egui_ctx.set_style(style);
}
