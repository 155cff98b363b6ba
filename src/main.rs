mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use app::PenguinsApp;
use config::DashboardConfig;
use data::filter::FilterState;
use data::model::{PenguinDataset, Species};
use eframe::egui;
use state::DashboardSession;

/// Load the penguin table named by the configuration, or the bundled one.
fn load_dataset(config: &DashboardConfig) -> anyhow::Result<PenguinDataset> {
    match &config.data_path {
        Some(path) => data::loader::load_file(path),
        None => data::loader::load_builtin(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::resolve(std::env::args_os().nth(1).map(PathBuf::from))
        .context("loading dashboard configuration")?;

    // Loaded once; every session reads the same table.
    let dataset = match load_dataset(&config) {
        Ok(ds) => Arc::new(ds),
        Err(e) => {
            log::error!("Failed to load penguin data: {e:#}");
            return Err(e);
        }
    };
    if dataset.is_empty() {
        log::warn!("Penguin table has no rows; every view will be empty");
    }
    log::info!(
        "Loaded {} penguins from {}",
        dataset.len(),
        config
            .data_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled penguins.csv".to_string())
    );

    let filter = FilterState::new(config.initial_mass_ceiling, Species::ALL.into_iter().collect());
    let session = DashboardSession::with_filter(dataset, filter);
    let app = PenguinsApp::new(session, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the sidebar logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
