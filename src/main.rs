//! Penguin Dashboard - Palmer Penguins Interactive Data Dashboard
//!
//! A Rust application showing the Palmer Penguins dataset as tables,
//! an interactive histogram, a static histogram and a scatterplot.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::Context;
use config::DashboardConfig;
use data::DatasetLoader;
use eframe::egui;
use gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::from_env().unwrap_or_else(|e| {
        log::warn!("{e}; falling back to built-in dashboard config");
        DashboardConfig::default()
    });

    // The page never renders without data
    let dataset = match &config.data_path {
        Some(path) => DatasetLoader::load_path(path)
            .with_context(|| format!("Failed to load dataset from {}", path.display())),
        None => DatasetLoader::load_bundled().context("Failed to load bundled dataset"),
    }
    .inspect_err(|e| log::error!("{e:#}"))?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title(&config.title),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
