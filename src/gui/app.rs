//! Penguin Dashboard Main Application
//! Title bar, collapsible sidebar with the inputs, and the dashboard page.

use crate::config::DashboardConfig;
use crate::data::{export_rows_csv, filtered_data, Dataset};
use crate::gui::reactive::{Memo, ViewKey};
use crate::gui::{ChartViewer, ControlPanel, ViewerAction};
use egui::{RichText, SidePanel};
use polars::prelude::DataFrame;
use std::path::PathBuf;

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    dataset: Dataset,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    /// Filtered dataset shared by every widget on the page
    view: Memo<ViewKey, Result<DataFrame, String>>,
    sidebar_open: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig, dataset: Dataset) -> Self {
        let mut control_panel = ControlPanel::new(&config);
        control_panel.set_status(&format!("Loaded {} rows", dataset.row_count()));

        Self {
            control_panel,
            chart_viewer: ChartViewer::new(),
            view: Memo::default(),
            sidebar_open: true,
            config,
            dataset,
        }
    }

    /// Recompute the filtered view if the inputs it depends on changed.
    fn current_view(&mut self) -> (ViewKey, Result<DataFrame, String>) {
        let selection = &self.control_panel.inputs.selected_species;
        let key = ViewKey::new(self.config.filter_mode, selection);

        if self.view.key().is_some_and(|previous| *previous != key) {
            self.chart_viewer.view_changed();
        }

        let dataset = &self.dataset;
        let mode = self.config.filter_mode;
        let view = self
            .view
            .get_or_compute(key.clone(), |_| {
                filtered_data(dataset, mode, selection).map_err(|e| {
                    log::error!("Filtering failed: {e}");
                    e.to_string()
                })
            })
            .clone();
        (key, view)
    }

    /// Export the rows selected in the data grid to CSV
    fn handle_export_selection(&mut self, view: &DataFrame) {
        let Some(path) = save_dialog("CSV Files", "csv", "penguins_selection.csv") else {
            return; // User cancelled
        };

        match export_rows_csv(view, self.chart_viewer.grid_selection.rows(), &path) {
            Ok(count) => self
                .control_panel
                .set_status(&format!("Exported {} rows to {}", count, path.display())),
            Err(e) => {
                log::error!("Export failed: {e}");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Save the static histogram as PNG and open it
    fn handle_save_png(&mut self) {
        let Some(chart) = self.chart_viewer.rendered_chart().cloned() else {
            self.control_panel.set_status("No chart to save");
            return;
        };

        let Some(path) = save_dialog("PNG Image", "png", "seaborn_histogram.png") else {
            return;
        };

        match chart.save_png(&path) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Saved {}", path.display()));
                if let Err(e) = open::that(&path) {
                    log::warn!("Could not open {}: {e}", path.display());
                }
            }
            Err(e) => {
                log::error!("Saving chart failed: {e}");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

fn save_dialog(filter_name: &str, extension: &str, file_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter(filter_name, &[extension])
        .set_file_name(file_name)
        .save_file()
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Title bar with the sidebar toggle
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let icon = if self.sidebar_open { "◀" } else { "☰" };
                if ui.button(icon).on_hover_text("Toggle sidebar").clicked() {
                    self.sidebar_open = !self.sidebar_open;
                }
                ui.heading(&self.config.title);
            });
        });

        // Left panel - inputs
        SidePanel::left("control_panel")
            .resizable(true)
            .min_width(240.0)
            .max_width(320.0)
            .show_animated(ctx, self.sidebar_open, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.control_panel.show(ui);
                });
            });

        let (key, view) = self.current_view();

        // Central panel - dashboard page
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| match &view {
                Ok(df) => self
                    .chart_viewer
                    .show(ui, &key, df, &self.control_panel.inputs),
                Err(message) => {
                    ui.label(
                        RichText::new(format!("Error: {message}"))
                            .color(egui::Color32::from_rgb(220, 53, 69)),
                    );
                    ViewerAction::None
                }
            })
            .inner;

        match (action, &view) {
            (ViewerAction::ExportSelection, Ok(df)) => self.handle_export_selection(df),
            (ViewerAction::SaveChartPng, _) => self.handle_save_png(),
            _ => {}
        }
    }
}
