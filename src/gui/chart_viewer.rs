//! Chart Viewer Widget
//! Central scrollable page: table, grid and the three chart cards.
//! Full-screen capable cards can be expanded over the whole central area.

use crate::charts::{
    ChartPlotter, Histogram, RenderError, RenderedChart, ScatterSeries, StaticChartLabels,
    StaticChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
use crate::data::{numeric_values, NumericAttribute};
use crate::gui::control_panel::Inputs;
use crate::gui::reactive::Memo;
use crate::gui::table_view::{self, GridSelection};
use crate::gui::ViewKey;
use crate::stats::{GroupStats, StatsCalculator};
use egui::{Color32, RichText, ScrollArea, TextureHandle, TextureOptions};
use polars::prelude::DataFrame;

const CARD_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 320.0;
const TABLE_HEIGHT: f32 = 260.0;
const SEABORN_ALT_TEXT: &str = "Seaborn Histogram";

/// Cards that can be shown full screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    PlotlyHistogram,
    SeabornHistogram,
    Scatterplot,
}

impl CardKind {
    pub fn header(&self) -> &'static str {
        match self {
            CardKind::PlotlyHistogram => "Plotly Histogram",
            CardKind::SeabornHistogram => "Seaborn Histogram",
            CardKind::Scatterplot => "Plotly Scatterplot: Species",
        }
    }
}

/// Actions the page asks the app to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerAction {
    None,
    ExportSelection,
    SaveChartPng,
}

/// Output of the static histogram card.
enum StaticOutput {
    Ready {
        chart: RenderedChart,
        texture: TextureHandle,
    },
    NoData,
    Failed(String),
}

/// The dashboard page and the memoised outputs of its widgets.
#[derive(Default)]
pub struct ChartViewer {
    pub grid_selection: GridSelection,
    maximized: Option<CardKind>,
    histogram: Memo<(NumericAttribute, u32, ViewKey), Histogram>,
    stats: Memo<(NumericAttribute, ViewKey), Vec<GroupStats>>,
    scatter: Memo<ViewKey, Vec<ScatterSeries>>,
    static_chart: Memo<(u32, ViewKey), StaticOutput>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current static histogram bitmap, if it rendered.
    pub fn rendered_chart(&self) -> Option<&RenderedChart> {
        match self.static_chart.current()? {
            StaticOutput::Ready { chart, .. } => Some(chart),
            _ => None,
        }
    }

    /// Forget selections that refer to a previous view.
    pub fn view_changed(&mut self) {
        self.grid_selection.clear();
    }

    /// Draw the page
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        key: &ViewKey,
        view: &DataFrame,
        inputs: &Inputs,
    ) -> ViewerAction {
        let mut action = ViewerAction::None;
        self.grid_selection.retain_below(view.height());

        if let Some(kind) = self.maximized {
            ui.horizontal(|ui| {
                ui.label(RichText::new(kind.header()).size(18.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✖ Close").clicked() {
                        self.maximized = None;
                    }
                });
            });
            ui.separator();
            let height = (ui.available_height() - 60.0).max(CHART_HEIGHT);
            self.draw_card_body(ui, kind, key, view, inputs, height, &mut action);
            return action;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // ===== DataTable =====
                Self::draw_section_title(ui, "DataTable", "Penguins Table");
                table_view::draw_table(ui, "penguins_table", view, TABLE_HEIGHT);
                ui.add_space(CARD_SPACING);

                // ===== DataGrid =====
                Self::draw_section_title(ui, "DataGrid", "Penguins DataGrid");
                ui.horizontal(|ui| {
                    ui.label(format!(
                        "{} of {} rows selected",
                        self.grid_selection.len(),
                        view.height()
                    ));
                    ui.add_enabled_ui(!self.grid_selection.is_empty(), |ui| {
                        if ui.small_button("Clear").clicked() {
                            self.grid_selection.clear();
                        }
                        if ui.small_button("💾 Export selection").clicked() {
                            action = ViewerAction::ExportSelection;
                        }
                    });
                });
                table_view::draw_grid(
                    ui,
                    "penguins_grid",
                    view,
                    TABLE_HEIGHT,
                    &mut self.grid_selection,
                );
                ui.add_space(CARD_SPACING);

                // ===== Chart cards =====
                for kind in [
                    CardKind::PlotlyHistogram,
                    CardKind::SeabornHistogram,
                    CardKind::Scatterplot,
                ] {
                    self.draw_card(ui, kind, key, view, inputs, &mut action);
                    ui.add_space(CARD_SPACING);
                }
            });

        action
    }

    /// Small "card" label beside a section heading
    fn draw_section_title(ui: &mut egui::Ui, card_label: &str, heading: &str) {
        ui.horizontal(|ui| {
            egui::Frame::none()
                .rounding(6.0)
                .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(card_label);
                });
            ui.add_space(10.0);
            ui.heading(heading);
        });
        ui.add_space(5.0);
    }

    fn draw_card(
        &mut self,
        ui: &mut egui::Ui,
        kind: CardKind,
        key: &ViewKey,
        view: &DataFrame,
        inputs: &Inputs,
        action: &mut ViewerAction,
    ) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(120)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(kind.header()).size(16.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("⛶").on_hover_text("Expand").clicked() {
                            self.maximized = Some(kind);
                        }
                    });
                });
                ui.separator();
                self.draw_card_body(ui, kind, key, view, inputs, CHART_HEIGHT, action);
            });
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_card_body(
        &mut self,
        ui: &mut egui::Ui,
        kind: CardKind,
        key: &ViewKey,
        view: &DataFrame,
        inputs: &Inputs,
        height: f32,
        action: &mut ViewerAction,
    ) {
        match kind {
            CardKind::PlotlyHistogram => self.draw_plotly_histogram(ui, key, view, inputs, height),
            CardKind::SeabornHistogram => {
                self.draw_seaborn_histogram(ui, key, view, inputs, height, action)
            }
            CardKind::Scatterplot => self.draw_scatterplot(ui, key, view, height),
        }
    }

    fn draw_plotly_histogram(
        &mut self,
        ui: &mut egui::Ui,
        key: &ViewKey,
        view: &DataFrame,
        inputs: &Inputs,
        height: f32,
    ) {
        let attribute = inputs.selected_attribute;
        let bins = inputs.plotly_bin_count;

        let histogram = self
            .histogram
            .get_or_compute((attribute, bins, key.clone()), |_| {
                let values = numeric_values(view, attribute);
                // The bin input is clamped to at least 1
                Histogram::compute(&values, bins.max(1) as usize).unwrap_or_default()
            });
        if histogram.is_empty() {
            ui.label(RichText::new("No data to display").italics());
        } else {
            ui.label(
                RichText::new(format!("{} observations", histogram.total()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
            ChartPlotter::draw_histogram(ui, "plotly_histogram", histogram, attribute, height);
        }

        ui.add_space(8.0);

        let stats = self.stats.get_or_compute((attribute, key.clone()), |_| {
            StatsCalculator::compute_species_stats(view, attribute)
        });
        ChartPlotter::draw_stats_table(ui, "plotly_histogram_stats", stats);
    }

    fn draw_seaborn_histogram(
        &mut self,
        ui: &mut egui::Ui,
        key: &ViewKey,
        view: &DataFrame,
        inputs: &Inputs,
        height: f32,
        action: &mut ViewerAction,
    ) {
        let ctx = ui.ctx().clone();
        let output = self
            .static_chart
            .get_or_compute((inputs.seaborn_bin_count, key.clone()), |(bins, _)| {
                render_static_histogram(&ctx, view, *bins)
            });

        match output {
            StaticOutput::Ready { texture, .. } => {
                let width = ui.available_width();
                ui.add(
                    egui::Image::new(texture)
                        .max_width(width)
                        .max_height(height)
                        .maintain_aspect_ratio(true),
                )
                .on_hover_text(SEABORN_ALT_TEXT);

                if ui.small_button("💾 Save PNG").clicked() {
                    *action = ViewerAction::SaveChartPng;
                }
            }
            StaticOutput::NoData => {
                ui.label(RichText::new("No data to display").italics());
            }
            StaticOutput::Failed(message) => {
                ui.label(
                    RichText::new(format!("{SEABORN_ALT_TEXT}: {message}"))
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            }
        }
    }

    fn draw_scatterplot(&mut self, ui: &mut egui::Ui, key: &ViewKey, view: &DataFrame, height: f32) {
        let series = self.scatter.get_or_compute(key.clone(), |_| {
            ChartPlotter::scatter_series(
                view,
                NumericAttribute::BillLengthMm,
                NumericAttribute::BodyMassG,
            )
            .unwrap_or_else(|e| {
                log::error!("Scatterplot data unavailable: {e}");
                Vec::new()
            })
        });

        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Penguins Plot").size(14.0).strong());
        });
        ChartPlotter::draw_scatter(
            ui,
            "plotly_scatterplot",
            series,
            NumericAttribute::BillLengthMm,
            NumericAttribute::BodyMassG,
            height,
        );
    }
}

/// Bin body mass and render it with plotters, then upload the bitmap.
fn render_static_histogram(ctx: &egui::Context, view: &DataFrame, bins: u32) -> StaticOutput {
    log::debug!("Rendering static histogram: {bins} bins, {} rows", view.height());

    let values = numeric_values(view, NumericAttribute::BodyMassG);
    let rendered = Histogram::compute(&values, bins as usize)
        .map_err(RenderError::from)
        .and_then(|histogram| {
            StaticChartRenderer::render_histogram(
                &histogram,
                &StaticChartLabels::default(),
                DEFAULT_WIDTH,
                DEFAULT_HEIGHT,
            )
        });

    match rendered {
        Ok(chart) => {
            let texture = ctx.load_texture(
                "seaborn_histogram",
                chart.to_color_image(),
                TextureOptions::LINEAR,
            );
            StaticOutput::Ready { chart, texture }
        }
        Err(RenderError::EmptyHistogram) => StaticOutput::NoData,
        Err(e) => {
            log::error!("Static histogram failed: {e}");
            StaticOutput::Failed(e.to_string())
        }
    }
}
