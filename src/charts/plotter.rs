//! Chart Plotter Module
//! Interactive histogram and scatterplot using egui_plot.

use crate::charts::Histogram;
use crate::data::{float_column, species_column, NumericAttribute, Species};
use crate::stats::GroupStats;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};
use polars::prelude::*;

/// Bar colour of the interactive histogram
pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

/// Color per species, in `Species::ALL` order
pub const SPECIES_PALETTE: [Color32; 3] = [
    Color32::from_rgb(99, 110, 250), // Blue
    Color32::from_rgb(239, 85, 59),  // Red
    Color32::from_rgb(0, 204, 150),  // Green
];

/// Points of one species for the scatterplot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub species: Species,
    pub points: Vec<[f64; 2]>,
}

/// Creates the interactive dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a species.
    pub fn species_color(species: Species) -> Color32 {
        let idx = Species::ALL
            .iter()
            .position(|s| *s == species)
            .unwrap_or(0);
        SPECIES_PALETTE[idx % SPECIES_PALETTE.len()]
    }

    /// Split the view into one series per species.
    ///
    /// Rows missing either coordinate or the species are skipped.
    pub fn scatter_series(
        df: &DataFrame,
        x: NumericAttribute,
        y: NumericAttribute,
    ) -> PolarsResult<Vec<ScatterSeries>> {
        let xs = float_column(df, x.column())?;
        let ys = float_column(df, y.column())?;
        let species = species_column(df);

        let series = Species::ALL
            .into_iter()
            .map(|sp| {
                let points = species
                    .iter()
                    .zip(xs.iter().zip(ys.iter()))
                    .filter_map(|(s, (x, y))| match (s, x, y) {
                        (Some(s), Some(x), Some(y)) if *s == sp => Some([*x, *y]),
                        _ => None,
                    })
                    .collect();
                ScatterSeries {
                    species: sp,
                    points,
                }
            })
            .filter(|s| !s.points.is_empty())
            .collect();

        Ok(series)
    }

    /// Draw the interactive histogram of one attribute.
    pub fn draw_histogram(
        ui: &mut egui::Ui,
        id: &str,
        histogram: &Histogram,
        attribute: NumericAttribute,
        height: f32,
    ) {
        let bars: Vec<Bar> = histogram
            .bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width())
                    .name(format!("{:.2} - {:.2}", bin.start, bin.end))
            })
            .collect();

        Plot::new(id)
            .height(height)
            .x_axis_label(attribute.column())
            .y_axis_label("count")
            .allow_scroll(false)
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(HISTOGRAM_COLOR)
                        .name(attribute.column()),
                );
            });
    }

    /// Draw the species-coloured scatterplot.
    pub fn draw_scatter(
        ui: &mut egui::Ui,
        id: &str,
        series: &[ScatterSeries],
        x: NumericAttribute,
        y: NumericAttribute,
        height: f32,
    ) {
        Plot::new(id)
            .height(height)
            .legend(Legend::default().position(egui_plot::Corner::RightTop))
            .x_axis_label(x.label())
            .y_axis_label(y.label())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for s in series {
                    plot_ui.points(
                        Points::new(PlotPoints::from(s.points.clone()))
                            .radius(3.0)
                            .filled(true)
                            .color(Self::species_color(s.species))
                            .name(s.species),
                    );
                }
            });
    }

    /// Draw per-species statistics table
    pub fn draw_stats_table(ui: &mut egui::Ui, id: &str, stats: &[GroupStats]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Species", "N", "Mean", "Median", "Std", "P05", "P95"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        let default_text_color = ui.visuals().text_color();

                        for gs in stats {
                            let color = gs
                                .group_name
                                .parse::<Species>()
                                .map(Self::species_color)
                                .unwrap_or(default_text_color);

                            ui.label(RichText::new(&gs.group_name).size(11.0).color(color));
                            ui.label(RichText::new(gs.count.to_string()).size(11.0));
                            for value in [gs.mean, gs.median, gs.std, gs.p05, gs.p95] {
                                ui.label(RichText::new(format!("{:.2}", value)).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
