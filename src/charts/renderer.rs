//! Static Chart Renderer
//! Renders the fixed body-mass histogram to an RGB bitmap with plotters.
//!
//! Layout:
//! 1. Title: "Palmer penguins" centered
//! 2. Bars: one per bin, x = body mass, y = count
//! 3. Axis labels: "Mass" / "Count"

use crate::charts::{Histogram, HistogramError};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 480;

const BAR_COLOR: RGBColor = RGBColor(76, 114, 176);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Image size {0}x{1} is too small")]
    TooSmall(u32, u32),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Histogram(#[from] HistogramError),
    #[error("Nothing to draw")]
    EmptyHistogram,
}

/// Captions of the static histogram.
#[derive(Debug, Clone)]
pub struct StaticChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for StaticChartLabels {
    fn default() -> Self {
        Self {
            title: "Palmer penguins".to_string(),
            x_label: "Mass".to_string(),
            y_label: "Count".to_string(),
        }
    }
}

/// A rendered chart: tightly packed RGB8 pixels.
#[derive(Clone)]
pub struct RenderedChart {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl RenderedChart {
    /// Convert to an egui image for uploading as a texture.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgb([self.width as usize, self.height as usize], &self.rgb)
    }

    /// Save as PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let img = image::RgbImage::from_raw(self.width, self.height, self.rgb.clone())
            .ok_or(RenderError::TooSmall(self.width, self.height))?;
        img.save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Saved chart image to {}", path.display());
        Ok(())
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `histogram` into a `width` x `height` bitmap.
    pub fn render_histogram(
        histogram: &Histogram,
        labels: &StaticChartLabels,
        width: u32,
        height: u32,
    ) -> Result<RenderedChart, RenderError> {
        if width < 100 || height < 100 {
            return Err(RenderError::TooSmall(width, height));
        }
        let (x_min, x_max) = histogram.range().ok_or(RenderError::EmptyHistogram)?;
        let y_max = (histogram.max_count() as f64 * 1.05).max(1.0);

        let mut rgb = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(drawing_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&labels.title, ("sans-serif", 22))
                .margin(12)
                .x_label_area_size(40)
                .y_label_area_size(50)
                .build_cartesian_2d(x_min..x_max, 0f64..y_max)
                .map_err(drawing_error)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc(&labels.x_label)
                .y_desc(&labels.y_label)
                .draw()
                .map_err(drawing_error)?;

            chart
                .draw_series(histogram.bins.iter().filter(|b| b.count > 0).map(|bin| {
                    Rectangle::new(
                        [(bin.start, 0.0), (bin.end, bin.count as f64)],
                        BAR_COLOR.mix(0.75).filled(),
                    )
                }))
                .map_err(drawing_error)?;

            chart
                .draw_series(histogram.bins.iter().filter(|b| b.count > 0).map(|bin| {
                    Rectangle::new(
                        [(bin.start, 0.0), (bin.end, bin.count as f64)],
                        WHITE.stroke_width(1),
                    )
                }))
                .map_err(drawing_error)?;

            root.present().map_err(drawing_error)?;
        }

        Ok(RenderedChart { width, height, rgb })
    }
}

fn drawing_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{numeric_values, DatasetLoader, NumericAttribute};

    fn non_white_pixels(chart: &RenderedChart) -> usize {
        chart
            .rgb
            .chunks_exact(3)
            .filter(|px| px != &[255, 255, 255])
            .count()
    }

    #[test]
    fn renders_body_mass_histogram_of_bundled_dataset() {
        let dataset = DatasetLoader::load_bundled().unwrap();
        let values = numeric_values(dataset.frame(), NumericAttribute::BodyMassG);
        let hist = Histogram::compute(&values, 100).unwrap();

        let chart = StaticChartRenderer::render_histogram(
            &hist,
            &StaticChartLabels::default(),
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
        )
        .unwrap();

        assert_eq!((chart.width, chart.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(
            chart.rgb.len(),
            DEFAULT_WIDTH as usize * DEFAULT_HEIGHT as usize * 3
        );
        assert!(non_white_pixels(&chart) > 0);
    }

    #[test]
    fn renders_constant_sample_as_single_bar() {
        let hist = Histogram::compute(&[4200.0, 4200.0, 4200.0], 100).unwrap();
        assert_eq!(hist.bins.len(), 1);

        let chart = StaticChartRenderer::render_histogram(
            &hist,
            &StaticChartLabels::default(),
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
        )
        .unwrap();

        assert_eq!(chart.to_color_image().size, [800, 480]);
        assert!(non_white_pixels(&chart) > 0);
    }

    #[test]
    fn empty_histogram_is_not_rendered() {
        let err = StaticChartRenderer::render_histogram(
            &Histogram::default(),
            &StaticChartLabels::default(),
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
        )
        .err()
        .unwrap();

        assert!(matches!(err, RenderError::EmptyHistogram));
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let hist = Histogram::compute(&[1.0, 2.0], 2).unwrap();
        let err =
            StaticChartRenderer::render_histogram(&hist, &StaticChartLabels::default(), 50, 400)
                .err()
                .unwrap();

        assert!(matches!(err, RenderError::TooSmall(50, 400)));
    }

    #[test]
    fn rendered_chart_converts_to_egui_image() {
        let chart = RenderedChart {
            width: 3,
            height: 2,
            rgb: vec![255; 18],
        };

        let image = chart.to_color_image();

        assert_eq!(image.size, [3, 2]);
        assert!(image.pixels.iter().all(|p| *p == egui::Color32::WHITE));
    }

    #[test]
    fn save_png_writes_a_file() {
        let chart = RenderedChart {
            width: 4,
            height: 4,
            rgb: vec![128; 48],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        chart.save_png(&path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (4, 4));
    }
}
