//! Charts module - Histogram binning and chart rendering

mod histogram;
mod plotter;
mod renderer;

pub use histogram::{Histogram, HistogramError};
pub use plotter::{ChartPlotter, ScatterSeries};
pub use renderer::{
    RenderError, RenderedChart, StaticChartLabels, StaticChartRenderer, DEFAULT_HEIGHT,
    DEFAULT_WIDTH,
};
