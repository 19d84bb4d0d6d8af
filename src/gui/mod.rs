//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod reactive;
mod table_view;

pub use app::DashboardApp;
pub use chart_viewer::{ChartViewer, ViewerAction};
pub use control_panel::ControlPanel;
pub use reactive::ViewKey;
