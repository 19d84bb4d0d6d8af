//! Stats module - descriptive statistics for the dashboard

mod calculator;

pub use calculator::{GroupStats, StatsCalculator};
