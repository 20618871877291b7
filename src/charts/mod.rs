//! Charts module - Bar chart rendering

mod plotter;

pub use plotter::{BarSeries, ChartPlotter, PALETTE, RURAL_COLOR, URBAN_COLOR};
