//! Statistics module - Descriptive statistics and column sums

mod calculator;

pub use calculator::{ColumnSummary, StatsCalculator, StatsError};
