//! Dashboard View Builder
//! One synchronous pass from the loaded table and the current selection
//! to everything the central panel renders. Selection changes rebuild
//! these views; the source file is never re-read.

use crate::charts::BarSeries;
use crate::data::{FilterError, RegionFilter};
use crate::map::{markers_from_frame, MapError, Marker};
use crate::stats::{ColumnSummary, StatsCalculator, StatsError};
use polars::prelude::*;
use thiserror::Error;

/// Columns summed for the workers summary chart.
pub const WORKER_SUMMARY_COLS: [&str; 4] = [
    "main_workers_total_persons",
    "main_workers_total_males",
    "main_workers_total_females",
    "TotalPopulation",
];
/// Columns summed for the rural side of the comparison chart.
pub const RURAL_COLS: [&str; 3] = [
    "main_workers_rural_persons",
    "main_workers_rural_males",
    "main_workers_rural_females",
];
/// Columns summed for the urban side of the comparison chart.
pub const URBAN_COLS: [&str; 3] = [
    "main_workers_urban_persons",
    "main_workers_urban_males",
    "main_workers_urban_females",
];

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Everything the dashboard renders for one (state, district) selection.
pub struct DashboardData {
    pub state: String,
    pub district: String,
    pub state_row_count: usize,
    pub district_row_count: usize,
    /// describe() summary over the full table, not the filtered subset.
    pub summary: Vec<ColumnSummary>,
    /// Workers summary chart, or the name of the missing column.
    pub worker_summary: Result<BarSeries, String>,
    pub rural_urban: BarSeries,
    pub markers: Vec<Marker>,
}

impl DashboardData {
    /// Derive all dashboard views for the current selection.
    pub fn build(df: &DataFrame, state: &str, district: &str) -> Result<Self, ViewError> {
        let state_rows = RegionFilter::state_rows(df, state)?;
        let district_rows = RegionFilter::district_rows(df, state, district)?;

        let summary = StatsCalculator::describe(df);

        // A missing worker column downgrades this chart to an inline
        // notice; every other section still renders.
        let worker_summary = match StatsCalculator::sum_columns(&state_rows, &WORKER_SUMMARY_COLS) {
            Ok(bars) => Ok(BarSeries {
                title: format!("{state} - Workers Summary"),
                bars,
            }),
            Err(StatsError::ColumnMissing(name)) => Err(name),
            Err(e) => return Err(e.into()),
        };

        let rural = StatsCalculator::sum_columns(&state_rows, &RURAL_COLS)?;
        let urban = StatsCalculator::sum_columns(&state_rows, &URBAN_COLS)?;
        let rural_urban = BarSeries {
            title: format!("{state} - Rural vs Urban Workers"),
            bars: vec![
                ("Rural".to_string(), rural.iter().map(|(_, v)| *v).sum()),
                ("Urban".to_string(), urban.iter().map(|(_, v)| *v).sum()),
            ],
        };

        let markers = markers_from_frame(&state_rows)?;

        Ok(Self {
            state: state.to_string(),
            district: district.to_string(),
            state_row_count: state_rows.height(),
            district_row_count: district_rows.height(),
            summary,
            worker_summary,
            rural_urban,
            markers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DISTRICT_COL, STATE_COL};

    fn sample_frame() -> DataFrame {
        df!(
            STATE_COL => ["A", "A", "B"],
            DISTRICT_COL => ["X", "Y", "X"],
            "main_workers_total_persons" => [10i64, 20, 40],
            "main_workers_total_males" => [6i64, 12, 24],
            "main_workers_total_females" => [4i64, 8, 16],
            "TotalPopulation" => [100i64, 200, 400],
            "main_workers_rural_persons" => [7i64, 14, 28],
            "main_workers_rural_males" => [4i64, 8, 16],
            "main_workers_rural_females" => [3i64, 6, 12],
            "main_workers_urban_persons" => [3i64, 6, 12],
            "main_workers_urban_males" => [2i64, 4, 8],
            "main_workers_urban_females" => [1i64, 2, 4],
            "latitude" => [10.0, 11.0, 12.0],
            "longitude" => [70.0, 71.0, 72.0],
        )
        .unwrap()
    }

    #[test]
    fn builds_all_sections_for_a_selection() {
        let frame = sample_frame();
        let data = DashboardData::build(&frame, "A", "X").unwrap();

        assert_eq!(data.state_row_count, 2);
        assert_eq!(data.district_row_count, 1);
        assert_eq!(data.markers.len(), 2);
        assert!(!data.summary.is_empty());

        let chart = data.worker_summary.unwrap();
        assert_eq!(chart.bars.len(), 4);
        assert_eq!(chart.bars[0], ("main_workers_total_persons".to_string(), 30.0));
        assert_eq!(chart.bars[3], ("TotalPopulation".to_string(), 300.0));

        // Rural/urban sums over state "A": rural 7+14+4+8+3+6, urban 3+6+2+4+1+2
        assert_eq!(data.rural_urban.bars[0], ("Rural".to_string(), 42.0));
        assert_eq!(data.rural_urban.bars[1], ("Urban".to_string(), 18.0));
    }

    #[test]
    fn missing_worker_column_downgrades_only_that_chart() {
        let mut frame = sample_frame();
        let _ = frame.drop_in_place("main_workers_total_males").unwrap();

        let data = DashboardData::build(&frame, "A", "X").unwrap();

        // The notice names the missing column; everything else is intact.
        assert_eq!(
            data.worker_summary.unwrap_err(),
            "main_workers_total_males".to_string()
        );
        assert!(!data.summary.is_empty());
        assert_eq!(data.markers.len(), 2);
        assert_eq!(data.rural_urban.bars.len(), 2);
    }

    #[test]
    fn missing_persons_column_keeps_the_map_alive() {
        let mut frame = sample_frame();
        let _ = frame.drop_in_place("main_workers_total_persons").unwrap();

        let data = DashboardData::build(&frame, "A", "X").unwrap();
        assert_eq!(
            data.worker_summary.unwrap_err(),
            "main_workers_total_persons".to_string()
        );
        assert_eq!(data.markers.len(), 2);
        assert!(data.markers.iter().all(|m| m.total_workers == 0.0));
    }

    #[test]
    fn missing_rural_column_fails_the_whole_build() {
        let mut frame = sample_frame();
        let _ = frame.drop_in_place("main_workers_rural_males").unwrap();
        assert!(DashboardData::build(&frame, "A", "X").is_err());
    }

    #[test]
    fn summary_covers_the_full_table() {
        let frame = sample_frame();
        let data = DashboardData::build(&frame, "A", "X").unwrap();

        let persons = data
            .summary
            .iter()
            .find(|s| s.column == "main_workers_total_persons")
            .unwrap();
        // Full table, not the state subset: mean of 10, 20, 40
        assert_eq!(persons.count, 3);
        assert!((persons.mean - 70.0 / 3.0).abs() < 1e-12);
    }
}
