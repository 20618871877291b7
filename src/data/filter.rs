//! Region Filter Module
//! Derives selection options and filtered row sets from the loaded table.

use polars::prelude::*;
use thiserror::Error;

/// Column holding the state name.
pub const STATE_COL: &str = "State";
/// Column holding the district name.
pub const DISTRICT_COL: &str = "District";

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Stateless filters over the loaded table. Every call is a
/// non-destructive view; the source frame is never modified.
pub struct RegionFilter;

impl RegionFilter {
    /// Sorted unique state names for the state dropdown.
    pub fn unique_states(df: &DataFrame) -> Vec<String> {
        Self::unique_strings(df, STATE_COL)
    }

    /// Sorted unique district names among the selected state's rows,
    /// for the district dropdown. Re-derived whenever the state changes.
    pub fn districts_for_state(df: &DataFrame, state: &str) -> Vec<String> {
        Self::state_rows(df, state)
            .map(|rows| Self::unique_strings(&rows, DISTRICT_COL))
            .unwrap_or_default()
    }

    /// Rows whose state equals the selection.
    pub fn state_rows(df: &DataFrame, state: &str) -> Result<DataFrame, FilterError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(STATE_COL).eq(lit(state)))
            .collect()?;
        Ok(filtered)
    }

    /// Rows matching the (state, district) pair. The pair filter keeps a
    /// district name shared by two states from pulling in the other
    /// state's rows.
    pub fn district_rows(
        df: &DataFrame,
        state: &str,
        district: &str,
    ) -> Result<DataFrame, FilterError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(
                col(STATE_COL)
                    .eq(lit(state))
                    .and(col(DISTRICT_COL).eq(lit(district))),
            )
            .collect()?;
        Ok(filtered)
    }

    /// Sorted unique non-null values of a string column.
    fn unique_strings(df: &DataFrame, column: &str) -> Vec<String> {
        df.column(column)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                let mut values: Vec<String> = (0..series.len())
                    .filter_map(|i| {
                        let val = series.get(i).ok()?;
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect();
                values.sort();
                values
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            STATE_COL => ["A", "A", "B"],
            DISTRICT_COL => ["X", "Y", "X"],
            "main_workers_total_persons" => [10i64, 20, 30],
        )
        .unwrap()
    }

    #[test]
    fn state_filter_returns_only_matching_rows() {
        let frame = sample_frame();
        let rows = RegionFilter::state_rows(&frame, "A").unwrap();
        assert_eq!(rows.height(), 2);

        let states = RegionFilter::unique_states(&rows);
        assert_eq!(states, vec!["A".to_string()]);
    }

    #[test]
    fn state_options_are_sorted_unique() {
        let frame = df!(
            STATE_COL => ["B", "A", "B", "A"],
            DISTRICT_COL => ["X", "Y", "X", "Y"],
        )
        .unwrap();
        assert_eq!(
            RegionFilter::unique_states(&frame),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn district_options_are_scoped_to_the_state() {
        let frame = sample_frame();
        // State "A" offers X and Y; "B"-only districts never appear.
        assert_eq!(
            RegionFilter::districts_for_state(&frame, "A"),
            vec!["X".to_string(), "Y".to_string()]
        );
        assert_eq!(
            RegionFilter::districts_for_state(&frame, "B"),
            vec!["X".to_string()]
        );
    }

    #[test]
    fn district_rows_match_the_state_district_pair() {
        let frame = sample_frame();
        // District "X" exists in both states; only the selected pair matches.
        let rows = RegionFilter::district_rows(&frame, "A", "X").unwrap();
        assert_eq!(rows.height(), 1);
        let persons = rows
            .column("main_workers_total_persons")
            .unwrap()
            .i64()
            .unwrap()
            .get(0);
        assert_eq!(persons, Some(10));
    }

    #[test]
    fn unknown_state_yields_empty_views() {
        let frame = sample_frame();
        assert!(RegionFilter::districts_for_state(&frame, "Z").is_empty());
        assert_eq!(RegionFilter::state_rows(&frame, "Z").unwrap().height(), 0);
    }
}
