//! Statistics Calculator Module
//! Descriptive statistics and column aggregation over the loaded table.

use crate::data::numeric_columns;
use polars::prelude::*;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column missing: {0}")]
    ColumnMissing(String),
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summaries for every numeric column of the frame, in frame order.
    /// Columns are independent, so they are computed in parallel.
    pub fn describe(df: &DataFrame) -> Vec<ColumnSummary> {
        let columns = numeric_columns(df);
        columns
            .par_iter()
            .map(|name| {
                let values = Self::column_values(df, name);
                Self::compute_column_summary(name, &values)
            })
            .collect()
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_column_summary(column: &str, values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary {
                column: column.to_string(),
                ..ColumnSummary::default()
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        ColumnSummary {
            column: column.to_string(),
            count: n,
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Sum each named column over the frame, in the given order.
    /// A missing column is reported by name so the caller can surface it.
    pub fn sum_columns(df: &DataFrame, columns: &[&str]) -> Result<Vec<(String, f64)>, StatsError> {
        columns
            .iter()
            .map(|&name| {
                let total = Self::column_sum(df, name)?;
                Ok((name.to_string(), total))
            })
            .collect()
    }

    /// Sum a single column, treating nulls as absent.
    fn column_sum(df: &DataFrame, name: &str) -> Result<f64, StatsError> {
        let column = df
            .column(name)
            .map_err(|_| StatsError::ColumnMissing(name.to_string()))?;
        let values = column.cast(&DataType::Float64)?;
        Ok(values.f64()?.sum().unwrap_or(0.0))
    }

    /// Non-null values of a column as f64.
    fn column_values(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .ok()
            .and_then(|col| col.cast(&DataType::Float64).ok())
            .and_then(|col| {
                col.f64()
                    .ok()
                    .map(|ca| ca.into_iter().flatten().filter(|v| !v.is_nan()).collect())
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_matches_known_values() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let s = StatsCalculator::compute_column_summary("v", &values);

        assert_eq!(s.count, 4);
        assert!((s.mean - 2.5).abs() < 1e-12);
        // Sample std of 1..4 is sqrt(5/3)
        assert!((s.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert!((s.q25 - 1.75).abs() < 1e-12);
        assert!((s.median - 2.5).abs() < 1e-12);
        assert!((s.q75 - 3.25).abs() < 1e-12);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn empty_column_yields_zero_count() {
        let s = StatsCalculator::compute_column_summary("v", &[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
    }

    #[test]
    fn describe_covers_every_numeric_column() {
        let frame = df!(
            "State" => ["A", "B"],
            "persons" => [10i64, 30],
            "population" => [100i64, 200],
        )
        .unwrap();

        let summaries = StatsCalculator::describe(&frame);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].column, "persons");
        assert!((summaries[0].mean - 20.0).abs() < 1e-12);
        assert_eq!(summaries[1].column, "population");
        assert_eq!(summaries[1].count, 2);
    }

    #[test]
    fn sum_columns_reports_the_missing_column() {
        let frame = df!(
            "persons" => [1i64, 2, 3],
        )
        .unwrap();

        let sums = StatsCalculator::sum_columns(&frame, &["persons"]).unwrap();
        assert_eq!(sums, vec![("persons".to_string(), 6.0)]);

        let err = StatsCalculator::sum_columns(&frame, &["persons", "males"]).unwrap_err();
        match err {
            StatsError::ColumnMissing(name) => assert_eq!(name, "males"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
