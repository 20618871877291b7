//! CSV Data Loader Module
//! Loads the workforce CSV and normalizes it for the dashboard using Polars.

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed seed for coordinate synthesis so repeated loads of the same
/// file produce identical maps.
pub const COORD_SEED: u64 = 42;

/// Latitude bounds for synthesized coordinates (approximate range for India).
pub const LAT_RANGE: (f64, f64) = (8.0, 37.0);
/// Longitude bounds for synthesized coordinates.
pub const LON_RANGE: (f64, f64) = (68.0, 97.0);

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// The loaded workforce table. Immutable after construction; loaded once
/// per session and replaced wholesale when the user picks a new file.
pub struct Dataset {
    df: DataFrame,
    file_path: PathBuf,
}

impl Dataset {
    /// Load a CSV file using Polars and normalize it:
    /// header whitespace is trimmed and latitude/longitude are synthesized
    /// when the source lacks them.
    pub fn load(file_path: &Path) -> Result<Self, LoaderError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path.to_path_buf())
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let df = trim_headers(df)?;
        let df = ensure_coordinates(df)?;

        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }

        Ok(Self {
            df,
            file_path: file_path.to_path_buf(),
        })
    }

    /// Get a reference to the loaded DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Get the source file path.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Get list of column names.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get list of numeric column names, in frame order.
    pub fn numeric_columns(&self) -> Vec<String> {
        numeric_columns(&self.df)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.df.height()
    }
}

/// Numeric column names of a frame, in frame order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| {
            matches!(
                col.dtype(),
                DataType::Float32
                    | DataType::Float64
                    | DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
            )
        })
        .map(|col| col.name().to_string())
        .collect()
}

/// Trim leading/trailing whitespace from every column name.
fn trim_headers(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
    let trimmed: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    df.set_column_names(trimmed)?;
    Ok(df)
}

/// Fill latitude/longitude when the source lacks either column.
///
/// Values are uniform within India's bounding box from a fixed-seed RNG:
/// all latitudes are drawn first, then all longitudes, so the output is
/// bit-identical across runs. Synthesized points bear no relation to real
/// district geography.
fn ensure_coordinates(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
    let has_lat = df.column("latitude").is_ok();
    let has_lon = df.column("longitude").is_ok();
    if has_lat && has_lon {
        return Ok(df);
    }

    let n = df.height();
    let mut rng = StdRng::seed_from_u64(COORD_SEED);
    let lats: Vec<f64> = (0..n)
        .map(|_| rng.gen_range(LAT_RANGE.0..LAT_RANGE.1))
        .collect();
    let lons: Vec<f64> = (0..n)
        .map(|_| rng.gen_range(LON_RANGE.0..LON_RANGE.1))
        .collect();

    df.with_column(Column::new("latitude".into(), lats))?;
    df.with_column(Column::new("longitude".into(), lons))?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const BASIC_CSV: &str = "\
State,District,main_workers_total_persons\n\
Goa,North Goa,100\n\
Goa,South Goa,200\n\
Kerala,Idukki,300\n";

    #[test]
    fn trims_whitespace_from_headers() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "padded.csv",
            "  State , District ,main_workers_total_persons \nGoa,North Goa,100\n",
        );

        let ds = Dataset::load(&path).unwrap();
        let cols = ds.columns();
        assert!(cols.contains(&"State".to_string()));
        assert!(cols.contains(&"District".to_string()));
        assert!(cols.contains(&"main_workers_total_persons".to_string()));
        assert!(cols.iter().all(|c| c.trim() == c));
    }

    #[test]
    fn synthesizes_coordinates_inside_bounds() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "nocoords.csv", BASIC_CSV);

        let ds = Dataset::load(&path).unwrap();
        assert!(ds.columns().contains(&"latitude".to_string()));
        assert!(ds.columns().contains(&"longitude".to_string()));

        let lats = ds.frame().column("latitude").unwrap().f64().unwrap();
        let lons = ds.frame().column("longitude").unwrap().f64().unwrap();
        for v in lats.into_iter().flatten() {
            assert!((LAT_RANGE.0..LAT_RANGE.1).contains(&v));
        }
        for v in lons.into_iter().flatten() {
            assert!((LON_RANGE.0..LON_RANGE.1).contains(&v));
        }
    }

    #[test]
    fn synthesis_is_deterministic_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "nocoords.csv", BASIC_CSV);

        let a = Dataset::load(&path).unwrap();
        let b = Dataset::load(&path).unwrap();

        for col in ["latitude", "longitude"] {
            let left: Vec<f64> = a
                .frame()
                .column(col)
                .unwrap()
                .f64()
                .unwrap()
                .into_iter()
                .flatten()
                .collect();
            let right: Vec<f64> = b
                .frame()
                .column(col)
                .unwrap()
                .f64()
                .unwrap()
                .into_iter()
                .flatten()
                .collect();
            assert_eq!(left, right);
        }
    }

    #[test]
    fn existing_coordinates_are_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "coords.csv",
            "State,District,main_workers_total_persons,latitude,longitude\n\
             Goa,North Goa,100,15.5,73.8\n",
        );

        let ds = Dataset::load(&path).unwrap();
        let lat = ds.frame().column("latitude").unwrap().f64().unwrap().get(0);
        let lon = ds.frame().column("longitude").unwrap().f64().unwrap().get(0);
        assert_eq!(lat, Some(15.5));
        assert_eq!(lon, Some(73.8));
    }

    #[test]
    fn numeric_columns_exclude_strings() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "basic.csv", BASIC_CSV);

        let ds = Dataset::load(&path).unwrap();
        let numeric = ds.numeric_columns();
        assert!(numeric.contains(&"main_workers_total_persons".to_string()));
        assert!(!numeric.contains(&"State".to_string()));
        assert!(!numeric.contains(&"District".to_string()));
    }

    #[test]
    fn missing_file_fails_the_load() {
        assert!(Dataset::load(Path::new("does_not_exist.csv")).is_err());
    }
}
