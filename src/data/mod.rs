//! Data module - CSV loading, filtering, and view derivation

mod filter;
mod loader;
mod views;

pub use filter::{FilterError, RegionFilter, DISTRICT_COL, STATE_COL};
pub use loader::{numeric_columns, Dataset, LoaderError, LAT_RANGE, LON_RANGE};
pub use views::{DashboardData, ViewError};
