//! Marker Cluster Module
//! Extracts map markers from filtered rows and groups nearby markers
//! into clusters for readability.

use crate::data::{DISTRICT_COL, STATE_COL};
use polars::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;

/// Column providing the marker label's worker count.
pub const TOTAL_WORKERS_COL: &str = "main_workers_total_persons";

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One map marker: a row of the filtered table placed at its
/// (possibly synthesized) coordinates.
#[derive(Debug, Clone)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub state: String,
    pub district: String,
    pub total_workers: f64,
}

impl Marker {
    /// Popup label matching the marker: state, district, total workers.
    pub fn label(&self) -> String {
        format!(
            "State: {}\nDistrict: {}\nTotal Workers: {}",
            self.state, self.district, self.total_workers
        )
    }
}

/// A group of markers sharing a grid cell, drawn at their centroid.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub lat: f64,
    pub lon: f64,
    /// Indices into the marker slice this cluster was built from.
    pub members: Vec<usize>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One marker per row of the filtered frame. Rows with a null
/// coordinate are skipped. The worker-count column is optional so the
/// map still renders when the chart already reported it missing.
pub fn markers_from_frame(df: &DataFrame) -> Result<Vec<Marker>, MapError> {
    let states = df.column(STATE_COL)?;
    let districts = df.column(DISTRICT_COL)?;
    let lats = df.column("latitude")?.cast(&DataType::Float64)?;
    let lons = df.column("longitude")?.cast(&DataType::Float64)?;
    let workers = match df.column(TOTAL_WORKERS_COL) {
        Ok(col) => Some(col.cast(&DataType::Float64)?),
        Err(_) => None,
    };

    let lat_ca = lats.f64()?;
    let lon_ca = lons.f64()?;
    let worker_ca = match &workers {
        Some(col) => Some(col.f64()?),
        None => None,
    };

    let mut markers = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let (Some(lat), Some(lon)) = (lat_ca.get(i), lon_ca.get(i)) else {
            continue;
        };
        let (Ok(state), Ok(district)) = (states.get(i), districts.get(i)) else {
            continue;
        };
        markers.push(Marker {
            lat,
            lon,
            state: state.to_string().trim_matches('"').to_string(),
            district: district.to_string().trim_matches('"').to_string(),
            total_workers: worker_ca.and_then(|ca| ca.get(i)).unwrap_or(0.0),
        });
    }
    Ok(markers)
}

/// Grid-based clustering: markers whose coordinates fall in the same
/// `cell_deg` x `cell_deg` cell collapse into one cluster at their
/// centroid. A non-positive cell size leaves every marker alone.
pub fn cluster_markers(markers: &[Marker], cell_deg: f64) -> Vec<Cluster> {
    if cell_deg <= 0.0 {
        return markers
            .iter()
            .enumerate()
            .map(|(i, m)| Cluster {
                lat: m.lat,
                lon: m.lon,
                members: vec![i],
            })
            .collect();
    }

    // BTreeMap keys keep the output order stable across frames
    let mut cells: BTreeMap<(i64, i64), Vec<usize>> = BTreeMap::new();
    for (i, marker) in markers.iter().enumerate() {
        let key = (
            (marker.lat / cell_deg).floor() as i64,
            (marker.lon / cell_deg).floor() as i64,
        );
        cells.entry(key).or_default().push(i);
    }

    cells
        .into_values()
        .map(|members| {
            let n = members.len() as f64;
            let lat = members.iter().map(|&i| markers[i].lat).sum::<f64>() / n;
            let lon = members.iter().map(|&i| markers[i].lon).sum::<f64>() / n;
            Cluster { lat, lon, members }
        })
        .collect()
}
