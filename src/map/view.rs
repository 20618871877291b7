//! Map View Module
//! Draws the clustered district map on an egui_plot canvas.

use crate::data::{LAT_RANGE, LON_RANGE};
use crate::map::{cluster_markers, Marker};
use egui::{Color32, RichText};
use egui_plot::{Plot, PlotPoint, PlotPoints, Points, Text};

const MARKER_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
const CLUSTER_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange

const MAP_HEIGHT: f32 = 420.0;
/// Cells across the visible span; markers sharing a cell cluster together.
const CLUSTER_GRID: f64 = 12.0;
/// Hover radius in degrees for the marker popup.
const HOVER_RADIUS_DEG: f64 = 0.8;

/// Clustered marker map. Clustering is re-derived from the visible
/// bounds each frame, so zooming in expands clusters.
pub struct MapView;

impl MapView {
    pub fn show(ui: &mut egui::Ui, markers: &[Marker]) {
        if markers.is_empty() {
            ui.label(RichText::new("No markers for this selection").color(Color32::GRAY));
            return;
        }

        let hover_markers: Vec<Marker> = markers.to_vec();
        let markers = markers.to_vec();

        Plot::new("district_map")
            .height(MAP_HEIGHT)
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .include_x(LON_RANGE.0)
            .include_x(LON_RANGE.1)
            .include_y(LAT_RANGE.0)
            .include_y(LAT_RANGE.1)
            .allow_scroll(false)
            .label_formatter(move |_name, value| {
                Self::nearest_label(&hover_markers, value.x, value.y)
                    .unwrap_or_else(|| format!("{:.2}, {:.2}", value.y, value.x))
            })
            .show(ui, |plot_ui| {
                let bounds = plot_ui.plot_bounds();
                let cell_deg = bounds.width() / CLUSTER_GRID;
                let clusters = cluster_markers(&markers, cell_deg);

                // Lone markers first, as one series
                let singles: Vec<[f64; 2]> = clusters
                    .iter()
                    .filter(|c| c.len() == 1)
                    .map(|c| [c.lon, c.lat])
                    .collect();
                if !singles.is_empty() {
                    plot_ui.points(
                        Points::new(PlotPoints::from(singles))
                            .radius(4.0)
                            .color(MARKER_COLOR)
                            .name("District"),
                    );
                }

                // Clusters as a count badge at the centroid
                for cluster in clusters.iter().filter(|c| c.len() > 1) {
                    let radius = (6.0 + (cluster.len() as f32).sqrt() * 2.0).min(14.0);
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[cluster.lon, cluster.lat]]))
                            .radius(radius)
                            .color(CLUSTER_COLOR),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(cluster.lon, cluster.lat),
                        RichText::new(cluster.len().to_string())
                            .size(11.0)
                            .strong()
                            .color(Color32::BLACK),
                    ));
                }
            });
    }

    /// Popup text for the marker nearest to the pointer, if close enough.
    fn nearest_label(markers: &[Marker], lon: f64, lat: f64) -> Option<String> {
        markers
            .iter()
            .map(|m| {
                let d2 = (m.lon - lon).powi(2) + (m.lat - lat).powi(2);
                (d2, m)
            })
            .filter(|(d2, _)| *d2 <= HOVER_RADIUS_DEG * HOVER_RADIUS_DEG)
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, m)| m.label())
    }
}
