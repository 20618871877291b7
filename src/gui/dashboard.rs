//! Dashboard Widget
//! Central scrollable panel: region info, data summary, worker charts,
//! and the clustered district map.

use crate::charts::{ChartPlotter, PALETTE, RURAL_COLOR, URBAN_COLOR};
use crate::data::DashboardData;
use crate::map::MapView;
use crate::stats::ColumnSummary;
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 18.0;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Scrollable dashboard. Holds the derived views for the current
/// selection; empty until a dataset is loaded.
pub struct DashboardView {
    data: Option<DashboardData>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self { data: None }
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the current views (new load in flight or failed render).
    pub fn clear(&mut self) {
        self.data = None;
    }

    /// Replace the views after a selection change.
    pub fn set_data(&mut self, data: DashboardData) {
        self.data = Some(data);
    }

    /// Draw the dashboard sections top to bottom.
    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // ===== Region Information =====
                Self::section_heading(ui, "State and District Information");
                ui.label(format!(
                    "State: {}, District: {}",
                    data.state, data.district
                ));
                ui.label(
                    RichText::new(format!(
                        "{} rows in state, {} rows in district",
                        data.state_row_count, data.district_row_count
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
                ui.add_space(SECTION_SPACING);

                // ===== Data Summary =====
                Self::section_heading(ui, "Data Summary");
                Self::draw_summary_table(ui, &data.summary);
                ui.add_space(SECTION_SPACING);

                // ===== Workers Summary Chart =====
                match &data.worker_summary {
                    Ok(series) => {
                        Self::section_heading(ui, &series.title);
                        ChartPlotter::draw_bar_chart(
                            ui,
                            "worker_summary",
                            series,
                            &PALETTE,
                            "Worker Type",
                            "Count",
                        );
                    }
                    Err(missing) => {
                        ui.label(
                            RichText::new(format!(
                                "Column missing: {missing}. Please check your CSV file."
                            ))
                            .color(ERROR_COLOR),
                        );
                    }
                }
                ui.add_space(SECTION_SPACING);

                // ===== Rural vs Urban Chart =====
                Self::section_heading(ui, &data.rural_urban.title);
                ChartPlotter::draw_bar_chart(
                    ui,
                    "rural_urban",
                    &data.rural_urban,
                    &[RURAL_COLOR, URBAN_COLOR],
                    "Area",
                    "Count",
                );
                ui.add_space(SECTION_SPACING);

                // ===== District Map =====
                Self::section_heading(ui, "District Map");
                MapView::show(ui, &data.markers);
                ui.add_space(SECTION_SPACING);
            });
    }

    fn section_heading(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(16.0).strong());
        ui.add_space(6.0);
    }

    /// Draw the describe() grid, one row per numeric column.
    fn draw_summary_table(ui: &mut egui::Ui, summaries: &[ColumnSummary]) {
        if summaries.is_empty() {
            ui.label(RichText::new("No numeric columns").color(Color32::GRAY));
            return;
        }

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::horizontal().id_salt("summary").show(ui, |ui| {
                    egui::Grid::new("summary_table")
                        .striped(true)
                        .min_col_width(55.0)
                        .spacing([8.0, 4.0])
                        .show(ui, |ui| {
                            for header in
                                ["Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"]
                            {
                                ui.label(RichText::new(header).strong().size(11.0));
                            }
                            ui.end_row();

                            for s in summaries {
                                ui.label(RichText::new(&s.column).size(11.0));
                                ui.label(RichText::new(s.count.to_string()).size(11.0));
                                for value in [s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max] {
                                    ui.label(RichText::new(format!("{value:.3}")).size(11.0));
                                }
                                ui.end_row();
                            }
                        });
                });
            });
    }
}
