//! Control Panel Widget
//! Left side panel with the data source and region selection controls.

use egui::{Color32, ComboBox, RichText, ScrollArea};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User selections, persisted across runs. UI state only — never data.
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub state: String,
    pub district: String,
    pub show_columns: bool,
}

/// Left side control panel with file selection and region controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub states: Vec<String>,
    pub districts: Vec<String>,
    pub columns: Vec<String>,
    pub progress: f32,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            states: Vec::new(),
            districts: Vec::new(),
            columns: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update available columns after a CSV load
    pub fn update_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
    }

    /// Update the state options; the selection falls back to the first
    /// option when the previous one is no longer offered.
    pub fn update_states(&mut self, states: Vec<String>) {
        if !states.contains(&self.settings.state) {
            self.settings.state = states.first().cloned().unwrap_or_default();
        }
        self.states = states;
    }

    /// Update the district options for the selected state.
    pub fn update_districts(&mut self, districts: Vec<String>) {
        if !districts.contains(&self.settings.district) {
            self.settings.district = districts.first().cloned().unwrap_or_default();
        }
        self.districts = districts;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🗺 Workforce Atlas")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Census Geo-Visualization")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Region Selection Section =====
        ui.label(RichText::new("📍 Region").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 90.0;
        let combo_width = 170.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select State:"));
            ComboBox::from_id_salt("state")
                .width(combo_width)
                .selected_text(&self.settings.state)
                .show_ui(ui, |ui| {
                    for state in &self.states {
                        if ui
                            .selectable_label(self.settings.state == *state, state)
                            .clicked()
                        {
                            self.settings.state = state.clone();
                            action = ControlPanelAction::StateChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select District:"));
            ComboBox::from_id_salt("district")
                .width(combo_width)
                .selected_text(&self.settings.district)
                .show_ui(ui, |ui| {
                    for district in &self.districts {
                        if ui
                            .selectable_label(self.settings.district == *district, district)
                            .clicked()
                        {
                            self.settings.district = district.clone();
                            action = ControlPanelAction::DistrictChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Debug Section =====
        ui.checkbox(&mut self.settings.show_columns, "Show Data Columns");

        if self.settings.show_columns {
            ui.add_space(5.0);
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("columns")
                        .max_height(120.0)
                        .show(ui, |ui| {
                            for col in &self.columns {
                                ui.label(RichText::new(col).size(11.0));
                            }
                        });
                });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    StateChanged,
    DistrictChanged,
}
