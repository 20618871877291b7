//! Workforce Atlas Main Application
//! Main window wiring the control panel to the dashboard.

use crate::data::{DashboardData, Dataset, RegionFilter};
use crate::gui::{ControlPanel, ControlPanelAction, DashboardView};
use anyhow::Context;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info};

/// Data file looked up in the working directory at startup.
const DEFAULT_CSV: &str = "final_HR.csv";

/// CSV loading result from background thread
enum LoadResult {
    Complete(Dataset),
    Error(String),
}

/// Main application window.
pub struct AtlasApp {
    dataset: Option<Dataset>,
    control_panel: ControlPanel,
    dashboard: DashboardView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl AtlasApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut control_panel = ControlPanel::new();
        control_panel.settings = settings;

        let mut app = Self {
            dataset: None,
            control_panel,
            dashboard: DashboardView::new(),
            load_rx: None,
            is_loading: false,
        };

        // Load the remembered file, or a default drop-in next to the binary
        let startup_path = app
            .control_panel
            .settings
            .csv_path
            .clone()
            .filter(|p| p.exists())
            .or_else(|| {
                let p = PathBuf::from(DEFAULT_CSV);
                p.exists().then_some(p)
            });
        if let Some(path) = startup_path {
            app.start_load(path);
        }

        app
    }

    /// Handle CSV file selection via the file picker.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Load a CSV in a background thread; results arrive over the channel.
    fn start_load(&mut self, path: PathBuf) {
        self.dashboard.clear();
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_progress(0.0, "Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        info!(path = %path.display(), "loading dataset");
        thread::spawn(move || {
            let result = match Dataset::load(&path) {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete(dataset) => {
                        info!(rows = dataset.row_count(), "dataset loaded");
                        self.control_panel.set_progress(
                            100.0,
                            &format!(
                                "Loaded {} rows, {} columns",
                                dataset.row_count(),
                                dataset.columns().len()
                            ),
                        );
                        self.control_panel.update_columns(dataset.columns());
                        self.dataset = Some(dataset);
                        self.is_loading = false;
                        should_keep_receiver = false;

                        self.refresh_selections();
                        self.rebuild_views();
                    }
                    LoadResult::Error(e) => {
                        error!(error = %e, "dataset load failed");
                        self.control_panel.set_progress(0.0, &format!("Error: {e}"));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Re-derive both dropdown option sets from the loaded table.
    fn refresh_selections(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let states = RegionFilter::unique_states(dataset.frame());
        self.control_panel.update_states(states);

        let districts =
            RegionFilter::districts_for_state(dataset.frame(), &self.control_panel.settings.state);
        self.control_panel.update_districts(districts);
    }

    /// Handle a state change: new district options, then new views.
    fn handle_state_changed(&mut self) {
        if let Some(dataset) = &self.dataset {
            let districts = RegionFilter::districts_for_state(
                dataset.frame(),
                &self.control_panel.settings.state,
            );
            self.control_panel.update_districts(districts);
        }
        self.rebuild_views();
    }

    /// Recompute the derived views for the current selection.
    fn rebuild_views(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let settings = &self.control_panel.settings;
        let result = DashboardData::build(dataset.frame(), &settings.state, &settings.district)
            .context("deriving dashboard views");

        match result {
            Ok(data) => self.dashboard.set_data(data),
            Err(e) => {
                // Terminate this render only: empty dashboard, error in status
                error!(error = %e, "view derivation failed");
                self.dashboard.clear();
                self.control_panel.set_progress(0.0, &format!("Error: {e:#}"));
            }
        }
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::StateChanged => self.handle_state_changed(),
                        ControlPanelAction::DistrictChanged => self.rebuild_views(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.control_panel.settings);
    }
}
