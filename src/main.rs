//! Workforce Atlas - Census Workforce Geo-Visualization Dashboard
//!
//! A Rust application for exploring census workforce data by state and
//! district: summary statistics, worker charts, and a clustered map.

mod charts;
mod data;
mod gui;
mod map;
mod stats;

use eframe::egui;
use gui::AtlasApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Workforce Atlas"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Workforce Atlas",
        options,
        Box::new(|cc| Ok(Box::new(AtlasApp::new(cc)))),
    )
}
