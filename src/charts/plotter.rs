//! Chart Plotter Module
//! Bar charts for the worker summaries using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Plot};

/// Color palette for bar series
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Rural/urban bar colors
pub const RURAL_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
pub const URBAN_COLOR: Color32 = Color32::from_rgb(255, 127, 14);

const CHART_HEIGHT: f32 = 300.0;

/// One bar chart: labeled bar values under a title.
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub title: String,
    pub bars: Vec<(String, f64)>,
}

/// Creates dashboard bar charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a bar chart with one colored, legend-named series per bar.
    pub fn draw_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        series: &BarSeries,
        colors: &[Color32],
        x_label: &str,
        y_label: &str,
    ) {
        let x_labels: Vec<String> = series.bars.iter().map(|(label, _)| label.clone()).collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(x_label.to_string())
            .y_axis_label(y_label.to_string())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if mark.value >= -0.25
                    && (mark.value - mark.value.round()).abs() < 0.25
                    && idx < x_labels.len()
                {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, (label, value)) in series.bars.iter().enumerate() {
                    let color = colors[i % colors.len()];
                    let bar = Bar::new(i as f64, *value).width(0.6);
                    plot_ui.bar_chart(BarChart::new(vec![bar]).color(color).name(label));
                }
            });
    }
}
