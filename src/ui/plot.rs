use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::state::{AnalysisView, AppState};

// ---------------------------------------------------------------------------
// Parameter distribution (histogram + KDE)
// ---------------------------------------------------------------------------

/// Render the distribution of the selected parameter.
pub fn distribution_plot(ui: &mut Ui, state: &AppState, view: &AnalysisView) {
    let Some(param) = view.parameter.as_deref() else {
        ui.label("No numeric columns in this sheet.");
        return;
    };
    if view.histogram.is_empty() {
        ui.label(format!("No values for {param}."));
        return;
    }

    let color = state
        .lithology
        .as_deref()
        .map(|l| state.lithology_colors.color_for(l))
        .unwrap_or(Color32::LIGHT_BLUE);

    let bars: Vec<Bar> = view
        .histogram
        .iter()
        .map(|b| Bar::new(b.center(), b.count as f64).width(b.width()))
        .collect();
    let chart = BarChart::new(bars).color(color).name(param);

    Plot::new("distribution_plot")
        .height(260.0)
        .legend(egui_plot::Legend::default())
        .x_axis_label(param)
        .y_axis_label("Count")
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            if !view.kde.is_empty() {
                let kde = Line::new(PlotPoints::from(view.kde.clone()))
                    .name("KDE")
                    .color(Color32::WHITE)
                    .width(1.5);
                plot_ui.line(kde);
            }
        });
}
