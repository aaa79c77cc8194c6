mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::WellLogApp;
use config::AnalysisConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AnalysisConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Well-Log Viewer – Geomechanics by Lithology",
        options,
        Box::new(|_cc| Ok(Box::new(WellLogApp::new(config)))),
    )
}
