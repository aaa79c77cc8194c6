use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::FracturePlane;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    let Some(workbook) = &state.workbook else {
        ui.label("No workbook loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the closures.
    let areas = workbook.sheet_names();
    let lithologies = state.lithologies.clone();
    let parameters = state.parameters.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Area (sheet) ----
            ui.strong("Area");
            let current_area = state.area.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("area")
                .selected_text(&current_area)
                .show_ui(ui, |ui: &mut Ui| {
                    for area in &areas {
                        if ui.selectable_label(current_area == *area, area).clicked() {
                            state.select_area(area);
                        }
                    }
                });
            ui.add_space(6.0);

            // ---- Lithology ----
            ui.strong("Lithology");
            let current_lith = state.lithology.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("lithology")
                .selected_text(
                    RichText::new(&current_lith).color(state.lithology_colors.color_for(&current_lith)),
                )
                .show_ui(ui, |ui: &mut Ui| {
                    for lith in &lithologies {
                        let text = RichText::new(lith).color(state.lithology_colors.color_for(lith));
                        if ui.selectable_label(current_lith == *lith, text).clicked() {
                            state.select_lithology(lith);
                        }
                    }
                });

            if let Some(Ok(view)) = &state.view {
                let (min, max) = view.depth_range;
                ui.label(format!("Depth: {min:.2} m - {max:.2} m"));
            }
            ui.separator();

            // ---- Distribution parameter ----
            ui.strong("Distribution parameter");
            let current_param = state.parameter.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("parameter")
                .selected_text(&current_param)
                .show_ui(ui, |ui: &mut Ui| {
                    for param in &parameters {
                        if ui.selectable_label(current_param == *param, param).clicked() {
                            state.select_parameter(param);
                        }
                    }
                });
            ui.separator();

            // ---- Target depth ----
            ui.strong("Depth (m)");
            if let Some(Ok(view)) = &state.view {
                let (min, max) = view.depth_range;
                let mut depth = state.target_depth;
                let slider = egui::Slider::new(&mut depth, min..=max).max_decimals(2);
                if ui.add(slider).changed() {
                    state.set_target_depth(depth);
                }
            } else {
                ui.label("No depth range for this selection.");
            }
            ui.separator();

            // ---- Pressure band basis ----
            ui.strong("Pressure band basis");
            let mut plane = state.fracture_plane;
            for option in [FracturePlane::Parallel, FracturePlane::NonParallel] {
                ui.radio_value(&mut plane, option, option.label());
            }
            if plane != state.fracture_plane {
                state.set_fracture_plane(plane);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(filtered) = &state.filtered {
            ui.label(format!(
                "{} / {}: {} rows",
                filtered.area,
                filtered.lithology,
                filtered.len()
            ));
        } else if let Some(ds) = &state.dataset {
            ui.label(format!("{}: {} rows", ds.name, ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open well-log workbook")
        .add_filter("Supported files", &["xlsx", "xlsm", "xls", "ods", "csv", "json", "parquet", "pq"])
        .add_filter("Excel / ODS", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_workbook(&path) {
            Ok(workbook) => state.set_workbook(workbook),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
