use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::plot;
use crate::analysis::report::ResultTable;
use crate::state::{AppState, BandView, DepthView};

// ---------------------------------------------------------------------------
// Central panel – result tables
// ---------------------------------------------------------------------------

/// Render every result for the current selection.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a workbook to start  (File → Open…)");
        });
        return;
    };
    let view = match view {
        Ok(view) => view,
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Mean values for the selected lithology");
            result_table(ui, "means", &view.means);
            ui.add_space(12.0);

            ui.heading("Parameter distribution");
            plot::distribution_plot(ui, state, view);
            ui.add_space(12.0);

            match &view.depth {
                DepthView::NoData => {
                    ui.heading("Values at depth");
                    ui.label("No data for this depth.");
                }
                DepthView::Failed(e) => {
                    ui.heading("Values at depth");
                    ui.label(RichText::new(e.to_string()).color(Color32::RED));
                }
                DepthView::Row {
                    was_interpolated,
                    row,
                    summary,
                    band,
                } => {
                    if *was_interpolated {
                        ui.heading("Interpolated data for the selected depth");
                    } else {
                        ui.heading("Original data for the selected depth");
                    }
                    result_table(ui, "row", row);
                    ui.add_space(12.0);

                    ui.heading("Summary of key parameters");
                    if summary.is_empty() {
                        ui.label("None of the summary columns are present.");
                    } else {
                        result_table(ui, "summary", summary);
                    }
                    ui.add_space(12.0);

                    ui.heading("Safe injection pressure range");
                    match band {
                        BandView::Table { table, ordered } => {
                            result_table(ui, "band", table);
                            if !ordered {
                                ui.label(
                                    RichText::new("Minimum exceeds maximum: reopening pressure is above the fracture limit.")
                                        .color(Color32::YELLOW),
                                );
                            }
                        }
                        BandView::Unavailable(e) => {
                            ui.label(RichText::new(e.to_string()).color(Color32::RED));
                        }
                    }
                }
            }
        });
}

fn result_table(ui: &mut Ui, id: &str, table: &ResultTable) {
    ui.push_id(id, |ui: &mut Ui| {
        egui::ScrollArea::horizontal()
            .id_salt(id)
            .show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(false)
                    .columns(Column::auto().at_least(70.0), table.columns.len())
                    .header(22.0, |mut header| {
                        for col in &table.columns {
                            header.col(|ui| {
                                ui.strong(col);
                            });
                        }
                    })
                    .body(|mut body| {
                        for row in &table.rows {
                            body.row(20.0, |mut r| {
                                for cell in row {
                                    r.col(|ui| {
                                        ui.label(cell);
                                    });
                                }
                            });
                        }
                    });
            });
    });
}
