use eframe::egui::{self, Color32, DragValue, RichText, Ui};
use egui_extras::{Column as GridColumn, TableBuilder};

use crate::data::features::FEATURE_FIELDS;
use crate::data::loader;
use crate::data::table::Table;
use crate::model::artifact::{self, ArtifactError};
use crate::state::AppState;

/// How many rows of an opened file to show in the preview grid.
const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Inference page
// ---------------------------------------------------------------------------

/// Render the prediction page: artifact selector on top, batch and manual
/// input side by side below it.
pub fn inference_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Wine quality prediction");
    ui.label("Open a CSV file or enter the measurements manually to get a score.");
    ui.add_space(8.0);

    // ---- Artifact selector ----
    // The directory is listed fresh every frame; it is an external source,
    // not cached state.
    let names = match artifact::list_artifacts(&state.models_dir) {
        Ok(names) => names,
        Err(e @ ArtifactError::MissingDir(_)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
        Err(e) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
            return;
        }
    };

    if names.is_empty() {
        ui.label(
            RichText::new(format!(
                "No models (.{} files) in {}",
                artifact::MODEL_EXTENSION,
                state.models_dir.display()
            ))
            .color(Color32::YELLOW),
        );
        return;
    }

    state.sync_selection(&names);

    let current = state.selected_artifact.clone().unwrap_or_default();
    egui::ComboBox::from_label("Model")
        .selected_text(current.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for name in &names {
                if ui
                    .selectable_label(current == *name, name.as_str())
                    .clicked()
                {
                    state.select_artifact(name.clone());
                }
            }
        });

    ui.separator();

    // ---- Two input paths ----
    ui.columns(2, |cols: &mut [Ui]| {
        batch_column(&mut cols[0], state);
        manual_column(&mut cols[1], state);
    });
}

// ---------------------------------------------------------------------------
// Batch path (left column)
// ---------------------------------------------------------------------------

fn batch_column(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Predict from a CSV file");
    ui.add_space(4.0);

    if ui.button("Open CSV…").clicked() {
        open_csv_dialog(state);
    }

    if let Some(upload) = &state.upload {
        ui.add_space(4.0);
        ui.label(format!(
            "'{}' loaded ({} rows)",
            upload.name,
            upload.table.n_rows()
        ));
        ui.add_space(4.0);
        preview_grid(ui, &upload.table);
    }

    let mut save_requested = false;
    if let Some(output) = &state.batch_output {
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!("{} predictions ready", output.n_rows()))
                .color(Color32::DARK_GREEN),
        );
        if ui.button("Save predictions…").clicked() {
            save_requested = true;
        }
    }
    if save_requested {
        save_predictions_dialog(state);
    }
}

/// First rows of the opened file, rendered as a grid.
fn preview_grid(ui: &mut Ui, table: &Table) {
    let n_rows = table.n_rows().min(PREVIEW_ROWS);
    let names: Vec<String> = table.column_names().map(str::to_owned).collect();

    TableBuilder::new(ui)
        .striped(true)
        .columns(GridColumn::auto().resizable(true), names.len())
        .header(18.0, |mut header| {
            for name in &names {
                header.col(|ui: &mut Ui| {
                    ui.strong(name.as_str());
                });
            }
        })
        .body(|mut body| {
            for row in 0..n_rows {
                let cells = table.row_cells(row);
                body.row(16.0, |mut grid_row| {
                    for cell in &cells {
                        grid_row.col(|ui: &mut Ui| {
                            ui.label(cell.as_str());
                        });
                    }
                });
            }
        });

    if table.n_rows() > n_rows {
        ui.small(format!("… and {} more rows", table.n_rows() - n_rows));
    }
}

// ---------------------------------------------------------------------------
// Manual path (right column)
// ---------------------------------------------------------------------------

fn manual_column(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Enter measurements manually");
    ui.add_space(4.0);

    for (field, value) in FEATURE_FIELDS.iter().zip(state.manual_values.iter_mut()) {
        ui.horizontal(|ui: &mut Ui| {
            ui.add(
                DragValue::new(value)
                    .range(field.min..=field.max)
                    .speed((field.max - field.min) / 200.0)
                    .min_decimals(2)
                    .max_decimals(3),
            );
            ui.label(field.label);
        });
    }

    ui.add_space(6.0);
    if ui.button("Predict quality").clicked() {
        state.predict_manual();
    }

    if let Some(score) = state.manual_score {
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("Predicted wine quality: {score:.2} points"))
                .color(Color32::DARK_GREEN)
                .strong(),
        );
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open wine measurements")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::read_csv(&path) {
            Ok(table) => {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("upload.csv")
                    .to_string();
                state.set_upload(name, table);
            }
            Err(e) => {
                log::error!("Failed to read CSV: {e:#}");
                state.status_message = Some(format!("Error processing file: {e:#}"));
            }
        }
    }
}

fn save_predictions_dialog(state: &mut AppState) {
    let Some(output) = state.batch_output.clone() else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Save predictions")
        .set_file_name("predictions.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match loader::write_csv(&path, &output) {
            Ok(()) => {
                log::info!("Saved {} predictions to {}", output.n_rows(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to save predictions: {e:#}");
                state.status_message = Some(format!("Error saving file: {e:#}"));
            }
        }
    }
}
