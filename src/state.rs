use std::path::PathBuf;

use crate::data::features::{self, FEATURE_FIELDS, LABEL_COLUMN, PREDICTION_COLUMN};
use crate::data::table::{Column, Table};
use crate::model::artifact::{self, DEFAULT_MODELS_DIR};
use crate::model::predictor::Predictor;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Inference,
    About,
}

/// The currently loaded predictor, tagged with its filename so a selection
/// change can be detected.
pub struct LoadedModel {
    pub name: String,
    pub predictor: Box<dyn Predictor>,
}

/// An opened CSV file, kept verbatim for preview and for the saved output.
pub struct UploadedFile {
    pub name: String,
    pub table: Table,
}

/// The full UI state, independent of rendering. Every frame re-renders the
/// page from this state; widgets only mutate it through the methods below.
pub struct AppState {
    pub page: Page,

    /// Artifact directory, re-listed every frame.
    pub models_dir: PathBuf,

    /// Filename of the artifact picked in the selector.
    pub selected_artifact: Option<String>,

    /// Predictor for `selected_artifact` (None until a load succeeds).
    pub loaded: Option<LoadedModel>,

    /// Opened batch file (None until the user opens one).
    pub upload: Option<UploadedFile>,

    /// Upload table plus the appended prediction column, ready to save.
    pub batch_output: Option<Table>,

    /// Manual form values, aligned with `FEATURE_FIELDS`.
    pub manual_values: Vec<f64>,

    /// Last manual-path score.
    pub manual_score: Option<f64>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: Page::Inference,
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            selected_artifact: None,
            loaded: None,
            upload: None,
            batch_output: None,
            manual_values: features::default_values(),
            manual_score: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Reconcile the selection with a fresh directory listing: a vanished
    /// file clears the loaded model, and with nothing selected the first
    /// listed artifact is picked, as a single-select box does.
    pub fn sync_selection(&mut self, names: &[String]) {
        if let Some(sel) = &self.selected_artifact {
            if !names.iter().any(|n| n == sel) {
                self.selected_artifact = None;
                self.loaded = None;
                self.batch_output = None;
            }
        }
        if self.selected_artifact.is_none() {
            if let Some(first) = names.first() {
                self.select_artifact(first.clone());
            }
        }
    }

    /// Select an artifact and (re)load it from disk. A no-op when the same
    /// file is already loaded; everything else re-deserializes.
    pub fn select_artifact(&mut self, name: String) {
        if self.selected_artifact.as_deref() == Some(name.as_str())
            && self.loaded.as_ref().is_some_and(|m| m.name == name)
        {
            return;
        }

        self.selected_artifact = Some(name.clone());
        match artifact::load_artifact(&self.models_dir, &name) {
            Ok(predictor) => {
                log::info!("Loaded model '{name}'");
                self.loaded = Some(LoadedModel { name, predictor });
                self.status_message = None;
                self.run_batch();
            }
            Err(e) => {
                log::error!("Failed to load model '{name}': {e}");
                self.status_message = Some(format!("Error loading model: {e}"));
                self.loaded = None;
                self.batch_output = None;
            }
        }
    }

    /// Ingest a newly opened CSV and run batch prediction against the
    /// current model.
    pub fn set_upload(&mut self, name: String, table: Table) {
        log::info!("Opened '{name}' ({} rows)", table.n_rows());
        self.upload = Some(UploadedFile { name, table });
        self.status_message = None;
        self.run_batch();
    }

    /// Recompute the batch output for the current (model, upload) pair.
    /// The label column, if present, is excluded from the feature set; the
    /// output is the verbatim upload plus one appended prediction column.
    pub fn run_batch(&mut self) {
        self.batch_output = None;
        let (Some(model), Some(upload)) = (&self.loaded, &self.upload) else {
            return;
        };

        let feature_set = upload.table.without_column(LABEL_COLUMN);
        match model.predictor.predict(&feature_set) {
            Ok(predictions) => {
                let mut augmented = upload.table.clone();
                match augmented.push_column(Column::new(PREDICTION_COLUMN, predictions)) {
                    Ok(()) => self.batch_output = Some(augmented),
                    Err(e) => {
                        self.status_message = Some(format!("Error processing file: {e}"));
                    }
                }
            }
            Err(e) => {
                log::error!("Batch prediction failed: {e}");
                self.status_message = Some(format!("Error processing file: {e}"));
            }
        }
    }

    /// Assemble the one-row manual table (eleven named columns in declared
    /// order) and predict.
    pub fn predict_manual(&mut self) {
        let Some(model) = &self.loaded else {
            self.status_message = Some("Select a model first".to_string());
            return;
        };

        let row = Table::single_row(
            FEATURE_FIELDS
                .iter()
                .zip(self.manual_values.iter())
                .map(|(f, &v)| (f.column, v)),
        );

        match model.predictor.predict(&row) {
            Ok(predictions) => {
                self.manual_score = predictions.first().copied();
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Manual prediction failed: {e}");
                self.manual_score = None;
                self.status_message = Some(format!("Prediction failed: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
