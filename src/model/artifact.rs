use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::predictor::{ModelArtifact, ModelValidationError, Predictor};

// ---------------------------------------------------------------------------
// Artifact directory
// ---------------------------------------------------------------------------

/// Recognized artifact extension (lower-cased comparison).
pub const MODEL_EXTENSION: &str = "json";

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_MODELS_DIR: &str = "models";

/// Listing or loading a model artifact failed.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("models directory not found: {0}")]
    MissingDir(PathBuf),
    #[error("reading models directory {dir}: {source}")]
    ReadDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("reading model file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing model file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid model in {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: ModelValidationError,
    },
}

/// List artifact filenames in `dir`, sorted, filtered to the recognized
/// extension. The directory is read fresh on every call; callers treat it
/// as a pure external source, never cached state.
pub fn list_artifacts(dir: &Path) -> Result<Vec<String>, ArtifactError> {
    if !dir.exists() {
        return Err(ArtifactError::MissingDir(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| ArtifactError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if !path.is_file() {
                return None;
            }
            let ext = path.extension()?.to_str()?;
            if !ext.eq_ignore_ascii_case(MODEL_EXTENSION) {
                return None;
            }
            path.file_name()?.to_str().map(str::to_owned)
        })
        .collect();

    names.sort();
    Ok(names)
}

/// Open and deserialize one artifact into an opaque predictor. Structural
/// validation happens here so a malformed file is rejected at load time
/// rather than mid-prediction.
pub fn load_artifact(dir: &Path, name: &str) -> Result<Box<dyn Predictor>, ArtifactError> {
    let path = dir.join(name);

    let text = fs::read_to_string(&path).map_err(|source| ArtifactError::ReadFile {
        path: path.clone(),
        source,
    })?;

    let artifact: ModelArtifact =
        serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
            path: path.clone(),
            source,
        })?;

    artifact
        .into_predictor()
        .map_err(|source| ArtifactError::Invalid { path, source })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::Table;
    use approx::assert_relative_eq;

    const LINEAR_JSON: &str = r#"{
        "kind": "linear",
        "features": ["alcohol"],
        "weights": [0.5],
        "intercept": 4.0
    }"#;

    #[test]
    fn lists_only_recognized_extensions_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rf.json"), LINEAR_JSON).unwrap();
        fs::write(dir.path().join("gbm.json"), LINEAR_JSON).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a model").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names = list_artifacts(dir.path()).unwrap();
        assert_eq!(names, vec!["gbm.json", "rf.json"]);
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_artifacts(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("absent");
        assert!(matches!(
            list_artifacts(&gone),
            Err(ArtifactError::MissingDir(_))
        ));
    }

    #[test]
    fn loads_a_linear_artifact() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lin.json"), LINEAR_JSON).unwrap();

        let predictor = load_artifact(dir.path(), "lin.json").unwrap();
        let t = Table::single_row([("alcohol", 10.0)]);
        assert_relative_eq!(predictor.predict(&t).unwrap()[0], 9.0);
    }

    #[test]
    fn corrupt_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        assert!(matches!(
            load_artifact(dir.path(), "bad.json"),
            Err(ArtifactError::Parse { .. })
        ));
    }

    #[test]
    fn structurally_invalid_model_is_rejected_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{
            "kind": "linear",
            "features": ["a", "b"],
            "weights": [1.0],
            "intercept": 0.0
        }"#;
        fs::write(dir.path().join("short.json"), json).unwrap();

        assert!(matches!(
            load_artifact(dir.path(), "short.json"),
            Err(ArtifactError::Invalid { .. })
        ));
    }
}
