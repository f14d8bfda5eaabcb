/// Model layer: the artifact directory and the predictor seam.
///
/// Artifacts are JSON files in the models directory, each deserializing to
/// one of the supported regressor kinds. The UI only ever sees
/// `Box<dyn Predictor>`.

pub mod artifact;
pub mod predictor;
