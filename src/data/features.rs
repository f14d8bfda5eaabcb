// ---------------------------------------------------------------------------
// Wine-chemistry input fields
// ---------------------------------------------------------------------------

/// Column name of the target label in uploaded files.
pub const LABEL_COLUMN: &str = "quality";

/// Column name appended to batch output.
pub const PREDICTION_COLUMN: &str = "predicted_quality";

/// One manual-entry field: the column name the models were trained on, a
/// human-readable label, and the allowed range with its default.
#[derive(Debug, Clone, Copy)]
pub struct FeatureField {
    pub column: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// The eleven manual-entry fields, in the exact column order the shipped
/// models expect. The mixed space/underscore naming is what the models were
/// trained against, so it must not be normalized.
pub const FEATURE_FIELDS: [FeatureField; 11] = [
    FeatureField {
        column: "fixed acidity",
        label: "Fixed acidity",
        min: 4.8,
        max: 9.6,
        default: 7.9,
    },
    FeatureField {
        column: "volatile acidity",
        label: "Volatile acidity",
        min: 0.1,
        max: 0.65,
        default: 0.6,
    },
    FeatureField {
        column: "citric acid",
        label: "Citric acid",
        min: 0.06,
        max: 0.57,
        default: 0.06,
    },
    FeatureField {
        column: "residual sugar",
        label: "Residual sugar (g/L)",
        min: 1.0,
        max: 17.2,
        default: 1.6,
    },
    FeatureField {
        column: "chlorides",
        label: "Chlorides",
        min: 0.01,
        max: 0.8,
        default: 0.7,
    },
    FeatureField {
        column: "free_sulfur_dioxide",
        label: "Free SO₂ (mg/L)",
        min: 2.0,
        max: 77.0,
        default: 15.0,
    },
    FeatureField {
        column: "total_sulfur_dioxide",
        label: "Total SO₂ (mg/L)",
        min: 6.0,
        max: 251.0,
        default: 59.0,
    },
    FeatureField {
        column: "density",
        label: "Density",
        min: 0.98,
        max: 1.0,
        default: 0.99,
    },
    FeatureField {
        column: "pH",
        label: "pH",
        min: 2.8,
        max: 3.6,
        default: 3.3,
    },
    FeatureField {
        column: "sulphates",
        label: "Sulphates",
        min: 0.22,
        max: 0.82,
        default: 0.46,
    },
    FeatureField {
        column: "alcohol",
        label: "Alcohol (% vol)",
        min: 8.4,
        max: 14.0,
        default: 9.4,
    },
];

/// Default value for every field, in declared order.
pub fn default_values() -> Vec<f64> {
    FEATURE_FIELDS.iter().map(|f| f.default).collect()
}
