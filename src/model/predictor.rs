use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::table::Table;

// ---------------------------------------------------------------------------
// Predictor – the one capability the UI relies on
// ---------------------------------------------------------------------------

/// A trained regressor. The UI treats the loaded artifact as opaque: the
/// only contract is one prediction per input row.
pub trait Predictor {
    /// Predict one value per row of `table`. Columns are matched by name,
    /// so extra columns in the input are ignored.
    fn predict(&self, table: &Table) -> Result<Vec<f64>, PredictError>;
}

/// Inference failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    #[error("input is missing column '{0}'")]
    MissingColumn(String),
}

/// Gather the model's feature columns from the table, in model order.
fn feature_columns<'a>(
    features: &[String],
    table: &'a Table,
) -> Result<Vec<&'a [f64]>, PredictError> {
    features
        .iter()
        .map(|name| {
            table
                .column(name)
                .map(|c| c.values.as_slice())
                .ok_or_else(|| PredictError::MissingColumn(name.clone()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Linear regressor
// ---------------------------------------------------------------------------

/// Ordinary linear regression: `intercept + Σ weightᵢ · xᵢ`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    /// Feature column names, aligned with `weights`.
    pub features: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Check structural consistency after deserialization.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.features.len() != self.weights.len() {
            return Err(ModelValidationError::WeightLenMismatch {
                n_features: self.features.len(),
                n_weights: self.weights.len(),
            });
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, table: &Table) -> Result<Vec<f64>, PredictError> {
        let cols = feature_columns(&self.features, table)?;
        let n_rows = table.n_rows();

        let mut out = vec![self.intercept; n_rows];
        for (col, &w) in cols.iter().zip(self.weights.iter()) {
            for (acc, &x) in out.iter_mut().zip(col.iter()) {
                *acc += w * x;
            }
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tree-ensemble regressor
// ---------------------------------------------------------------------------

/// One node of a decision tree, stored flat; child fields index into the
/// owning tree's node vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Branch {
        /// Index into the model's `features` list.
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk from the root to a leaf for one row of feature values.
    /// `row` is indexed by the model's feature order.
    fn eval(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        // Bounded by node count; validation rejects cycles and bad indices.
        for _ in 0..self.nodes.len() {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Branch {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
        // Unreachable for validated trees; a malformed walk scores zero.
        0.0
    }
}

/// Additive ensemble of regression trees: `base_score + Σ treeⱼ(row)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsembleModel {
    pub features: Vec<String>,
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl TreeEnsembleModel {
    /// Check structural consistency after deserialization: every branch
    /// must reference an existing feature and strictly-forward children
    /// (which also rules out cycles).
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelValidationError::EmptyTree { tree_idx });
            }
            for (node_idx, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Branch {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.features.len() {
                        return Err(ModelValidationError::FeatureOutOfRange {
                            tree_idx,
                            node_idx,
                            feature: *feature,
                            n_features: self.features.len(),
                        });
                    }
                    for &child in [left, right] {
                        if child >= tree.nodes.len() || child <= node_idx {
                            return Err(ModelValidationError::BadChildIndex {
                                tree_idx,
                                node_idx,
                                child,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Predictor for TreeEnsembleModel {
    fn predict(&self, table: &Table) -> Result<Vec<f64>, PredictError> {
        let cols = feature_columns(&self.features, table)?;
        let n_rows = table.n_rows();

        let mut out = Vec::with_capacity(n_rows);
        let mut row = vec![0.0; self.features.len()];
        for r in 0..n_rows {
            for (slot, col) in row.iter_mut().zip(cols.iter()) {
                *slot = col[r];
            }
            let score: f64 = self.trees.iter().map(|t| t.eval(&row)).sum();
            out.push(self.base_score + score);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Serialized artifact envelope
// ---------------------------------------------------------------------------

/// The on-disk artifact: a tagged union of the supported predictor kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsembleModel),
}

impl ModelArtifact {
    /// Validate and erase the concrete kind behind the [`Predictor`] seam.
    pub fn into_predictor(self) -> Result<Box<dyn Predictor>, ModelValidationError> {
        match self {
            ModelArtifact::Linear(m) => {
                m.validate()?;
                Ok(Box::new(m))
            }
            ModelArtifact::TreeEnsemble(m) => {
                m.validate()?;
                Ok(Box::new(m))
            }
        }
    }
}

/// Structural problems in a deserialized artifact.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelValidationError {
    #[error("{n_features} features but {n_weights} weights")]
    WeightLenMismatch { n_features: usize, n_weights: usize },
    #[error("tree {tree_idx} has no nodes")]
    EmptyTree { tree_idx: usize },
    #[error("tree {tree_idx}, node {node_idx}: feature {feature} out of range ({n_features} features)")]
    FeatureOutOfRange {
        tree_idx: usize,
        node_idx: usize,
        feature: usize,
        n_features: usize,
    },
    #[error("tree {tree_idx}, node {node_idx}: child index {child} invalid")]
    BadChildIndex {
        tree_idx: usize,
        node_idx: usize,
        child: usize,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{Column, Table};
    use approx::assert_relative_eq;

    fn linear() -> LinearModel {
        LinearModel {
            features: vec!["alcohol".into(), "pH".into()],
            weights: vec![0.5, -1.0],
            intercept: 3.0,
        }
    }

    #[test]
    fn linear_predicts_per_row() {
        let mut t = Table::new();
        t.push_column(Column::new("alcohol", vec![10.0, 12.0])).unwrap();
        t.push_column(Column::new("pH", vec![3.0, 3.5])).unwrap();

        let preds = linear().predict(&t).unwrap();
        assert_eq!(preds.len(), 2);
        assert_relative_eq!(preds[0], 3.0 + 5.0 - 3.0);
        assert_relative_eq!(preds[1], 3.0 + 6.0 - 3.5);
    }

    #[test]
    fn columns_matched_by_name_not_position() {
        // Same data, columns in the opposite order plus an extra one.
        let mut t = Table::new();
        t.push_column(Column::new("pH", vec![3.0])).unwrap();
        t.push_column(Column::new("quality", vec![6.0])).unwrap();
        t.push_column(Column::new("alcohol", vec![10.0])).unwrap();

        let preds = linear().predict(&t).unwrap();
        assert_relative_eq!(preds[0], 5.0);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let mut t = Table::new();
        t.push_column(Column::new("alcohol", vec![10.0])).unwrap();

        let err = linear().predict(&t).unwrap_err();
        assert_eq!(err, PredictError::MissingColumn("pH".into()));
    }

    #[test]
    fn linear_validation_catches_weight_mismatch() {
        let m = LinearModel {
            features: vec!["a".into()],
            weights: vec![1.0, 2.0],
            intercept: 0.0,
        };
        assert!(matches!(
            m.validate(),
            Err(ModelValidationError::WeightLenMismatch { .. })
        ));
    }

    fn stump(feature: usize, threshold: f64, lo: f64, hi: f64) -> Tree {
        Tree {
            nodes: vec![
                TreeNode::Branch {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: lo },
                TreeNode::Leaf { value: hi },
            ],
        }
    }

    #[test]
    fn tree_ensemble_sums_base_and_trees() {
        let m = TreeEnsembleModel {
            features: vec!["alcohol".into()],
            base_score: 5.0,
            trees: vec![stump(0, 11.0, -0.5, 0.5), stump(0, 13.0, 0.0, 1.0)],
        };
        m.validate().unwrap();

        let mut t = Table::new();
        t.push_column(Column::new("alcohol", vec![9.0, 12.0, 13.5]))
            .unwrap();

        let preds = m.predict(&t).unwrap();
        assert_relative_eq!(preds[0], 5.0 - 0.5 + 0.0);
        assert_relative_eq!(preds[1], 5.0 + 0.5 + 0.0);
        assert_relative_eq!(preds[2], 5.0 + 0.5 + 1.0);
    }

    #[test]
    fn tree_validation_rejects_backward_children() {
        let m = TreeEnsembleModel {
            features: vec!["a".into()],
            base_score: 0.0,
            trees: vec![Tree {
                nodes: vec![
                    TreeNode::Branch {
                        feature: 0,
                        threshold: 1.0,
                        left: 0, // self-loop
                        right: 1,
                    },
                    TreeNode::Leaf { value: 1.0 },
                ],
            }],
        };
        assert!(matches!(
            m.validate(),
            Err(ModelValidationError::BadChildIndex { .. })
        ));
    }

    #[test]
    fn tree_validation_rejects_unknown_feature() {
        let m = TreeEnsembleModel {
            features: vec!["a".into()],
            base_score: 0.0,
            trees: vec![stump(3, 1.0, 0.0, 1.0)],
        };
        assert!(matches!(
            m.validate(),
            Err(ModelValidationError::FeatureOutOfRange { .. })
        ));
    }

    #[test]
    fn artifact_round_trips_through_json() {
        let artifact = ModelArtifact::Linear(linear());
        let text = serde_json::to_string(&artifact).unwrap();
        assert!(text.contains("\"kind\":\"linear\""));

        let back: ModelArtifact = serde_json::from_str(&text).unwrap();
        let predictor = back.into_predictor().unwrap();

        let t = Table::single_row([("alcohol", 10.0), ("pH", 3.0)]);
        assert_relative_eq!(predictor.predict(&t).unwrap()[0], 5.0);
    }
}
