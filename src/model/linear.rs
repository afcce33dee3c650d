//! Multi-class linear classifier.
//!
//! Scores every class as `w_c · x + b_c` and predicts the class with the
//! highest score. Parameters are stored as JSON so that models trained
//! elsewhere can be exported into this layout.

use crate::model::{Classifier, ModelError};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// JSON layout of a linear classifier.
///
/// ```json
/// {
///   "classes": [0, 1, 2, 3, 4, 5, 6],
///   "weights": [[...], ...],
///   "bias": [...]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifierParams {
    /// Class index emitted for each weight row.
    pub classes: Vec<i64>,
    /// One weight row per class, one entry per feature.
    pub weights: Vec<Vec<f64>>,
    /// One bias per class.
    pub bias: Vec<f64>,
    /// Feature names in training order, for inspection only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

/// Linear classifier ready for inference.
#[derive(Clone, Debug)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    weights: Array2<f64>,
    bias: Array1<f64>,
    feature_names: Option<Vec<String>>,
}

impl LinearClassifier {
    /// Build a classifier, validating the parameter shapes.
    pub fn from_params(params: LinearClassifierParams) -> Result<Self, ModelError> {
        let n_classes = params.classes.len();
        if n_classes == 0 {
            return Err(ModelError::InvalidParams("no classes".to_string()));
        }
        if params.weights.len() != n_classes || params.bias.len() != n_classes {
            return Err(ModelError::InvalidParams(format!(
                "{} classes but {} weight rows and {} biases",
                n_classes,
                params.weights.len(),
                params.bias.len()
            )));
        }
        let n_features = params.weights[0].len();
        if params.weights.iter().any(|row| row.len() != n_features) {
            return Err(ModelError::InvalidParams(
                "weight rows differ in length".to_string(),
            ));
        }
        if let Some(names) = &params.feature_names {
            if names.len() != n_features {
                return Err(ModelError::InvalidParams(format!(
                    "{} feature names for {} features",
                    names.len(),
                    n_features
                )));
            }
        }
        let flat: Vec<f64> = params.weights.into_iter().flatten().collect();
        if flat.iter().chain(params.bias.iter()).any(|w| !w.is_finite()) {
            return Err(ModelError::InvalidParams(
                "weights and biases must be finite".to_string(),
            ));
        }
        let weights = Array2::from_shape_vec((n_classes, n_features), flat)
            .map_err(|e| ModelError::InvalidParams(e.to_string()))?;

        Ok(Self {
            classes: params.classes,
            weights,
            bias: Array1::from_vec(params.bias),
            feature_names: params.feature_names,
        })
    }

    /// Parameters in their JSON layout.
    pub fn to_params(&self) -> LinearClassifierParams {
        LinearClassifierParams {
            classes: self.classes.clone(),
            weights: self.weights.outer_iter().map(|row| row.to_vec()).collect(),
            bias: self.bias.to_vec(),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Load parameters from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let params: LinearClassifierParams = serde_json::from_slice(&bytes)?;
        let model = Self::from_params(params)?;
        info!(
            path = %path.display(),
            classes = model.classes.len(),
            features = model.weights.ncols(),
            "linear classifier loaded"
        );
        Ok(model)
    }

    /// Save parameters as pretty-printed JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let json = serde_json::to_vec_pretty(&self.to_params())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Class scores for every row, shape `(rows, classes)`.
    pub fn decision_function(&self, x: ArrayView2<f64>) -> Result<Array2<f64>, ModelError> {
        if x.ncols() != self.weights.ncols() {
            return Err(ModelError::FeatureMismatch {
                expected: self.weights.ncols(),
                got: x.ncols(),
            });
        }
        for (row, values) in x.outer_iter().enumerate() {
            if let Some(feature) = values.iter().position(|v| !v.is_finite()) {
                return Err(ModelError::NonFiniteInput { row, feature });
            }
        }
        Ok(x.dot(&self.weights.t()) + &self.bias)
    }

    /// Feature names recorded with the parameters.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<i64>, ModelError> {
        let scores = self.decision_function(x)?;
        Ok(scores
            .axis_iter(Axis(0))
            .map(|row| {
                let mut best = 0;
                for (idx, score) in row.iter().enumerate() {
                    if *score > row[best] {
                        best = idx;
                    }
                }
                self.classes[best]
            })
            .collect())
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.weights.ncols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn two_feature_model() -> LinearClassifier {
        LinearClassifier::from_params(LinearClassifierParams {
            classes: vec![0, 3, 6],
            weights: vec![vec![-1.0, 0.0], vec![0.0, 0.0], vec![1.0, 0.0]],
            bias: vec![0.0, 0.5, 0.0],
            feature_names: None,
        })
        .unwrap()
    }

    #[test]
    fn test_predict_argmax() {
        let model = two_feature_model();
        let x = array![[-2.0, 0.0], [0.0, 9.0], [2.0, 0.0]];
        assert_eq!(model.predict(x.view()).unwrap(), vec![0, 3, 6]);
    }

    #[test]
    fn test_predict_feature_mismatch() {
        let model = two_feature_model();
        let x = array![[1.0, 2.0, 3.0]];
        assert!(matches!(
            model.predict(x.view()),
            Err(ModelError::FeatureMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_predict_rejects_nan() {
        let model = two_feature_model();
        let x = array![[1.0, f64::NAN]];
        assert!(matches!(
            model.predict(x.view()),
            Err(ModelError::NonFiniteInput { row: 0, feature: 1 })
        ));
    }

    #[test]
    fn test_invalid_params() {
        let result = LinearClassifier::from_params(LinearClassifierParams {
            classes: vec![0, 1],
            weights: vec![vec![1.0]],
            bias: vec![0.0, 0.0],
            feature_names: None,
        });
        assert!(matches!(result, Err(ModelError::InvalidParams(_))));
    }

    #[test]
    fn test_json_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let model = two_feature_model();
        model.save_to_file(&path).unwrap();
        let loaded = LinearClassifier::load_from_file(&path).unwrap();
        assert_eq!(loaded.to_params(), model.to_params());
        assert_eq!(loaded.n_features(), Some(2));
    }
}
