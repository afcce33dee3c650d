//! The classifier seam.
//!
//! The prediction orchestrator only needs a model that maps a numeric matrix
//! (one row per record) to one class index per row. Any trained model can be
//! plugged in behind [`Classifier`]; [`LinearClassifier`] is the bundled one.

pub mod linear;

pub use linear::{LinearClassifier, LinearClassifierParams};

use ndarray::ArrayView2;
use thiserror::Error;

/// Errors raised by classifiers.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Feature mismatch: expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },
    #[error("Non-finite input at row {row}, feature {feature}")]
    NonFiniteInput { row: usize, feature: usize },
    #[error("Invalid model parameters: {0}")]
    InvalidParams(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A trained multi-class classifier.
///
/// Implementations are shared read-only between requests.
pub trait Classifier: Send + Sync {
    /// One class index per input row.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<i64>, ModelError>;

    /// Number of features the model was trained on, when known.
    fn n_features(&self) -> Option<usize>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<i64>, ModelError> {
        (**self).predict(x)
    }

    fn n_features(&self) -> Option<usize> {
        (**self).n_features()
    }
}

impl<C: Classifier + ?Sized> Classifier for std::sync::Arc<C> {
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<i64>, ModelError> {
        (**self).predict(x)
    }

    fn n_features(&self) -> Option<usize> {
        (**self).n_features()
    }
}
