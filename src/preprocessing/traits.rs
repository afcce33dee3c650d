//! Core traits for preprocessing stages.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: the unfitted stage configuration; learns from a reference table.
//! - [`FittedTransformer`]: the immutable fitted state; applies the rule and persists.

use crate::dataset::Frame;
use crate::preprocessing::error::PreprocessingError;
use crate::serialization::SerializableParams;

/// Trait for unfitted stages.
///
/// `fit` restricts the configured columns to those present in the table and
/// derives the fitted state. Fitting never mutates `self`; fitting twice yields
/// two independent fitted values.
///
/// # Example
/// ```ignore
/// use habitrisk::preprocessing::{MinMaxScaler, Transformer, FittedTransformer};
///
/// let scaler = MinMaxScaler::new().with_columns(["Age", "Height"]);
/// let fitted = scaler.fit(&train)?;
/// let scaled = fitted.transform(&request)?;
/// ```
pub trait Transformer: Clone {
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;
    /// The fitted stage type ready for inference.
    type Fitted: FittedTransformer<Params = Self::Params>;

    /// Fit the stage to a reference table.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if:
    /// - the table has no rows and the stage needs data to learn from
    /// - a configured column holds values the stage cannot learn from
    fn fit(&self, data: &Frame) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the stage and transform the same table.
    fn fit_transform(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted stages ready for inference.
///
/// # Guarantees
/// - `transform` takes `&self` and never changes the fitted state.
/// - `extract_params()` + `from_params()` is a round-trip.
pub trait FittedTransformer: Clone {
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;

    /// Apply the learned rule to a table, returning a new table.
    ///
    /// Columns the stage did not resolve at fit time pass through unchanged.
    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessingError>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted stage from parameters, validating them.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    /// The configured columns that were present at fit time.
    fn columns(&self) -> &[String];

    /// Save the fitted stage to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let params = self.extract_params();
        let bytes = params.to_bytes().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Load a fitted stage from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PreprocessingError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::Params::from_bytes(&bytes)
            .map_err(|e| PreprocessingError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }
}
