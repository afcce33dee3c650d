//! Ordinal encoding for ordered survey answers.
//!
//! Maps each level to its zero-based rank in a fixed vocabulary. The
//! vocabulary is configuration, not learned: fitting only resolves which
//! configured columns are present.

use crate::dataset::{Frame, Value};
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::preprocessing::{column_names, log_absent};
use crate::schema::{self, vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Code emitted for values outside the vocabulary.
pub const UNKNOWN_ORDINAL: f64 = -1.0;

/// Ordinal encoder over fixed vocabularies.
///
/// # Example
/// ```ignore
/// use habitrisk::preprocessing::{OrdinalEncoder, Transformer, FittedTransformer};
///
/// // CH2O: ["Up to 1L", "2L+", "3L"]
/// let fitted = OrdinalEncoder::new().with_columns(["CH2O"]).fit(&data)?;
///
/// // CH2O: [0, 2, -1]
/// let encoded = fitted.transform(&data)?;
/// ```
#[derive(Clone, Debug)]
pub struct OrdinalEncoder {
    columns: Vec<String>,
    vocabularies: BTreeMap<String, Vec<String>>,
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OrdinalEncoder {
    /// Create an encoder over the survey's ordered columns and the target,
    /// using the built-in vocabularies.
    pub fn new() -> Self {
        let vocabularies = schema::ORDINAL_COLUMNS
            .iter()
            .filter_map(|column| {
                vocabulary::ordered_levels(column)
                    .map(|levels| (column.to_string(), column_names(levels.iter().copied())))
            })
            .collect();
        Self {
            columns: column_names(schema::ORDINAL_COLUMNS),
            vocabularies,
            handle_unknown: HandleUnknown::default(),
        }
    }

    /// Replace the configured columns.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set or replace the ordered vocabulary of one column.
    pub fn with_vocabulary<I, S>(mut self, column: impl Into<String>, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabularies
            .insert(column.into(), levels.into_iter().map(Into::into).collect());
        self
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }

    /// Configured columns.
    pub fn configured_columns(&self) -> &[String] {
        &self.columns
    }
}

impl Default for OrdinalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable parameters for a fitted OrdinalEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrdinalEncoderParams {
    /// Resolved column names.
    pub columns: Vec<String>,
    /// Ordered vocabulary for each resolved column.
    pub categories_: Vec<Vec<String>>,
    /// Handle unknown strategy.
    pub handle_unknown: HandleUnknown,
}

/// Fitted OrdinalEncoder ready for inference.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedOrdinalEncoder {
    columns: Vec<String>,
    categories_: Vec<Vec<String>>,
    handle_unknown: HandleUnknown,
}

impl FittedOrdinalEncoder {
    /// Ordered vocabulary for each resolved column.
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories_
    }

    /// Rank of `level` in the vocabulary of a resolved column.
    pub fn rank(&self, column: &str, level: &str) -> Option<usize> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.categories_[idx].iter().position(|l| l == level)
    }
}

fn check_vocabulary(column: &str, levels: &[String]) -> Result<(), PreprocessingError> {
    if levels.is_empty() {
        return Err(PreprocessingError::InvalidParameter(format!(
            "Empty vocabulary for column '{}'",
            column
        )));
    }
    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = levels.iter().find(|l| !seen.insert(l.as_str())) {
        return Err(PreprocessingError::InvalidParameter(format!(
            "Level '{}' repeated in vocabulary of column '{}'",
            dup, column
        )));
    }
    Ok(())
}

impl Transformer for OrdinalEncoder {
    type Params = OrdinalEncoderParams;
    type Fitted = FittedOrdinalEncoder;

    fn fit(&self, data: &Frame) -> Result<Self::Fitted, PreprocessingError> {
        log_absent("OrdinalEncoder", &self.columns, data);
        let columns = data.present_columns(&self.columns);

        let mut categories_ = Vec::with_capacity(columns.len());
        for name in &columns {
            let levels = self.vocabularies.get(name).ok_or_else(|| {
                PreprocessingError::InvalidParameter(format!(
                    "No vocabulary configured for ordinal column '{}'",
                    name
                ))
            })?;
            check_vocabulary(name, levels)?;
            categories_.push(levels.clone());
        }

        debug!(columns = ?columns, "fitted OrdinalEncoder");
        Ok(FittedOrdinalEncoder {
            columns,
            categories_,
            handle_unknown: self.handle_unknown,
        })
    }
}

impl FittedTransformer for FittedOrdinalEncoder {
    type Params = OrdinalEncoderParams;

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        let mut out = data.clone();
        for (name, levels) in self.columns.iter().zip(self.categories_.iter()) {
            let Some(values) = data.column(name) else {
                debug!(column = %name, "OrdinalEncoder column absent at transform, skipped");
                continue;
            };
            let mut encoded = Vec::with_capacity(values.len());
            for (row, value) in values.iter().enumerate() {
                let rank = value
                    .as_str()
                    .and_then(|s| levels.iter().position(|level| level == s));
                match rank {
                    Some(r) => encoded.push(Value::Number(r as f64)),
                    None => {
                        if self.handle_unknown == HandleUnknown::Error {
                            return Err(PreprocessingError::InvalidParameter(format!(
                                "Unknown level '{}' in column '{}' at row {}",
                                value, name, row
                            )));
                        }
                        warn!(column = %name, value = %value, row, "unknown level, encoded as -1");
                        encoded.push(Value::Number(UNKNOWN_ORDINAL));
                    }
                }
            }
            out.replace_column(name, encoded)?;
        }
        Ok(out)
    }

    fn extract_params(&self) -> Self::Params {
        OrdinalEncoderParams {
            columns: self.columns.clone(),
            categories_: self.categories_.clone(),
            handle_unknown: self.handle_unknown,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.columns.len() != params.categories_.len() {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} vocabularies", params.columns.len()),
                got: format!("{}", params.categories_.len()),
            });
        }
        for (name, levels) in params.columns.iter().zip(params.categories_.iter()) {
            check_vocabulary(name, levels)?;
        }
        Ok(Self {
            columns: params.columns,
            categories_: params.categories_,
            handle_unknown: params.handle_unknown,
        })
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }
}
