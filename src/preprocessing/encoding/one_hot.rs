//! One-hot encoding for nominal columns.

use crate::dataset::{Frame, Value};
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::preprocessing::{column_names, log_absent};
use crate::schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// One-hot encoder for nominal columns.
///
/// Fit learns the sorted set of levels observed in each configured column.
/// Transform removes each encoded column and appends one 0/1 column per
/// learned level, named `<column>_<level>`, after all other columns.
///
/// # Example
/// ```ignore
/// use habitrisk::preprocessing::{OneHotEncoder, Transformer, FittedTransformer};
///
/// // MTRANS: ["Walking", "Bike", "Walking"]
/// let fitted = OneHotEncoder::new().fit(&data)?;
///
/// // Columns: ..., MTRANS_Bike, MTRANS_Walking
/// // Rows:    [0, 1], [1, 0], [0, 1]
/// let encoded = fitted.transform(&data)?;
/// ```
#[derive(Clone, Debug)]
pub struct OneHotEncoder {
    columns: Vec<String>,
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create an encoder over `MTRANS` that ignores unknown levels.
    pub fn new() -> Self {
        Self {
            columns: column_names(schema::NOMINAL_COLUMNS),
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

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable parameters for a fitted OneHotEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoderParams {
    /// Resolved column names.
    pub columns: Vec<String>,
    /// Sorted levels learned for each resolved column.
    pub categories_: Vec<Vec<String>>,
    /// Handle unknown strategy.
    pub handle_unknown: HandleUnknown,
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedOneHotEncoder {
    columns: Vec<String>,
    categories_: Vec<Vec<String>>,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// Levels learned for each resolved column.
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories_
    }

    /// Names of the columns this encoder appends, in output order.
    pub fn output_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(self.categories_.iter())
            .flat_map(|(name, levels)| {
                levels
                    .iter()
                    .map(move |level| format!("{}_{}", name, level))
            })
            .collect()
    }
}

impl Transformer for OneHotEncoder {
    type Params = OneHotEncoderParams;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Frame) -> Result<Self::Fitted, PreprocessingError> {
        log_absent("OneHotEncoder", &self.columns, data);
        let columns = data.present_columns(&self.columns);

        if !columns.is_empty() && data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let mut categories_ = Vec::with_capacity(columns.len());
        for name in &columns {
            let levels: BTreeSet<String> = data
                .try_column(name)?
                .iter()
                .filter_map(Value::category_key)
                .collect();
            if levels.is_empty() {
                return Err(PreprocessingError::EmptyData(format!(
                    "Column '{}' has no levels to encode",
                    name
                )));
            }
            categories_.push(levels.into_iter().collect());
        }

        debug!(columns = ?columns, "fitted OneHotEncoder");
        Ok(FittedOneHotEncoder {
            columns,
            categories_,
            handle_unknown: self.handle_unknown,
        })
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Params = OneHotEncoderParams;

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        let present: Vec<usize> = (0..self.columns.len())
            .filter(|&idx| {
                let found = data.has_column(&self.columns[idx]);
                if !found {
                    debug!(column = %self.columns[idx], "OneHotEncoder column absent at transform, skipped");
                }
                found
            })
            .collect();
        if present.is_empty() {
            return Ok(data.clone());
        }

        let encoded_names: Vec<String> =
            present.iter().map(|&idx| self.columns[idx].clone()).collect();
        let mut out = data.without_columns(&encoded_names);

        for idx in present {
            let name = &self.columns[idx];
            let levels = &self.categories_[idx];
            let values = data.try_column(name)?;
            let mut blocks = vec![vec![Value::Number(0.0); data.n_rows()]; levels.len()];

            for (row, value) in values.iter().enumerate() {
                let key = value.category_key();
                let hit = key
                    .as_deref()
                    .and_then(|k| levels.iter().position(|level| level == k));
                match hit {
                    Some(pos) => blocks[pos][row] = Value::Number(1.0),
                    None => {
                        if self.handle_unknown == HandleUnknown::Error {
                            return Err(PreprocessingError::InvalidParameter(format!(
                                "Unknown category '{}' in column '{}' at row {}",
                                value, name, row
                            )));
                        }
                        warn!(column = %name, value = %value, row, "unknown category, encoded as all zeros");
                    }
                }
            }

            for (level, block) in levels.iter().zip(blocks) {
                out.push_column(format!("{}_{}", name, level), block)?;
            }
        }
        Ok(out)
    }

    fn extract_params(&self) -> Self::Params {
        OneHotEncoderParams {
            columns: self.columns.clone(),
            categories_: self.categories_.clone(),
            handle_unknown: self.handle_unknown,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.columns.len() != params.categories_.len() {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} category lists", params.columns.len()),
                got: format!("{}", params.categories_.len()),
            });
        }
        if let Some(pos) = params.categories_.iter().position(Vec::is_empty) {
            return Err(PreprocessingError::InvalidParameter(format!(
                "No levels stored for column '{}'",
                params.columns[pos]
            )));
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

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_data() -> Frame {
        Frame::from_columns(vec![
            (
                "MTRANS".to_string(),
                vec![
                    Value::from("Walking"),
                    Value::from("Bike"),
                    Value::from("Walking"),
                ],
            ),
            (
                "Age".to_string(),
                vec![Value::from(0.1), Value::from(0.2), Value::from(0.3)],
            ),
        ])
        .unwrap()
    }

    fn cells(frame: &Frame, name: &str) -> Vec<f64> {
        frame
            .column(name)
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect()
    }

    #[test]
    fn test_one_hot_fit_sorted_levels() {
        let fitted = OneHotEncoder::new().fit(&create_test_data()).unwrap();
        assert_eq!(fitted.categories(), &[vec!["Bike".to_string(), "Walking".to_string()]]);
        assert_eq!(fitted.output_columns(), vec!["MTRANS_Bike", "MTRANS_Walking"]);
    }

    #[test]
    fn test_one_hot_transform_layout() {
        let data = create_test_data();
        let fitted = OneHotEncoder::new().fit(&data).unwrap();
        let out = fitted.transform(&data).unwrap();

        assert_eq!(out.column_names(), &["Age", "MTRANS_Bike", "MTRANS_Walking"]);
        assert_eq!(cells(&out, "MTRANS_Bike"), vec![0.0, 1.0, 0.0]);
        assert_eq!(cells(&out, "MTRANS_Walking"), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_one_hot_exactly_one_hot_per_row() {
        let data = create_test_data();
        let out = OneHotEncoder::new().fit_transform(&data).unwrap();
        for row in 0..out.n_rows() {
            let hot: f64 = ["MTRANS_Bike", "MTRANS_Walking"]
                .iter()
                .map(|c| out.column(c).unwrap()[row].as_f64().unwrap())
                .sum();
            assert_eq!(hot, 1.0);
        }
    }

    #[test]
    fn test_one_hot_unknown_is_all_zero() {
        let fitted = OneHotEncoder::new().fit(&create_test_data()).unwrap();
        let request = Frame::from_columns(vec![(
            "MTRANS".to_string(),
            vec![Value::from("Automobile")],
        )])
        .unwrap();
        let out = fitted.transform(&request).unwrap();
        assert_eq!(cells(&out, "MTRANS_Bike"), vec![0.0]);
        assert_eq!(cells(&out, "MTRANS_Walking"), vec![0.0]);
    }

    #[test]
    fn test_one_hot_unknown_error_strategy() {
        let fitted = OneHotEncoder::new()
            .with_handle_unknown(HandleUnknown::Error)
            .fit(&create_test_data())
            .unwrap();
        let request =
            Frame::from_columns(vec![("MTRANS".to_string(), vec![Value::from("Car")])]).unwrap();
        assert!(fitted.transform(&request).is_err());
    }

    #[test]
    fn test_one_hot_absent_column_is_noop() {
        let data = create_test_data().without_columns(&["MTRANS".to_string()]);
        let fitted = OneHotEncoder::new().fit(&data).unwrap();
        assert!(fitted.columns().is_empty());
        assert_eq!(fitted.transform(&data).unwrap(), data);
    }

    #[test]
    fn test_one_hot_params_roundtrip() {
        let fitted = OneHotEncoder::new().fit(&create_test_data()).unwrap();
        let restored = FittedOneHotEncoder::from_params(fitted.extract_params()).unwrap();
        assert_eq!(fitted, restored);
    }

    #[test]
    fn test_one_hot_from_params_rejects_mismatch() {
        let params = OneHotEncoderParams {
            columns: vec!["MTRANS".to_string()],
            categories_: vec![],
            handle_unknown: HandleUnknown::Ignore,
        };
        assert!(FittedOneHotEncoder::from_params(params).is_err());
    }
}
