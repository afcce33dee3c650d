//! Min-Max Scaler.
//!
//! Scales each configured numeric column with bounds learned at fit time.
//!
//! The transformation is given by:
//! ```text
//! X_scaled = (X - X_min) / (X_max - X_min) * (max - min) + min
//! ```
//!
//! Values outside the fitted bounds are not clamped, so a request older than
//! every training subject scales above 1.
//!
//! # Example
//! ```ignore
//! use habitrisk::preprocessing::{MinMaxScaler, Transformer, FittedTransformer};
//!
//! let scaler = MinMaxScaler::new().with_columns(["Age", "Height"]);
//! let fitted = scaler.fit(&train)?;
//! let scaled = fitted.transform(&request)?;
//! ```

use crate::dataset::{Frame, Value};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::preprocessing::{column_names, log_absent};
use crate::schema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for MinMaxScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScalerConfig {
    /// Minimum value of the target range.
    pub min: f64,
    /// Maximum value of the target range.
    pub max: f64,
}

impl Default for MinMaxScalerConfig {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Serializable parameters for a fitted MinMaxScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScalerParams {
    /// Configuration options.
    pub config: MinMaxScalerConfig,
    /// Resolved column names.
    pub columns: Vec<String>,
    /// Minimum of each resolved column.
    pub min_: Vec<f64>,
    /// Maximum of each resolved column.
    pub max_: Vec<f64>,
    /// Scale factor for each column: (max - min) / (feature_max - feature_min).
    pub scale_: Vec<f64>,
}

/// MinMaxScaler stage (unfitted).
#[derive(Clone, Debug)]
pub struct MinMaxScaler {
    columns: Vec<String>,
    config: MinMaxScalerConfig,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Create a scaler over `Age` and `Height` with target range [0, 1].
    pub fn new() -> Self {
        Self {
            columns: column_names(schema::SCALED_COLUMNS),
            config: MinMaxScalerConfig::default(),
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

    /// Set the target range for scaling. Checked when fitting.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.config.min = min;
        self.config.max = max;
        self
    }

    /// Configured columns.
    pub fn configured_columns(&self) -> &[String] {
        &self.columns
    }
}

fn check_range(config: &MinMaxScalerConfig) -> Result<(), PreprocessingError> {
    if config.min.is_nan() || config.max.is_nan() || config.max <= config.min {
        return Err(PreprocessingError::InvalidParameter(format!(
            "MinMaxScaler range max ({}) must be greater than min ({})",
            config.max, config.min
        )));
    }
    Ok(())
}

impl Transformer for MinMaxScaler {
    type Params = MinMaxScalerParams;
    type Fitted = FittedMinMaxScaler;

    fn fit(&self, data: &Frame) -> Result<Self::Fitted, PreprocessingError> {
        check_range(&self.config)?;
        log_absent("MinMaxScaler", &self.columns, data);
        let columns = data.present_columns(&self.columns);

        let mut min_ = Vec::with_capacity(columns.len());
        let mut max_ = Vec::with_capacity(columns.len());
        for name in &columns {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            let mut seen = 0usize;
            for (row, value) in data.try_column(name)?.iter().enumerate() {
                match value {
                    Value::Number(x) if x.is_finite() => {
                        lo = lo.min(*x);
                        hi = hi.max(*x);
                        seen += 1;
                    }
                    Value::Number(x) => {
                        return Err(PreprocessingError::NumericalError(format!(
                            "Non-finite value {} in column '{}' at row {}",
                            x, name, row
                        )))
                    }
                    Value::Text(s) => {
                        return Err(PreprocessingError::NonNumeric {
                            column: name.clone(),
                            row,
                            value: s.clone(),
                        })
                    }
                    Value::Missing => {}
                }
            }
            if seen == 0 {
                return Err(PreprocessingError::EmptyData(format!(
                    "Cannot fit MinMaxScaler on column '{}' without numeric values",
                    name
                )));
            }
            min_.push(lo);
            max_.push(hi);
        }

        let target_range = self.config.max - self.config.min;
        let scale_ = min_
            .iter()
            .zip(max_.iter())
            .map(|(&lo, &hi)| {
                let range = hi - lo;
                if range == 0.0 {
                    1.0
                } else {
                    target_range / range
                }
            })
            .collect();

        debug!(columns = ?columns, "fitted MinMaxScaler");
        Ok(FittedMinMaxScaler {
            config: self.config.clone(),
            columns,
            min_,
            max_,
            scale_,
        })
    }
}

/// Fitted MinMaxScaler ready for inference.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedMinMaxScaler {
    config: MinMaxScalerConfig,
    columns: Vec<String>,
    min_: Vec<f64>,
    max_: Vec<f64>,
    scale_: Vec<f64>,
}

impl FittedMinMaxScaler {
    /// Minimum learned for each resolved column.
    pub fn min(&self) -> &[f64] {
        &self.min_
    }

    /// Maximum learned for each resolved column.
    pub fn max(&self) -> &[f64] {
        &self.max_
    }

    /// Scale factor for each resolved column.
    pub fn scale(&self) -> &[f64] {
        &self.scale_
    }

    /// The data range (max - min) for each resolved column.
    pub fn data_range(&self) -> Vec<f64> {
        self.max_
            .iter()
            .zip(self.min_.iter())
            .map(|(hi, lo)| hi - lo)
            .collect()
    }
}

impl FittedTransformer for FittedMinMaxScaler {
    type Params = MinMaxScalerParams;

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        let mut out = data.clone();
        for (idx, name) in self.columns.iter().enumerate() {
            let Some(values) = data.column(name) else {
                debug!(column = %name, "MinMaxScaler column absent at transform, skipped");
                continue;
            };
            let (lo, scale) = (self.min_[idx], self.scale_[idx]);
            let scaled = values
                .iter()
                .enumerate()
                .map(|(row, value)| match value {
                    Value::Number(x) => Ok(Value::Number((x - lo) * scale + self.config.min)),
                    Value::Missing => Ok(Value::Missing),
                    Value::Text(s) => Err(PreprocessingError::NonNumeric {
                        column: name.clone(),
                        row,
                        value: s.clone(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            out.replace_column(name, scaled)?;
        }
        Ok(out)
    }

    fn extract_params(&self) -> Self::Params {
        MinMaxScalerParams {
            config: self.config.clone(),
            columns: self.columns.clone(),
            min_: self.min_.clone(),
            max_: self.max_.clone(),
            scale_: self.scale_.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        check_range(&params.config)?;
        let n = params.columns.len();
        if params.min_.len() != n || params.max_.len() != n || params.scale_.len() != n {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} bounds per vector", n),
                got: format!(
                    "min {}, max {}, scale {}",
                    params.min_.len(),
                    params.max_.len(),
                    params.scale_.len()
                ),
            });
        }
        if params
            .scale_
            .iter()
            .any(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(PreprocessingError::NumericalError(
                "MinMaxScaler scale factors must be finite and non-zero".to_string(),
            ));
        }
        Ok(Self {
            config: params.config,
            columns: params.columns,
            min_: params.min_,
            max_: params.max_,
            scale_: params.scale_,
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
                "Age".to_string(),
                vec![Value::from(20.0), Value::from(30.0), Value::from(60.0)],
            ),
            (
                "Height".to_string(),
                vec![Value::from(1.5), Value::from(1.5), Value::from(2.0)],
            ),
            (
                "SMOKE".to_string(),
                vec![Value::from("No"), Value::from("Yes"), Value::from("No")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_minmax_scaler_fit() {
        let fitted = MinMaxScaler::new().fit(&create_test_data()).unwrap();

        assert_eq!(fitted.columns(), &["Age", "Height"]);
        assert_eq!(fitted.min(), &[20.0, 1.5]);
        assert_eq!(fitted.max(), &[60.0, 2.0]);
        assert!((fitted.scale()[0] - 1.0 / 40.0).abs() < 1e-12);
        assert!((fitted.scale()[1] - 2.0).abs() < 1e-12);
        assert!((fitted.data_range()[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_minmax_scaler_transform() {
        let data = create_test_data();
        let fitted = MinMaxScaler::new().fit(&data).unwrap();
        let out = fitted.transform(&data).unwrap();

        let age: Vec<f64> = out
            .column("Age")
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        assert!((age[0] - 0.0).abs() < 1e-12);
        assert!((age[1] - 0.25).abs() < 1e-12);
        assert!((age[2] - 1.0).abs() < 1e-12);

        // other columns untouched
        assert_eq!(out.column("SMOKE"), data.column("SMOKE"));
        assert_eq!(out.column_names(), data.column_names());
    }

    #[test]
    fn test_minmax_scaler_no_clamping() {
        let fitted = MinMaxScaler::new()
            .with_columns(["Age"])
            .fit(&create_test_data())
            .unwrap();
        let request =
            Frame::from_columns(vec![("Age".to_string(), vec![Value::from(100.0)])]).unwrap();
        let out = fitted.transform(&request).unwrap();
        assert!((out.column("Age").unwrap()[0].as_f64().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_minmax_scaler_monotonic() {
        let fitted = MinMaxScaler::new().fit(&create_test_data()).unwrap();
        let request = Frame::from_columns(vec![(
            "Age".to_string(),
            vec![Value::from(10.0), Value::from(25.0), Value::from(25.5), Value::from(80.0)],
        )])
        .unwrap();
        let out = fitted.transform(&request).unwrap();
        let ages: Vec<f64> = out
            .column("Age")
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        assert!(ages.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_minmax_scaler_absent_columns_skipped() {
        let data = create_test_data().without_columns(&["Height".to_string()]);
        let fitted = MinMaxScaler::new().fit(&data).unwrap();
        assert_eq!(fitted.columns(), &["Age"]);

        let no_age = data.without_columns(&["Age".to_string()]);
        let out = fitted.transform(&no_age).unwrap();
        assert_eq!(out, no_age);
    }

    #[test]
    fn test_minmax_scaler_constant_column() {
        let data = Frame::from_columns(vec![(
            "Age".to_string(),
            vec![Value::from(30.0), Value::from(30.0)],
        )])
        .unwrap();
        let fitted = MinMaxScaler::new().fit(&data).unwrap();
        assert_eq!(fitted.scale(), &[1.0]);
        let out = fitted.transform(&data).unwrap();
        assert_eq!(out.column("Age").unwrap()[0], Value::Number(0.0));
    }

    #[test]
    fn test_minmax_scaler_missing_passes_through() {
        let data = Frame::from_columns(vec![(
            "Age".to_string(),
            vec![Value::from(20.0), Value::Missing, Value::from(40.0)],
        )])
        .unwrap();
        let fitted = MinMaxScaler::new().fit(&data).unwrap();
        let out = fitted.transform(&data).unwrap();
        assert_eq!(out.column("Age").unwrap()[1], Value::Missing);
        assert!((out.column("Age").unwrap()[2].as_f64().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_minmax_scaler_text_is_error() {
        let data = Frame::from_columns(vec![(
            "Age".to_string(),
            vec![Value::from(20.0), Value::from("old")],
        )])
        .unwrap();
        let result = MinMaxScaler::new().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::NonNumeric { .. })));
    }

    #[test]
    fn test_minmax_scaler_all_missing_is_empty() {
        let data = Frame::from_columns(vec![("Age".to_string(), vec![Value::Missing])]).unwrap();
        let result = MinMaxScaler::new().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_minmax_scaler_invalid_range() {
        let result = MinMaxScaler::new()
            .with_range(1.0, 1.0)
            .fit(&create_test_data());
        assert!(matches!(result, Err(PreprocessingError::InvalidParameter(_))));
    }

    #[test]
    fn test_minmax_scaler_custom_range() {
        let data = create_test_data();
        let fitted = MinMaxScaler::new()
            .with_columns(["Age"])
            .with_range(-1.0, 1.0)
            .fit(&data)
            .unwrap();
        let out = fitted.transform(&data).unwrap();
        let age = out.column("Age").unwrap();
        assert!((age[0].as_f64().unwrap() + 1.0).abs() < 1e-12);
        assert!((age[2].as_f64().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_minmax_scaler_params_roundtrip() {
        let data = create_test_data();
        let fitted = MinMaxScaler::new().fit(&data).unwrap();
        let restored = FittedMinMaxScaler::from_params(fitted.extract_params()).unwrap();
        assert_eq!(fitted, restored);
    }

    #[test]
    fn test_minmax_scaler_from_params_rejects_ragged() {
        let mut params = MinMaxScaler::new()
            .fit(&create_test_data())
            .unwrap()
            .extract_params();
        params.max_.pop();
        assert!(FittedMinMaxScaler::from_params(params).is_err());
    }

    #[test]
    fn test_minmax_scaler_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.bin");
        let data = create_test_data();
        let fitted = MinMaxScaler::new().fit(&data).unwrap();
        fitted.save_to_file(&path).unwrap();
        let loaded = FittedMinMaxScaler::load_from_file(&path).unwrap();
        assert_eq!(loaded.transform(&data).unwrap(), fitted.transform(&data).unwrap());
    }
}
