//! Two-token columns mapped to 0/1.

use crate::dataset::{Frame, Value};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::log_absent;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::schema::{self, vocabulary};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A column and the tokens that encode to 0 and 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryColumn {
    pub name: String,
    pub zero: String,
    pub one: String,
}

impl BinaryColumn {
    pub fn new(name: impl Into<String>, zero: impl Into<String>, one: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zero: zero.into(),
            one: one.into(),
        }
    }

    fn encode(&self, value: &Value) -> Option<f64> {
        match value.as_str()? {
            s if s == self.zero => Some(0.0),
            s if s == self.one => Some(1.0),
            _ => None,
        }
    }
}

/// Binary mapper for yes/no answers and gender.
///
/// Any value other than the two tokens becomes [`Value::Missing`] and is
/// logged; the stage never fails on content.
#[derive(Clone, Debug)]
pub struct BinaryMapper {
    mappings: Vec<BinaryColumn>,
}

impl BinaryMapper {
    /// `No`→0 / `Yes`→1 on the yes/no columns, `Male`→0 / `Female`→1 on `Gender`.
    pub fn new() -> Self {
        let mut mappings: Vec<BinaryColumn> = schema::YES_NO_COLUMNS
            .iter()
            .map(|name| BinaryColumn::new(*name, vocabulary::NO, vocabulary::YES))
            .collect();
        mappings.push(BinaryColumn::new(
            schema::GENDER,
            vocabulary::MALE,
            vocabulary::FEMALE,
        ));
        Self { mappings }
    }

    /// Start from no mappings.
    pub fn empty() -> Self {
        Self {
            mappings: Vec::new(),
        }
    }

    /// Map `No`→0 / `Yes`→1 on the given columns, replacing any previous yes/no set.
    pub fn with_yes_no_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mappings
            .retain(|m| !(m.zero == vocabulary::NO && m.one == vocabulary::YES));
        self.mappings.extend(
            columns
                .into_iter()
                .map(|name| BinaryColumn::new(name, vocabulary::NO, vocabulary::YES)),
        );
        self
    }

    /// Add or replace the mapping of one column.
    pub fn with_column(mut self, column: BinaryColumn) -> Self {
        self.mappings.retain(|m| m.name != column.name);
        self.mappings.push(column);
        self
    }

    /// Configured mappings.
    pub fn mappings(&self) -> &[BinaryColumn] {
        &self.mappings
    }
}

impl Default for BinaryMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable parameters for a fitted BinaryMapper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryMapperParams {
    /// Resolved mappings.
    pub mappings: Vec<BinaryColumn>,
}

/// Fitted BinaryMapper ready for inference.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedBinaryMapper {
    mappings: Vec<BinaryColumn>,
    columns: Vec<String>,
}

impl FittedBinaryMapper {
    /// Resolved mappings.
    pub fn mappings(&self) -> &[BinaryColumn] {
        &self.mappings
    }

    fn from_mappings(mappings: Vec<BinaryColumn>) -> Self {
        let columns = mappings.iter().map(|m| m.name.clone()).collect();
        Self { mappings, columns }
    }
}

impl Transformer for BinaryMapper {
    type Params = BinaryMapperParams;
    type Fitted = FittedBinaryMapper;

    fn fit(&self, data: &Frame) -> Result<Self::Fitted, PreprocessingError> {
        let configured: Vec<String> = self.mappings.iter().map(|m| m.name.clone()).collect();
        log_absent("BinaryMapper", &configured, data);
        let mappings: Vec<BinaryColumn> = self
            .mappings
            .iter()
            .filter(|m| data.has_column(&m.name))
            .cloned()
            .collect();
        debug!(columns = mappings.len(), "fitted BinaryMapper");
        Ok(FittedBinaryMapper::from_mappings(mappings))
    }
}

impl FittedTransformer for FittedBinaryMapper {
    type Params = BinaryMapperParams;

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        let mut out = data.clone();
        for mapping in &self.mappings {
            let Some(values) = data.column(&mapping.name) else {
                debug!(column = %mapping.name, "BinaryMapper column absent at transform, skipped");
                continue;
            };
            let encoded = values
                .iter()
                .enumerate()
                .map(|(row, value)| match mapping.encode(value) {
                    Some(code) => Value::Number(code),
                    None => {
                        warn!(column = %mapping.name, value = %value, row, "unexpected token, left missing");
                        Value::Missing
                    }
                })
                .collect();
            out.replace_column(&mapping.name, encoded)?;
        }
        Ok(out)
    }

    fn extract_params(&self) -> Self::Params {
        BinaryMapperParams {
            mappings: self.mappings.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if let Some(bad) = params.mappings.iter().find(|m| m.zero == m.one) {
            return Err(PreprocessingError::InvalidParameter(format!(
                "Column '{}' maps the same token '{}' to 0 and 1",
                bad.name, bad.zero
            )));
        }
        Ok(Self::from_mappings(params.mappings))
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }
}
