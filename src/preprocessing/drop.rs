//! Column removal.

use crate::dataset::Frame;
use crate::preprocessing::column_names;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::schema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Removes configured columns when present.
///
/// Fitting learns nothing. Transform drops every configured column found in
/// the table at that moment, so applying it twice equals applying it once.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDropper {
    columns: Vec<String>,
}

impl ColumnDropper {
    /// Drop `Weight` and `MTRANS`.
    pub fn new() -> Self {
        Self {
            columns: column_names(schema::DROPPED_COLUMNS),
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
}

impl Default for ColumnDropper {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable parameters for a ColumnDropper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnDropperParams {
    pub columns: Vec<String>,
}

/// A dropper ready for use. Identical to its configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedColumnDropper {
    columns: Vec<String>,
}

impl Transformer for ColumnDropper {
    type Params = ColumnDropperParams;
    type Fitted = FittedColumnDropper;

    fn fit(&self, _data: &Frame) -> Result<Self::Fitted, PreprocessingError> {
        Ok(FittedColumnDropper {
            columns: self.columns.clone(),
        })
    }
}

impl FittedTransformer for FittedColumnDropper {
    type Params = ColumnDropperParams;

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        let present = data.present_columns(&self.columns);
        if !present.is_empty() {
            debug!(columns = ?present, "dropping columns");
        }
        Ok(data.without_columns(&present))
    }

    fn extract_params(&self) -> Self::Params {
        ColumnDropperParams {
            columns: self.columns.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        Ok(Self {
            columns: params.columns,
        })
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }
}
