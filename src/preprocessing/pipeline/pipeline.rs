//! Pipeline for chaining stages.
//!
//! A Pipeline chains stages so that the output of one becomes the input of the
//! next. Fitting runs each stage's `fit` followed by its `transform` on the
//! running table; the fitted pipeline only ever replays `transform`.
//!
//! # Example
//! ```ignore
//! use habitrisk::preprocessing::{Pipeline, Transformer, FittedTransformer};
//!
//! let pipeline = Pipeline::standard();
//! let fitted = pipeline.fit(&train)?;
//! fitted.save_to_file("artifacts/pipeline.bin")?;
//!
//! let row = fitted.transform(&request)?;
//! ```

use crate::dataset::Frame;
use crate::preprocessing::drop::{ColumnDropper, ColumnDropperParams, FittedColumnDropper};
use crate::preprocessing::encoding::{
    BinaryMapper, BinaryMapperParams, FittedBinaryMapper, FittedOneHotEncoder,
    FittedOrdinalEncoder, OneHotEncoder, OneHotEncoderParams, OrdinalEncoder,
    OrdinalEncoderParams,
};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::sampling::Resampler;
use crate::preprocessing::scaling::{FittedMinMaxScaler, MinMaxScaler, MinMaxScalerParams};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A fitted stage that can be part of a pipeline.
pub trait PipelineStep: Clone {
    /// Transform the table.
    fn transform_step(&self, data: &Frame) -> Result<Frame, PreprocessingError>;
    /// Get the step name for logging and inspection.
    fn step_name(&self) -> &'static str;
}

/// A step in the unfitted pipeline.
#[derive(Clone, Debug)]
pub enum Stage {
    MinMaxScaler(MinMaxScaler),
    ColumnDropper(ColumnDropper),
    BinaryMapper(BinaryMapper),
    OrdinalEncoder(OrdinalEncoder),
    OneHotEncoder(OneHotEncoder),
}

impl Stage {
    fn fit(&self, data: &Frame) -> Result<FittedStage, PreprocessingError> {
        match self {
            Stage::MinMaxScaler(t) => t.fit(data).map(FittedStage::MinMaxScaler),
            Stage::ColumnDropper(t) => t.fit(data).map(FittedStage::ColumnDropper),
            Stage::BinaryMapper(t) => t.fit(data).map(FittedStage::BinaryMapper),
            Stage::OrdinalEncoder(t) => t.fit(data).map(FittedStage::OrdinalEncoder),
            Stage::OneHotEncoder(t) => t.fit(data).map(FittedStage::OneHotEncoder),
        }
    }
}

/// A fitted step.
#[derive(Clone, Debug, PartialEq)]
pub enum FittedStage {
    /// MinMaxScaler step.
    MinMaxScaler(FittedMinMaxScaler),
    /// ColumnDropper step.
    ColumnDropper(FittedColumnDropper),
    /// BinaryMapper step.
    BinaryMapper(FittedBinaryMapper),
    /// OrdinalEncoder step.
    OrdinalEncoder(FittedOrdinalEncoder),
    /// OneHotEncoder step.
    OneHotEncoder(FittedOneHotEncoder),
}

impl PipelineStep for FittedStage {
    fn transform_step(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        match self {
            FittedStage::MinMaxScaler(t) => t.transform(data),
            FittedStage::ColumnDropper(t) => t.transform(data),
            FittedStage::BinaryMapper(t) => t.transform(data),
            FittedStage::OrdinalEncoder(t) => t.transform(data),
            FittedStage::OneHotEncoder(t) => t.transform(data),
        }
    }

    fn step_name(&self) -> &'static str {
        match self {
            FittedStage::MinMaxScaler(_) => "MinMaxScaler",
            FittedStage::ColumnDropper(_) => "ColumnDropper",
            FittedStage::BinaryMapper(_) => "BinaryMapper",
            FittedStage::OrdinalEncoder(_) => "OrdinalEncoder",
            FittedStage::OneHotEncoder(_) => "OneHotEncoder",
        }
    }
}

impl FittedStage {
    /// Columns the stage resolved at fit time.
    pub fn columns(&self) -> &[String] {
        match self {
            FittedStage::MinMaxScaler(t) => t.columns(),
            FittedStage::ColumnDropper(t) => t.columns(),
            FittedStage::BinaryMapper(t) => t.columns(),
            FittedStage::OrdinalEncoder(t) => t.columns(),
            FittedStage::OneHotEncoder(t) => t.columns(),
        }
    }

    fn extract_params(&self) -> StageParams {
        match self {
            FittedStage::MinMaxScaler(t) => StageParams::MinMaxScaler(t.extract_params()),
            FittedStage::ColumnDropper(t) => StageParams::ColumnDropper(t.extract_params()),
            FittedStage::BinaryMapper(t) => StageParams::BinaryMapper(t.extract_params()),
            FittedStage::OrdinalEncoder(t) => StageParams::OrdinalEncoder(t.extract_params()),
            FittedStage::OneHotEncoder(t) => StageParams::OneHotEncoder(t.extract_params()),
        }
    }

    fn from_params(params: StageParams) -> Result<Self, PreprocessingError> {
        Ok(match params {
            StageParams::MinMaxScaler(p) => {
                FittedStage::MinMaxScaler(FittedMinMaxScaler::from_params(p)?)
            }
            StageParams::ColumnDropper(p) => {
                FittedStage::ColumnDropper(FittedColumnDropper::from_params(p)?)
            }
            StageParams::BinaryMapper(p) => {
                FittedStage::BinaryMapper(FittedBinaryMapper::from_params(p)?)
            }
            StageParams::OrdinalEncoder(p) => {
                FittedStage::OrdinalEncoder(FittedOrdinalEncoder::from_params(p)?)
            }
            StageParams::OneHotEncoder(p) => {
                FittedStage::OneHotEncoder(FittedOneHotEncoder::from_params(p)?)
            }
        })
    }
}

/// Serializable parameters of one fitted step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StageParams {
    MinMaxScaler(MinMaxScalerParams),
    ColumnDropper(ColumnDropperParams),
    BinaryMapper(BinaryMapperParams),
    OrdinalEncoder(OrdinalEncoderParams),
    OneHotEncoder(OneHotEncoderParams),
}

/// Serializable representation of a fitted pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Column names of the table the pipeline was fitted on.
    pub input_columns: Vec<String>,
    /// Column names the fitted pipeline produced on that table.
    pub output_columns: Vec<String>,
    /// Fitted steps in order.
    pub steps: Vec<StageParams>,
}

/// Pipeline (unfitted).
///
/// Chains stages together, optionally followed by a training-only resampler.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    steps: Vec<Stage>,
    resampler: Option<Resampler>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The survey pipeline: scale, drop, binary-map, ordinal-encode, one-hot-encode.
    ///
    /// `MTRANS` is dropped before the one-hot stage, which therefore resolves
    /// no columns and passes the table through. Trained classifiers expect
    /// exactly this layout.
    pub fn standard() -> Self {
        Self::new()
            .add_minmax_scaler(MinMaxScaler::new())
            .add_column_dropper(ColumnDropper::new())
            .add_binary_mapper(BinaryMapper::new())
            .add_ordinal_encoder(OrdinalEncoder::new())
            .add_one_hot_encoder(OneHotEncoder::new())
    }

    /// Add a MinMaxScaler to the pipeline.
    pub fn add_minmax_scaler(mut self, scaler: MinMaxScaler) -> Self {
        self.steps.push(Stage::MinMaxScaler(scaler));
        self
    }

    /// Add a ColumnDropper to the pipeline.
    pub fn add_column_dropper(mut self, dropper: ColumnDropper) -> Self {
        self.steps.push(Stage::ColumnDropper(dropper));
        self
    }

    /// Add a BinaryMapper to the pipeline.
    pub fn add_binary_mapper(mut self, mapper: BinaryMapper) -> Self {
        self.steps.push(Stage::BinaryMapper(mapper));
        self
    }

    /// Add an OrdinalEncoder to the pipeline.
    pub fn add_ordinal_encoder(mut self, encoder: OrdinalEncoder) -> Self {
        self.steps.push(Stage::OrdinalEncoder(encoder));
        self
    }

    /// Add a OneHotEncoder to the pipeline.
    pub fn add_one_hot_encoder(mut self, encoder: OneHotEncoder) -> Self {
        self.steps.push(Stage::OneHotEncoder(encoder));
        self
    }

    /// Resample the final training table in [`Transformer::fit_transform`].
    pub fn with_resampler(mut self, resampler: Resampler) -> Self {
        self.resampler = Some(resampler);
        self
    }

    /// The configured resampler, if any.
    pub fn resampler(&self) -> Option<&Resampler> {
        self.resampler.as_ref()
    }

    /// Get the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fit every step and return the fitted pipeline with the transformed table.
    pub fn fit_with_output(
        &self,
        data: &Frame,
    ) -> Result<(FittedPipeline, Frame), PreprocessingError> {
        if self.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot fit an empty pipeline".to_string(),
            ));
        }
        if data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit pipeline on empty data".to_string(),
            ));
        }

        let mut fitted_steps = Vec::with_capacity(self.steps.len());
        let mut current = data.clone();
        for step in &self.steps {
            let fitted = step.fit(&current)?;
            current = fitted.transform_step(&current)?;
            debug!(
                step = fitted.step_name(),
                columns = current.n_cols(),
                "fitted pipeline step"
            );
            fitted_steps.push(fitted);
        }

        let pipeline = FittedPipeline {
            steps: fitted_steps,
            input_columns: data.column_names().to_vec(),
            output_columns: current.column_names().to_vec(),
        };
        info!(
            steps = ?pipeline.step_names(),
            rows = data.n_rows(),
            output_columns = current.n_cols(),
            "pipeline fitted"
        );
        Ok((pipeline, current))
    }
}

impl Transformer for Pipeline {
    type Params = PipelineParams;
    type Fitted = FittedPipeline;

    fn fit(&self, data: &Frame) -> Result<Self::Fitted, PreprocessingError> {
        self.fit_with_output(data).map(|(fitted, _)| fitted)
    }

    fn fit_transform(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        let (_, output) = self.fit_with_output(data)?;
        match &self.resampler {
            Some(resampler) => resampler.fit_transform(&output),
            None => Ok(output),
        }
    }
}

/// Fitted Pipeline ready for inference.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedPipeline {
    steps: Vec<FittedStage>,
    input_columns: Vec<String>,
    output_columns: Vec<String>,
}

impl FittedPipeline {
    /// Get the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the names of all steps in the pipeline.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }

    /// Fitted steps in order.
    pub fn steps(&self) -> &[FittedStage] {
        &self.steps
    }

    /// Columns produced on the training table.
    pub fn output_columns(&self) -> &[String] {
        &self.output_columns
    }
}

impl FittedTransformer for FittedPipeline {
    type Params = PipelineParams;

    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        let mut result = data.clone();
        for step in &self.steps {
            result = step.transform_step(&result)?;
        }
        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        PipelineParams {
            input_columns: self.input_columns.clone(),
            output_columns: self.output_columns.clone(),
            steps: self.steps.iter().map(FittedStage::extract_params).collect(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Pipeline parameters contain no steps".to_string(),
            ));
        }
        let steps = params
            .steps
            .into_iter()
            .map(FittedStage::from_params)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            steps,
            input_columns: params.input_columns,
            output_columns: params.output_columns,
        })
    }

    fn columns(&self) -> &[String] {
        &self.input_columns
    }
}
