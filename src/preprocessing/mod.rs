//! Data preprocessing stages for the survey pipeline.
//!
//! Every stage follows the same split between configuration and learned state.
//!
//! # Design Philosophy
//!
//! - **Explicit fitted state**: `fit` returns a separate immutable value; nothing
//!   is learned by mutating the configuration
//! - **Present-columns policy**: configured columns missing from the fit table are
//!   skipped, never an error
//! - **Permissive**: unknown category values are encoded to sentinels and logged
//! - **Serializable**: fitted stages and pipelines can be saved and loaded
//!
//! # Core Traits
//!
//! - [`Transformer`]: unfitted stage configuration
//! - [`FittedTransformer`]: fitted stage ready for inference
//!
//! # Available Stages
//!
//! ## Scaling
//! - [`MinMaxScaler`]: scale numeric columns with learned bounds
//!
//! ## Encoding
//! - [`OneHotEncoder`]: nominal levels to 0/1 columns
//! - [`OrdinalEncoder`]: ordered levels to ranks
//! - [`BinaryMapper`]: two-token columns to 0/1
//!
//! ## Selection
//! - [`ColumnDropper`]: remove columns
//!
//! ## Sampling
//! - [`Resampler`]: SMOTE oversampling of the minority class (training only)
//!
//! ## Pipeline
//! - [`Pipeline`]: chain stages together
//!
//! # Example
//!
//! ```ignore
//! use habitrisk::preprocessing::{Pipeline, Resampler, Transformer, FittedTransformer};
//!
//! let pipeline = Pipeline::standard().with_resampler(Resampler::new().with_seed(42));
//! let balanced = pipeline.fit_transform(&train)?;
//!
//! let fitted = pipeline.fit(&train)?;
//! fitted.save_to_file("pipeline.bin")?;
//!
//! let loaded = FittedPipeline::load_from_file("pipeline.bin")?;
//! let row = loaded.transform(&request)?;
//! ```

pub mod drop;
pub mod encoding;
pub mod error;
pub mod pipeline;
pub mod sampling;
pub mod scaling;
pub mod traits;

use crate::dataset::Frame;
use tracing::debug;

// Re-export main types
pub use drop::{ColumnDropper, ColumnDropperParams, FittedColumnDropper};
pub use encoding::{
    BinaryColumn, BinaryMapper, BinaryMapperParams, FittedBinaryMapper, FittedOneHotEncoder,
    FittedOrdinalEncoder, HandleUnknown, OneHotEncoder, OneHotEncoderParams, OrdinalEncoder,
    OrdinalEncoderParams, UNKNOWN_ORDINAL,
};
pub use error::PreprocessingError;
pub use pipeline::{
    FittedPipeline, FittedStage, Pipeline, PipelineParams, PipelineStep, Stage, StageParams,
};
pub use sampling::{FittedResampler, Resampler, ResamplerParams};
pub use scaling::{FittedMinMaxScaler, MinMaxScaler, MinMaxScalerConfig, MinMaxScalerParams};
pub use traits::{FittedTransformer, Transformer};

pub(crate) fn column_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// Log configured columns that the fit table does not have.
pub(crate) fn log_absent(stage: &str, configured: &[String], data: &Frame) {
    for name in configured.iter().filter(|name| !data.has_column(name)) {
        debug!(stage, column = %name, "configured column absent, skipped");
    }
}
