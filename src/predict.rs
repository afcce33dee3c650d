//! Prediction orchestration.
//!
//! A [`Predictor`] owns a fitted pipeline and a classifier, both loaded once at
//! startup. Each call validates a record, builds a one-row table with a
//! placeholder target, replays the pipeline, strips the target, runs the
//! classifier and maps the class onto a risk band.

use crate::model::{Classifier, ModelError};
use crate::preprocessing::{FittedPipeline, FittedTransformer, PreprocessingError};
use crate::schema::{self, FieldError, ObesityClass, RiskBand, SurveyRecord, VocabularyPolicy};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Placeholder target used when building request tables.
pub const DEFAULT_PLACEHOLDER_TARGET: &str = "Normal_Weight";

/// Errors raised while serving a prediction.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid record: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
    #[error(transparent)]
    Preprocessing(#[from] PreprocessingError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("classifier returned {0} predictions for a single record")]
    UnexpectedPredictionCount(usize),
    #[error("classifier returned class {0}, outside the known classes")]
    UnmappedClass(i64),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The outcome of one prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub class: ObesityClass,
    pub band: RiskBand,
}

impl Prediction {
    /// Map a raw class index onto the taxonomy and its band.
    pub fn from_class_index(index: i64) -> Result<Self, PredictError> {
        let class = ObesityClass::from_index(index).ok_or(PredictError::UnmappedClass(index))?;
        Ok(Self {
            class,
            band: class.band(),
        })
    }

    /// Caller-facing message.
    pub fn message(&self) -> &'static str {
        self.band.message()
    }
}

/// Serves predictions for single records.
pub struct Predictor<C> {
    pipeline: FittedPipeline,
    classifier: C,
    placeholder_target: String,
    policy: VocabularyPolicy,
}

impl<C: Classifier> Predictor<C> {
    pub fn new(pipeline: FittedPipeline, classifier: C) -> Self {
        Self {
            pipeline,
            classifier,
            placeholder_target: DEFAULT_PLACEHOLDER_TARGET.to_string(),
            policy: VocabularyPolicy::default(),
        }
    }

    /// Target value written into request tables before transforming.
    pub fn with_placeholder_target(mut self, target: impl Into<String>) -> Self {
        self.placeholder_target = target.into();
        self
    }

    pub fn with_vocabulary_policy(mut self, policy: VocabularyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn pipeline(&self) -> &FittedPipeline {
        &self.pipeline
    }

    /// Predict the risk band for one record.
    pub fn predict(&self, record: &SurveyRecord) -> Result<Prediction, PredictError> {
        let errors = record.validate(self.policy);
        if !errors.is_empty() {
            return Err(PredictError::Validation(errors));
        }

        let frame = record.to_frame(Some(self.placeholder_target.as_str()))?;
        let mut transformed = self.pipeline.transform(&frame)?;
        if transformed.has_column(schema::TARGET) {
            transformed = transformed.without_columns(&[schema::TARGET.to_string()]);
        }
        let x = transformed.to_matrix()?;
        debug!(features = x.ncols(), "request transformed");

        let classes = self.classifier.predict(x.view())?;
        let [class] = classes.as_slice() else {
            return Err(PredictError::UnexpectedPredictionCount(classes.len()));
        };
        let prediction = Prediction::from_class_index(*class)?;
        debug!(class = %prediction.class, band = ?prediction.band, "prediction served");
        Ok(prediction)
    }
}
