//! # habitrisk
//!
//! Feature-transformation pipeline and risk prediction for lifestyle survey answers.
//!
//! A survey record (gender, age, height, eating and activity habits) is turned into
//! the numeric row a trained classifier expects, the classifier's class is mapped
//! onto one of three caller-facing risk messages.
//!
//! ## Core Design Principles
//!
//! - **Explicit fitted state**: every stage is split into an unfitted configuration
//!   ([`preprocessing::Transformer`]) and an immutable fitted value
//!   ([`preprocessing::FittedTransformer`]). Serving only ever calls `transform`.
//! - **Present-columns policy**: a stage silently restricts its configured columns
//!   to the ones found in the table it is fitted on.
//! - **Permissive on unknown categories**: unknown levels are encoded to a sentinel,
//!   an all-zero one-hot block or a missing marker, and logged.
//! - **Persistable artifacts**: fitted pipelines are written with `bincode` and loaded
//!   once, read-only, at startup.
//!
//! ## Quick Start
//!
//! ```no_run
//! use habitrisk::model::LinearClassifier;
//! use habitrisk::predict::Predictor;
//! use habitrisk::preprocessing::{FittedPipeline, FittedTransformer};
//! use habitrisk::schema::SurveyRecord;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = FittedPipeline::load_from_file("artifacts/pipeline.bin")?;
//! let classifier = LinearClassifier::load_from_file("artifacts/model.json")?;
//! let predictor = Predictor::new(pipeline, classifier);
//!
//! let record: SurveyRecord = serde_json::from_str(r#"{
//!     "gender": "Female", "age": 25, "height": 1.70, "weight": 60.0,
//!     "family_history": "Yes", "favc": "No", "fcvc": "Sometimes", "ncp": "3 meals",
//!     "caec": "Sometimes", "smoke": "No", "ch2o": "1-2L", "scc": "No",
//!     "faf": "2-3 days", "calc": "No", "mtrans": "Public Transport"
//! }"#)?;
//!
//! let prediction = predictor.predict(&record)?;
//! println!("{}", prediction.message());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - `dataset` - the named-column [`dataset::Frame`] that flows through the stages, CSV I/O
//! - `preprocessing` - stages, their fitted states and the pipeline composer
//! - `schema` - fixed column names, category vocabularies, target classes, record validation
//! - `model` - the classifier seam and a linear classifier loaded from JSON
//! - `predict` - the prediction orchestrator
//! - `config` - application configuration
//! - `serialization` - byte encoding of fitted parameters

/// Application configuration loaded from TOML and the environment.
pub mod config;

/// Named-column tables and CSV loading.
pub mod dataset;

/// Classifier seam and bundled model implementations.
pub mod model;

/// Prediction orchestration: record in, risk message out.
pub mod predict;

/// Data preprocessing stages and the pipeline composer.
pub mod preprocessing;

/// Fixed survey schema: columns, vocabularies, classes and record validation.
pub mod schema;

/// Persistence of fitted parameters.
pub mod serialization;

pub use dataset::{Frame, Value};
pub use predict::{PredictError, Prediction, Predictor};
pub use preprocessing::{FittedPipeline, Pipeline, PreprocessingError};
