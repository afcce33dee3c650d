//! Pipeline for chaining preprocessing stages.
//!
//! This module provides [`Pipeline`], the ordered chain of stages used to turn
//! raw survey tables into classifier input, and [`FittedPipeline`], its
//! immutable fitted counterpart that serving loads from disk.

#[allow(clippy::module_inception)]
mod pipeline;

pub use pipeline::{
    FittedPipeline, FittedStage, Pipeline, PipelineParams, PipelineStep, Stage, StageParams,
};
