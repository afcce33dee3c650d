//! Class-imbalance resampling for training tables.
//!
//! Resamplers run once on the fully transformed training table. They are not
//! part of a fitted pipeline and never see serving requests.

mod smote;

pub use smote::{FittedResampler, Resampler, ResamplerParams};
