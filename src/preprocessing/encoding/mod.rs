//! Categorical encoding stages.
//!
//! # Available Encoders
//!
//! ## OneHotEncoder
//! Replaces a nominal text column with one 0/1 column per learned level.
//!
//! ```text
//! MTRANS = "Walking"  ->  MTRANS_Automobile = 0, MTRANS_Walking = 1
//! ```
//!
//! ## OrdinalEncoder
//! Maps ordered text levels to their rank in a fixed vocabulary.
//!
//! ## BinaryMapper
//! Maps two-token columns (`No`/`Yes`, `Male`/`Female`) to 0/1.
//!
//! # Unknown values
//!
//! Every encoder tolerates values it has not seen: one-hot emits an all-zero
//! block, ordinal emits `-1`, binary emits a missing cell. Each occurrence is
//! logged at warn level. [`HandleUnknown::Error`] turns the one-hot and ordinal
//! cases into errors instead.

mod binary;
mod one_hot;
mod ordinal;

pub use binary::{BinaryColumn, BinaryMapper, BinaryMapperParams, FittedBinaryMapper};
pub use one_hot::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderParams};
pub use ordinal::{FittedOrdinalEncoder, OrdinalEncoder, OrdinalEncoderParams, UNKNOWN_ORDINAL};

/// Strategy for handling unknown categories during transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HandleUnknown {
    /// Raise an error when unknown categories are encountered.
    Error,
    /// Encode unknown categories to the stage's sentinel and log them.
    #[default]
    Ignore,
}
