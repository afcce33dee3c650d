//! Scaling stages for numeric survey answers.
//!
//! | Stage | Description |
//! |-------|-------------|
//! | [`MinMaxScaler`] | Scale configured columns to [0, 1] or a custom range |

pub mod minmax;

pub use minmax::{FittedMinMaxScaler, MinMaxScaler, MinMaxScalerConfig, MinMaxScalerParams};
