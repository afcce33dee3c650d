//! Tabular data abstractions for the preprocessing stages.
//!
//! # Core Concepts
//!
//! - **Value** - one cell: a number, a text level, or a missing marker.
//! - **Frame** - an ordered collection of named, equally long columns. Stages add,
//!   remove and rewrite columns; the row count only changes during resampling.
//!
//! # Example
//!
//! ```rust
//! use habitrisk::dataset::{Frame, Value};
//!
//! let frame = Frame::from_columns(vec![
//!     ("Age".to_string(), vec![Value::from(21.0), Value::from(34.0)]),
//!     ("MTRANS".to_string(), vec![Value::from("Walking"), Value::from("Bike")]),
//! ])
//! .unwrap();
//!
//! assert_eq!(frame.shape(), (2, 2));
//! assert!(frame.has_column("MTRANS"));
//! ```

mod frame;
pub mod io;
mod value;

pub use frame::Frame;
pub use io::{read_csv, read_csv_path, write_csv, write_csv_path};
pub use value::Value;
