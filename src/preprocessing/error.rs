//! Error types for preprocessing operations.

use thiserror::Error;

/// Error type for preprocessing operations.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// Shape mismatch between expected and actual table dimensions.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },
    /// Numerical computation error (non-finite bounds, overflow).
    #[error("Numerical error: {0}")]
    NumericalError(String),
    /// Data contains missing values where none are allowed.
    #[error("Missing values: {0}")]
    MissingValues(String),
    /// Invalid stage configuration or fitted parameters.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(String),
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// A column required by the operation is not in the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    /// A text cell where a number was required.
    #[error("Non-numeric value '{value}' in column '{column}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
}

impl From<std::io::Error> for PreprocessingError {
    fn from(err: std::io::Error) -> Self {
        PreprocessingError::IoError(err.to_string())
    }
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for PreprocessingError {
    fn from(err: csv::Error) -> Self {
        PreprocessingError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_shape() {
        let err = PreprocessingError::InvalidShape {
            expected: "1 rows".to_string(),
            got: "2 rows".to_string(),
        };
        assert!(err.to_string().contains("Invalid shape"));
    }

    #[test]
    fn test_error_display_invalid_parameter() {
        let err = PreprocessingError::InvalidParameter("bad param".to_string());
        assert!(err.to_string().contains("Invalid parameter"));
    }

    #[test]
    fn test_error_display_empty_data() {
        let err = PreprocessingError::EmptyData("no rows".to_string());
        assert!(err.to_string().contains("Empty data"));
    }

    #[test]
    fn test_error_display_non_numeric() {
        let err = PreprocessingError::NonNumeric {
            column: "Age".to_string(),
            row: 3,
            value: "old".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Age"));
        assert!(msg.contains("row 3"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: PreprocessingError = io_err.into();
        assert!(matches!(err, PreprocessingError::IoError(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PreprocessingError::ColumnNotFound("MTRANS".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_error_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let bincode_result: Result<String, bincode::Error> = bincode::deserialize(bad_bytes);
        if let Err(e) = bincode_result {
            let err: PreprocessingError = e.into();
            assert!(matches!(err, PreprocessingError::SerializationError(_)));
        }
    }
}
