//! Serialization of fitted stage parameters.
//!
//! Fitted stages expose a plain-data parameter struct; this module turns such
//! structs into bytes and back without coupling the stages to a storage format.

use std::error::Error;

/// A trait for parameter representations that can be serialized to and from bytes.
///
/// Implementors should contain only plain data (column names, bounds, vocabularies),
/// never lookup tables that can be rebuilt from that data.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Bounds {
        columns: Vec<String>,
        min_: Vec<f64>,
    }

    #[test]
    fn test_params_survive_bytes() {
        let params = Bounds {
            columns: vec!["Age".to_string()],
            min_: vec![14.0],
        };
        let bytes = params.to_bytes().unwrap();
        let restored = Bounds::from_bytes(&bytes).unwrap();
        assert_eq!(params, restored);
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let result = Bounds::from_bytes(&[0xff, 0xff]);
        assert!(result.is_err());
    }
}
