//! Cell values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single table cell.
///
/// Raw survey answers arrive as [`Value::Text`]; the stages rewrite them into
/// [`Value::Number`]. [`Value::Missing`] marks a cell no stage could make sense of.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A numeric cell.
    Number(f64),
    /// A textual category level.
    Text(String),
    /// An undefined cell.
    Missing,
}

impl Value {
    /// Numeric content, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// Text content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether the cell is [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The category key used by encoders: text as-is, numbers in display form.
    pub fn category_key(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Number(x) => Some(x.to_string()),
            Value::Missing => None,
        }
    }

    /// Parse a raw CSV cell. Empty and non-finite cells are missing, numeric cells become numbers.
    pub fn parse_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(x) if x.is_finite() => Value::Number(x),
            Ok(_) => Value::Missing,
            Err(_) => Value::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::Missing => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(x as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
