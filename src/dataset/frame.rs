//! Named-column table.

use crate::dataset::Value;
use crate::preprocessing::error::PreprocessingError;
use ndarray::Array2;

/// An ordered set of named columns with a shared row count.
///
/// Frames are cheap to clone relative to the single-row tables used in serving,
/// and every stage returns a new frame instead of mutating its input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Vec<Value>>,
    n_rows: usize,
}

impl Frame {
    /// Create an empty frame (no columns, no rows).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from `(name, values)` pairs.
    ///
    /// # Errors
    /// - [`PreprocessingError::InvalidShape`] if columns differ in length
    /// - [`PreprocessingError::InvalidParameter`] if a name is repeated
    pub fn from_columns(columns: Vec<(String, Vec<Value>)>) -> Result<Self, PreprocessingError> {
        let mut frame = Frame::new();
        for (name, values) in columns {
            frame.push_column(name, values)?;
        }
        Ok(frame)
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.names.len())
    }

    /// Column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Cells of a column.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.column_index(name).map(|idx| self.columns[idx].as_slice())
    }

    /// Cells of a column, or [`PreprocessingError::ColumnNotFound`].
    pub fn try_column(&self, name: &str) -> Result<&[Value], PreprocessingError> {
        self.column(name)
            .ok_or_else(|| PreprocessingError::ColumnNotFound(name.to_string()))
    }

    /// Iterate over `(name, cells)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Cells of one row, in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&Value>> {
        if idx >= self.n_rows {
            return None;
        }
        Some(self.columns.iter().map(|col| &col[idx]).collect())
    }

    /// Restrict `configured` to the columns present in this frame, keeping its order.
    pub fn present_columns(&self, configured: &[String]) -> Vec<String> {
        configured
            .iter()
            .filter(|name| self.has_column(name))
            .cloned()
            .collect()
    }

    /// Append a column at the end.
    ///
    /// The first column pushed into an empty frame fixes the row count.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<(), PreprocessingError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(PreprocessingError::InvalidParameter(format!(
                "Duplicate column '{}'",
                name
            )));
        }
        if self.names.is_empty() {
            self.n_rows = values.len();
        } else if values.len() != self.n_rows {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} rows in column '{}'", self.n_rows, name),
                got: format!("{} rows", values.len()),
            });
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Replace the cells of an existing column, keeping its position.
    pub fn replace_column(
        &mut self,
        name: &str,
        values: Vec<Value>,
    ) -> Result<(), PreprocessingError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| PreprocessingError::ColumnNotFound(name.to_string()))?;
        if values.len() != self.n_rows {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} rows in column '{}'", self.n_rows, name),
                got: format!("{} rows", values.len()),
            });
        }
        self.columns[idx] = values;
        Ok(())
    }

    /// A copy of the frame without the named columns. Absent names are ignored.
    pub fn without_columns(&self, names: &[String]) -> Frame {
        let mut out = Frame::new();
        out.n_rows = self.n_rows;
        for (name, values) in self.names.iter().zip(self.columns.iter()) {
            if !names.contains(name) {
                out.names.push(name.clone());
                out.columns.push(values.clone());
            }
        }
        out
    }

    /// Append rows given column-wise, matching this frame's column order.
    pub(crate) fn extend_rows(
        &mut self,
        mut extra: Vec<Vec<Value>>,
    ) -> Result<(), PreprocessingError> {
        if extra.len() != self.columns.len() {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} columns", self.columns.len()),
                got: format!("{} columns", extra.len()),
            });
        }
        let added = extra.first().map(Vec::len).unwrap_or(0);
        if extra.iter().any(|col| col.len() != added) {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} rows in every column", added),
                got: "ragged columns".to_string(),
            });
        }
        for (col, more) in self.columns.iter_mut().zip(extra.iter_mut()) {
            col.append(more);
        }
        self.n_rows += added;
        Ok(())
    }

    /// Convert the whole frame into a dense row-major matrix.
    ///
    /// Missing cells become `NaN`; text cells are rejected.
    pub fn to_matrix(&self) -> Result<Array2<f64>, PreprocessingError> {
        let (rows, cols) = self.shape();
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for (name, values) in self.names.iter().zip(self.columns.iter()) {
                match &values[row] {
                    Value::Number(x) => data.push(*x),
                    Value::Missing => data.push(f64::NAN),
                    Value::Text(s) => {
                        return Err(PreprocessingError::NonNumeric {
                            column: name.clone(),
                            row,
                            value: s.clone(),
                        })
                    }
                }
            }
        }
        Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| PreprocessingError::InvalidShape {
                expected: format!("({}, {})", rows, cols),
                got: e.to_string(),
            })
    }
}
