//! CSV loading and writing for training tables.
//!
//! The header row names the columns; every cell is parsed with
//! [`Value::parse_cell`], so numeric columns come back as numbers and
//! survey answers as text.

use crate::dataset::{Frame, Value};
use crate::preprocessing::error::PreprocessingError;
use csv::{ReaderBuilder, Trim, Writer};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Read a frame from CSV.
pub fn read_csv<R: Read>(reader: R) -> Result<Frame, PreprocessingError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() != headers.len() {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} fields", headers.len()),
                got: format!("{} fields on data line {}", record.len(), line + 1),
            });
        }
        for (col, cell) in columns.iter_mut().zip(record.iter()) {
            col.push(Value::parse_cell(cell));
        }
    }

    Frame::from_columns(headers.into_iter().zip(columns).collect())
}

/// Read a frame from a CSV file.
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<Frame, PreprocessingError> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file))
}

/// Write a frame as CSV. Missing cells are written as empty fields.
pub fn write_csv<W: Write>(frame: &Frame, writer: W) -> Result<(), PreprocessingError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(frame.column_names())?;
    for row in 0..frame.n_rows() {
        let cells: Vec<String> = frame
            .iter_columns()
            .map(|(_, values)| values[row].to_string())
            .collect();
        wtr.write_record(&cells)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a frame to a CSV file.
pub fn write_csv_path<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<(), PreprocessingError> {
    let file = File::create(path)?;
    write_csv(frame, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Gender,Age,Height,MTRANS
Female,21,1.62,Public Transport
Male,23,1.80,Walking
Male,,1.75,Automobile
";

    #[test]
    fn test_read_csv_types() {
        let frame = read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(frame.shape(), (3, 4));
        assert_eq!(frame.column("Age").unwrap()[0], Value::Number(21.0));
        assert_eq!(frame.column("Age").unwrap()[2], Value::Missing);
        assert_eq!(
            frame.column("MTRANS").unwrap()[0],
            Value::Text("Public Transport".to_string())
        );
    }

    #[test]
    fn test_read_csv_non_finite_cells_missing() {
        let raw = "Age,Obesity\nNaN,Normal_Weight\n22,inf\n";
        let frame = read_csv(raw.as_bytes()).unwrap();
        assert_eq!(frame.column("Age").unwrap()[0], Value::Missing);
        assert_eq!(frame.column("Obesity").unwrap()[1], Value::Missing);
    }

    #[test]
    fn test_read_csv_ragged_line() {
        let ragged = "a,b\n1,2\n3\n";
        let result = read_csv(ragged.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_then_read() {
        let frame = read_csv(SAMPLE.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_csv(&frame, &mut buf).unwrap();
        let again = read_csv(buf.as_slice()).unwrap();
        assert_eq!(frame, again);
    }
}
