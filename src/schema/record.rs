//! Survey records and field-level validation.

use crate::dataset::{Frame, Value};
use crate::preprocessing::error::PreprocessingError;
use crate::schema::{self, vocabulary};
use serde::{Deserialize, Serialize};
use std::fmt;

const AGE_RANGE: (f64, f64) = (0.0, 120.0);
const HEIGHT_RANGE: (f64, f64) = (0.5, 2.5);
const WEIGHT_RANGE: (f64, f64) = (10.0, 300.0);

/// One survey answer set, as received from callers.
///
/// Height is in metres, weight in kilograms. Categorical answers are the
/// vocabulary tokens listed in [`vocabulary`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveyRecord {
    pub gender: String,
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub family_history: String,
    pub favc: String,
    pub fcvc: String,
    pub ncp: String,
    pub caec: String,
    pub smoke: String,
    #[serde(alias = "ch20")]
    pub ch2o: String,
    pub scc: String,
    pub faf: String,
    pub calc: String,
    pub mtrans: String,
}

/// How validation treats tokens outside a column's vocabulary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyPolicy {
    /// Accept any non-empty token; the stages encode unknowns to sentinels.
    #[default]
    Permissive,
    /// Reject tokens outside the vocabulary before the pipeline runs.
    Strict,
}

/// A single rejected field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl SurveyRecord {
    /// `(json field, table column, answer)` for every categorical answer.
    fn categorical(&self) -> [(&'static str, &'static str, &str); 12] {
        [
            ("gender", schema::GENDER, self.gender.as_str()),
            ("family_history", schema::FAMILY_HISTORY, self.family_history.as_str()),
            ("favc", schema::FAVC, self.favc.as_str()),
            ("fcvc", schema::FCVC, self.fcvc.as_str()),
            ("ncp", schema::NCP, self.ncp.as_str()),
            ("caec", schema::CAEC, self.caec.as_str()),
            ("smoke", schema::SMOKE, self.smoke.as_str()),
            ("ch2o", schema::CH2O, self.ch2o.as_str()),
            ("scc", schema::SCC, self.scc.as_str()),
            ("faf", schema::FAF, self.faf.as_str()),
            ("calc", schema::CALC, self.calc.as_str()),
            ("mtrans", schema::MTRANS, self.mtrans.as_str()),
        ]
    }

    /// Check ranges and tokens. An empty list means the record is valid.
    pub fn validate(&self, policy: VocabularyPolicy) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for (field, value, (lo, hi), unit) in [
            ("age", self.age, AGE_RANGE, "years"),
            ("height", self.height, HEIGHT_RANGE, "m"),
            ("weight", self.weight, WEIGHT_RANGE, "kg"),
        ] {
            if !value.is_finite() || value < lo || value > hi {
                errors.push(FieldError::new(
                    field,
                    format!("must be between {} and {} {}, got {}", lo, hi, unit, value),
                ));
            }
        }
        if (AGE_RANGE.0..=AGE_RANGE.1).contains(&self.age) && self.age.fract() != 0.0 {
            errors.push(FieldError::new(
                "age",
                format!("must be a whole number of years, got {}", self.age),
            ));
        }

        for (field, column, answer) in self.categorical() {
            if answer.trim().is_empty() {
                errors.push(FieldError::new(field, "must not be empty"));
                continue;
            }
            if policy == VocabularyPolicy::Strict {
                if let Some(levels) = vocabulary::accepted_levels(column) {
                    if !levels.contains(&answer) {
                        errors.push(FieldError::new(
                            field,
                            format!("'{}' is not one of {}", answer, levels.join(", ")),
                        ));
                    }
                }
            }
        }

        errors
    }

    /// Cells in [`schema::FEATURE_COLUMNS`] order.
    fn cells(&self) -> [Value; 15] {
        [
            Value::from(self.gender.as_str()),
            Value::Number(self.age),
            Value::Number(self.height),
            Value::Number(self.weight),
            Value::from(self.family_history.as_str()),
            Value::from(self.favc.as_str()),
            Value::from(self.fcvc.as_str()),
            Value::from(self.ncp.as_str()),
            Value::from(self.caec.as_str()),
            Value::from(self.smoke.as_str()),
            Value::from(self.ch2o.as_str()),
            Value::from(self.scc.as_str()),
            Value::from(self.faf.as_str()),
            Value::from(self.calc.as_str()),
            Value::from(self.mtrans.as_str()),
        ]
    }

    /// A one-row table, with a placeholder target column when given.
    pub fn to_frame(&self, placeholder_target: Option<&str>) -> Result<Frame, PreprocessingError> {
        frame_from_records(std::slice::from_ref(self), placeholder_target)
    }
}

/// A table with one row per record, in record order.
pub fn frame_from_records(
    records: &[SurveyRecord],
    placeholder_target: Option<&str>,
) -> Result<Frame, PreprocessingError> {
    let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(records.len()); 15];
    for record in records {
        for (column, cell) in columns.iter_mut().zip(record.cells()) {
            column.push(cell);
        }
    }

    let mut frame = Frame::from_columns(
        schema::FEATURE_COLUMNS
            .iter()
            .map(|name| name.to_string())
            .zip(columns)
            .collect(),
    )?;
    if let Some(target) = placeholder_target {
        frame.push_column(schema::TARGET, vec![Value::from(target); records.len()])?;
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::example_record;

    #[test]
    fn test_example_record_is_valid() {
        let record = example_record();
        assert!(record.validate(VocabularyPolicy::Strict).is_empty());
        assert!(record.validate(VocabularyPolicy::Permissive).is_empty());
    }

    #[test]
    fn test_out_of_range_numbers() {
        let mut record = example_record();
        record.age = 130.0;
        record.height = 170.0;
        record.weight = f64::NAN;
        let fields: Vec<String> = record
            .validate(VocabularyPolicy::Permissive)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["age", "height", "weight"]);
    }

    #[test]
    fn test_fractional_age_rejected() {
        let json = r#"{
            "gender": "Male", "age": 25.7, "height": 1.8, "weight": 80,
            "family_history": "No", "favc": "Yes", "fcvc": "Always", "ncp": "2 meals",
            "caec": "No", "smoke": "No", "ch2o": "1-2L", "scc": "No",
            "faf": "2-3 days", "calc": "Sometimes", "mtrans": "Walking"
        }"#;
        let record: SurveyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.age, 25.7);
        for policy in [VocabularyPolicy::Permissive, VocabularyPolicy::Strict] {
            let errors = record.validate(policy);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "age");
            assert!(errors[0].message.contains("whole number"));
        }
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut record = example_record();
        record.mtrans = "  ".to_string();
        let errors = record.validate(VocabularyPolicy::Permissive);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "mtrans");
    }

    #[test]
    fn test_unknown_token_only_rejected_when_strict() {
        let mut record = example_record();
        record.ch2o = "3L".to_string();
        assert!(record.validate(VocabularyPolicy::Permissive).is_empty());
        let errors = record.validate(VocabularyPolicy::Strict);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "ch2o");
        assert!(errors[0].message.contains("Up to 1L"));
    }

    #[test]
    fn test_json_alias_and_unknown_keys() {
        let json = r#"{
            "gender": "Male", "age": 30, "height": 1.8, "weight": 80,
            "family_history": "No", "favc": "Yes", "fcvc": "Always", "ncp": "2 meals",
            "caec": "No", "smoke": "No", "ch20": "2L+", "scc": "No",
            "faf": "0-1 days", "calc": "Sometimes", "mtrans": "Walking"
        }"#;
        let record: SurveyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.ch2o, "2L+");

        let extra = json.replace("\"mtrans\"", "\"bmi\": 24.7, \"mtrans\"");
        assert!(serde_json::from_str::<SurveyRecord>(&extra).is_err());
    }

    #[test]
    fn test_to_frame_with_placeholder() {
        let frame = example_record().to_frame(Some("Normal_Weight")).unwrap();
        assert_eq!(frame.shape(), (1, 16));
        assert_eq!(frame.column_names()[15], schema::TARGET);
        assert_eq!(frame.column(schema::AGE).unwrap()[0], Value::Number(25.0));
        assert_eq!(
            frame.column(schema::CH2O).unwrap()[0],
            Value::Text("1-2L".to_string())
        );
    }

    #[test]
    fn test_frame_from_records_without_target() {
        let records = vec![example_record(), example_record()];
        let frame = frame_from_records(&records, None).unwrap();
        assert_eq!(frame.shape(), (2, 15));
        assert!(!frame.has_column(schema::TARGET));
    }
}
