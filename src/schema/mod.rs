//! The fixed survey schema.
//!
//! Column names follow the training dataset. Category vocabularies and the
//! target taxonomy are static; stages and record validation read them from here.

mod class;
mod record;
pub mod vocabulary;

pub use class::{ObesityClass, RiskBand};
pub use record::{frame_from_records, FieldError, SurveyRecord, VocabularyPolicy};

pub const GENDER: &str = "Gender";
pub const AGE: &str = "Age";
pub const HEIGHT: &str = "Height";
pub const WEIGHT: &str = "Weight";
pub const FAMILY_HISTORY: &str = "family_history";
pub const FAVC: &str = "FAVC";
pub const FCVC: &str = "FCVC";
pub const NCP: &str = "NCP";
pub const CAEC: &str = "CAEC";
pub const SMOKE: &str = "SMOKE";
pub const CH2O: &str = "CH2O";
pub const SCC: &str = "SCC";
pub const FAF: &str = "FAF";
pub const CALC: &str = "CALC";
pub const MTRANS: &str = "MTRANS";

/// Target column.
pub const TARGET: &str = "Obesity";

/// The 15 input columns, in table order.
pub const FEATURE_COLUMNS: [&str; 15] = [
    GENDER,
    AGE,
    HEIGHT,
    WEIGHT,
    FAMILY_HISTORY,
    FAVC,
    FCVC,
    NCP,
    CAEC,
    SMOKE,
    CH2O,
    SCC,
    FAF,
    CALC,
    MTRANS,
];

/// Default min-max scaled columns.
pub const SCALED_COLUMNS: [&str; 2] = [AGE, HEIGHT];

/// Default dropped columns.
pub const DROPPED_COLUMNS: [&str; 2] = [WEIGHT, MTRANS];

/// Default yes/no columns.
pub const YES_NO_COLUMNS: [&str; 4] = [FAMILY_HISTORY, FAVC, SMOKE, SCC];

/// Default ordinal columns, target included.
pub const ORDINAL_COLUMNS: [&str; 7] = [FCVC, NCP, CAEC, CH2O, FAF, CALC, TARGET];

/// Default one-hot columns.
pub const NOMINAL_COLUMNS: [&str; 1] = [MTRANS];
