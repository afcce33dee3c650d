//! Ordered category vocabularies and binary tokens.

use crate::schema;

pub const FCVC_LEVELS: [&str; 3] = ["Never", "Sometimes", "Always"];
pub const NCP_LEVELS: [&str; 4] = ["1 meal", "2 meals", "3 meals", "4+ meals"];
pub const CAEC_LEVELS: [&str; 4] = ["No", "Sometimes", "Frequently", "Always"];
pub const CH2O_LEVELS: [&str; 3] = ["Up to 1L", "1-2L", "2L+"];
pub const FAF_LEVELS: [&str; 4] = ["0-1 days", "2-3 days", "4-5 days", "5+ days"];
pub const CALC_LEVELS: [&str; 4] = ["No", "Sometimes", "Frequently", "Always"];
pub const OBESITY_LEVELS: [&str; 7] = [
    "Insufficient_Weight",
    "Normal_Weight",
    "Overweight_Level_I",
    "Overweight_Level_II",
    "Obesity_Type_I",
    "Obesity_Type_II",
    "Obesity_Type_III",
];

/// Nominal levels of the transport column. Unordered.
pub const MTRANS_LEVELS: [&str; 5] = [
    "Public Transport",
    "Walking",
    "Automobile",
    "Motorbike",
    "Bike",
];

pub const YES: &str = "Yes";
pub const NO: &str = "No";
pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";

/// The ordered vocabulary of an ordinal column, if it has one.
pub fn ordered_levels(column: &str) -> Option<&'static [&'static str]> {
    match column {
        schema::FCVC => Some(&FCVC_LEVELS),
        schema::NCP => Some(&NCP_LEVELS),
        schema::CAEC => Some(&CAEC_LEVELS),
        schema::CH2O => Some(&CH2O_LEVELS),
        schema::FAF => Some(&FAF_LEVELS),
        schema::CALC => Some(&CALC_LEVELS),
        schema::TARGET => Some(&OBESITY_LEVELS),
        _ => None,
    }
}

/// Every accepted token of a categorical input column, ordered or not.
pub fn accepted_levels(column: &str) -> Option<&'static [&'static str]> {
    const YES_NO: [&str; 2] = [NO, YES];
    const GENDERS: [&str; 2] = [MALE, FEMALE];
    match column {
        schema::MTRANS => Some(&MTRANS_LEVELS),
        schema::GENDER => Some(&GENDERS),
        schema::FAMILY_HISTORY | schema::FAVC | schema::SMOKE | schema::SCC => Some(&YES_NO),
        other => ordered_levels(other),
    }
}

/// Zero-based rank of `level` in the column's vocabulary.
pub fn rank(column: &str, level: &str) -> Option<usize> {
    ordered_levels(column)?.iter().position(|l| *l == level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_intake_order() {
        assert_eq!(rank(schema::CH2O, "Up to 1L"), Some(0));
        assert_eq!(rank(schema::CH2O, "1-2L"), Some(1));
        assert_eq!(rank(schema::CH2O, "2L+"), Some(2));
        assert_eq!(rank(schema::CH2O, "3L"), None);
    }

    #[test]
    fn test_every_ordinal_column_has_levels() {
        for column in schema::ORDINAL_COLUMNS {
            assert!(ordered_levels(column).is_some(), "{}", column);
        }
        assert!(ordered_levels(schema::MTRANS).is_none());
    }

    #[test]
    fn test_accepted_levels_cover_inputs() {
        assert_eq!(accepted_levels(schema::SMOKE), Some(&[NO, YES][..]));
        assert_eq!(accepted_levels(schema::MTRANS).map(<[_]>::len), Some(5));
        assert!(accepted_levels(schema::AGE).is_none());
    }
}
