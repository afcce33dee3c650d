//! Target classes and the caller-facing risk bands.

use crate::schema::vocabulary::OBESITY_LEVELS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven ordered target classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObesityClass {
    InsufficientWeight,
    NormalWeight,
    OverweightLevelI,
    OverweightLevelII,
    ObesityTypeI,
    ObesityTypeII,
    ObesityTypeIII,
}

impl ObesityClass {
    /// All classes, ordered by index.
    pub const ALL: [ObesityClass; 7] = [
        ObesityClass::InsufficientWeight,
        ObesityClass::NormalWeight,
        ObesityClass::OverweightLevelI,
        ObesityClass::OverweightLevelII,
        ObesityClass::ObesityTypeI,
        ObesityClass::ObesityTypeII,
        ObesityClass::ObesityTypeIII,
    ];

    /// The class for a raw model output, or `None` outside [0, 6].
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Position in the ordered taxonomy.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Dataset label, e.g. `Overweight_Level_I`.
    pub fn label(self) -> &'static str {
        OBESITY_LEVELS[self.index()]
    }

    /// Parse a dataset label.
    pub fn from_label(label: &str) -> Option<Self> {
        OBESITY_LEVELS
            .iter()
            .position(|l| *l == label)
            .map(|i| Self::ALL[i])
    }

    /// The risk band this class falls in.
    pub fn band(self) -> RiskBand {
        RiskBand::from_class(self)
    }
}

impl fmt::Display for ObesityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tri-band grouping of the seven classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Underweight,
    NoRisk,
    ObesityRisk,
}

impl RiskBand {
    pub fn from_class(class: ObesityClass) -> Self {
        match class {
            ObesityClass::InsufficientWeight => RiskBand::Underweight,
            ObesityClass::NormalWeight
            | ObesityClass::OverweightLevelI
            | ObesityClass::OverweightLevelII => RiskBand::NoRisk,
            ObesityClass::ObesityTypeI
            | ObesityClass::ObesityTypeII
            | ObesityClass::ObesityTypeIII => RiskBand::ObesityRisk,
        }
    }

    /// Human-readable message returned to callers.
    pub fn message(self) -> &'static str {
        match self {
            RiskBand::Underweight => "risk of underweight",
            RiskBand::NoRisk => "no risk",
            RiskBand::ObesityRisk => "risk of developing obesity if habits continue",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
