//! Categorical Codes - Label ↔ Integer Encoding
//!
//! Fixed lookup tables for the categorical inputs, using the integer codes
//! the model was trained with. Every enum lists all variants in `ALL`, and
//! the label/code mapping is one-to-one in both directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SchemaError;

/// Shared behaviour for the categorical lookup tables
pub trait Categorical: Copy + Sized + 'static {
    /// Field name used in error messages
    const FIELD: &'static str;

    /// Every variant, in code order
    const ALL: &'static [Self];

    fn code(self) -> i32;

    fn label(self) -> &'static str;

    fn from_code(code: i32) -> Result<Self, SchemaError> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.code() == code)
            .ok_or(SchemaError::UnknownCode { field: Self::FIELD, code })
    }

    fn from_label(label: &str) -> Result<Self, SchemaError> {
        let wanted = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SchemaError::UnknownLabel {
                field: Self::FIELD,
                label: label.to_string(),
            })
    }
}

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Categorical for Gender {
    const FIELD: &'static str = "gender";
    const ALL: &'static [Self] = &[Gender::Female, Gender::Male];

    fn code(self) -> i32 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

// ============================================================================
// LEVEL (cholesterol / glucose tiers)
// ============================================================================

/// Three-tier lab level, shared by cholesterol and glucose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Normal,
    AboveNormal,
    WellAboveNormal,
}

impl Categorical for Level {
    const FIELD: &'static str = "level";
    const ALL: &'static [Self] = &[Level::Normal, Level::AboveNormal, Level::WellAboveNormal];

    fn code(self) -> i32 {
        match self {
            Level::Normal => 1,
            Level::AboveNormal => 2,
            Level::WellAboveNormal => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Level::Normal => "Normal",
            Level::AboveNormal => "Above Normal",
            Level::WellAboveNormal => "Well Above Normal",
        }
    }
}

// ============================================================================
// YES / NO (smoking, alcohol)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
}

impl Categorical for YesNo {
    const FIELD: &'static str = "yes_no";
    const ALL: &'static [Self] = &[YesNo::No, YesNo::Yes];

    fn code(self) -> i32 {
        match self {
            YesNo::No => 0,
            YesNo::Yes => 1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            YesNo::No => "No",
            YesNo::Yes => "Yes",
        }
    }
}

// ============================================================================
// ACTIVITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    Inactive,
    Active,
}

impl Categorical for Activity {
    const FIELD: &'static str = "active";
    const ALL: &'static [Self] = &[Activity::Inactive, Activity::Active];

    fn code(self) -> i32 {
        match self {
            Activity::Inactive => 0,
            Activity::Active => 1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Activity::Inactive => "Inactive",
            Activity::Active => "Active",
        }
    }
}

// ============================================================================
// FromStr / Display via labels
// ============================================================================

impl FromStr for Gender {
    type Err = SchemaError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl FromStr for Level {
    type Err = SchemaError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl FromStr for YesNo {
    type Err = SchemaError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl FromStr for Activity {
    type Err = SchemaError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_bijective<T: Categorical + PartialEq + std::fmt::Debug>() {
        let codes: HashSet<i32> = T::ALL.iter().map(|v| v.code()).collect();
        let labels: HashSet<&str> = T::ALL.iter().map(|v| v.label()).collect();
        assert_eq!(codes.len(), T::ALL.len(), "duplicate code in {}", T::FIELD);
        assert_eq!(labels.len(), T::ALL.len(), "duplicate label in {}", T::FIELD);

        for &v in T::ALL {
            assert_eq!(T::from_code(v.code()).unwrap(), v);
            assert_eq!(T::from_label(v.label()).unwrap(), v);
        }
    }

    #[test]
    fn test_all_tables_bijective() {
        assert_bijective::<Gender>();
        assert_bijective::<Level>();
        assert_bijective::<YesNo>();
        assert_bijective::<Activity>();
    }

    #[test]
    fn test_training_codes() {
        assert_eq!(Gender::Male.code(), 1);
        assert_eq!(Gender::Female.code(), 0);
        assert_eq!("Above Normal".parse::<Level>().unwrap().code(), 2);
        assert_eq!(Level::WellAboveNormal.code(), 3);
        assert_eq!(YesNo::Yes.code(), 1);
        assert_eq!(Activity::Inactive.code(), 0);
    }

    #[test]
    fn test_labels_case_insensitive() {
        assert_eq!("well above normal".parse::<Level>().unwrap(), Level::WellAboveNormal);
        assert_eq!(" male ".parse::<Gender>().unwrap(), Gender::Male);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let err = Level::from_code(4).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownCode { code: 4, .. }));
        assert!(Gender::from_code(2).is_err());
        assert!(YesNo::from_code(-1).is_err());
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!("Sometimes".parse::<YesNo>().is_err());
        assert!("".parse::<Activity>().is_err());
    }
}
