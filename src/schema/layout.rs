//! Feature Layout - Column Definitions and Ordered Records
//!
//! **The model's declared feature names are the source of truth.**
//!
//! ## Rules:
//! 1. The adapter only produces columns listed in [`FeatureColumn`]
//! 2. A schema is always built from the artifact's `feature_names`, in order
//! 3. A record is only valid for the schema that assembled it
//!
//! Two layouts are known from training: the 7-column `compact` layout served
//! by the API model, and the 13-column `extended` layout that also carries
//! the derived `bmi` and `pulse_pressure`.

use std::fmt;
use std::str::FromStr;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::codes::Categorical;
use super::input::PatientInput;
use super::SchemaError;
use crate::features::DerivedFeatures;

// ============================================================================
// COLUMNS
// ============================================================================

/// Every column the adapter knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureColumn {
    Age,
    Gender,
    Height,
    Weight,
    Bmi,
    ApHi,
    ApLo,
    Cholesterol,
    Gluc,
    Smoke,
    Alco,
    Active,
    PulsePressure,
}

impl FeatureColumn {
    pub const ALL: &'static [FeatureColumn] = &[
        FeatureColumn::Age,
        FeatureColumn::Gender,
        FeatureColumn::Height,
        FeatureColumn::Weight,
        FeatureColumn::Bmi,
        FeatureColumn::ApHi,
        FeatureColumn::ApLo,
        FeatureColumn::Cholesterol,
        FeatureColumn::Gluc,
        FeatureColumn::Smoke,
        FeatureColumn::Alco,
        FeatureColumn::Active,
        FeatureColumn::PulsePressure,
    ];

    /// Column name used at training time
    pub fn name(self) -> &'static str {
        match self {
            FeatureColumn::Age => "age",
            FeatureColumn::Gender => "gender",
            FeatureColumn::Height => "height",
            FeatureColumn::Weight => "weight",
            FeatureColumn::Bmi => "bmi",
            FeatureColumn::ApHi => "ap_hi",
            FeatureColumn::ApLo => "ap_lo",
            FeatureColumn::Cholesterol => "cholesterol",
            FeatureColumn::Gluc => "gluc",
            FeatureColumn::Smoke => "smoke",
            FeatureColumn::Alco => "alco",
            FeatureColumn::Active => "active",
            FeatureColumn::PulsePressure => "pulse_pressure",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, SchemaError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| SchemaError::UnknownColumn(name.to_string()))
    }

    /// Numeric value fed to the model for this column
    pub fn value(self, input: &PatientInput, derived: &DerivedFeatures) -> f64 {
        match self {
            FeatureColumn::Age => input.age as f64,
            FeatureColumn::Gender => input.gender.code() as f64,
            FeatureColumn::Height => input.height_cm as f64,
            FeatureColumn::Weight => input.weight_kg,
            FeatureColumn::Bmi => derived.bmi,
            FeatureColumn::ApHi => input.ap_hi as f64,
            FeatureColumn::ApLo => input.ap_lo as f64,
            FeatureColumn::Cholesterol => input.cholesterol.code() as f64,
            FeatureColumn::Gluc => input.gluc.code() as f64,
            FeatureColumn::Smoke => input.smoke.code() as f64,
            FeatureColumn::Alco => input.alco.code() as f64,
            FeatureColumn::Active => input.active.code() as f64,
            FeatureColumn::PulsePressure => derived.pulse_pressure as f64,
        }
    }
}

impl fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// KNOWN LAYOUTS
// ============================================================================

/// Columns of the deployed API model
pub const COMPACT_LAYOUT: &[FeatureColumn] = &[
    FeatureColumn::Gender,
    FeatureColumn::Height,
    FeatureColumn::Weight,
    FeatureColumn::ApHi,
    FeatureColumn::ApLo,
    FeatureColumn::Cholesterol,
    FeatureColumn::Gluc,
];

/// Columns of the full model, derived features included
pub const EXTENDED_LAYOUT: &[FeatureColumn] = &[
    FeatureColumn::Age,
    FeatureColumn::Gender,
    FeatureColumn::Height,
    FeatureColumn::Weight,
    FeatureColumn::Bmi,
    FeatureColumn::ApHi,
    FeatureColumn::ApLo,
    FeatureColumn::Cholesterol,
    FeatureColumn::Gluc,
    FeatureColumn::Smoke,
    FeatureColumn::Alco,
    FeatureColumn::Active,
    FeatureColumn::PulsePressure,
];

/// Named layout an operator can pin with `FEATURE_SCHEMA`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Compact,
    Extended,
}

impl LayoutKind {
    pub fn columns(self) -> &'static [FeatureColumn] {
        match self {
            LayoutKind::Compact => COMPACT_LAYOUT,
            LayoutKind::Extended => EXTENDED_LAYOUT,
        }
    }

    pub fn schema(self) -> FeatureSchema {
        FeatureSchema { columns: self.columns().to_vec() }
    }
}

impl FromStr for LayoutKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LayoutKind::Compact),
            "extended" => Ok(LayoutKind::Extended),
            other => Err(SchemaError::UnknownLayout(other.to_string())),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Compact => f.write_str("compact"),
            LayoutKind::Extended => f.write_str("extended"),
        }
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Ordered list of columns a model expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
}

impl FeatureSchema {
    /// Validate a declared schema (artifact `feature_names`)
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let column = FeatureColumn::from_name(name.as_ref())?;
            if columns.contains(&column) {
                return Err(SchemaError::DuplicateColumn(column.name().to_string()));
            }
            columns.push(column);
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Which known layout this is, if any
    pub fn kind(&self) -> Option<LayoutKind> {
        [LayoutKind::Compact, LayoutKind::Extended]
            .into_iter()
            .find(|k| k.columns() == self.columns.as_slice())
    }

    /// Fail unless this schema is exactly the pinned layout
    pub fn ensure_matches(&self, pinned: LayoutKind) -> Result<(), SchemaError> {
        if self.columns.as_slice() == pinned.columns() {
            return Ok(());
        }
        Err(SchemaError::Mismatch {
            expected: pinned.columns().iter().map(|c| c.name()).collect::<Vec<_>>().join(","),
            declared: self.names().join(","),
        })
    }

    /// Build the ordered record for one patient
    pub fn assemble(&self, input: &PatientInput) -> FeatureRecord {
        let derived = DerivedFeatures::from_input(input);
        let values = self
            .columns
            .iter()
            .map(|c| (*c, c.value(input, &derived)))
            .collect();
        FeatureRecord { values }
    }

    /// CRC32 over column names in order
    /// Used to identify the active layout in status output
    pub fn layout_hash(&self) -> u32 {
        let mut hasher = Hasher::new();
        for column in &self.columns {
            hasher.update(column.name().as_bytes());
            hasher.update(&[0]); // Separator
        }
        hasher.finalize()
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            kind: self.kind(),
            hash: self.layout_hash(),
            feature_count: self.len(),
            feature_names: self.names().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Layout summary for serialization/logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub kind: Option<LayoutKind>,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

// ============================================================================
// RECORD
// ============================================================================

/// One row of model input: named values in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: Vec<(FeatureColumn, f64)>,
}

impl FeatureRecord {
    /// Build a record directly, e.g. from an offline row
    pub fn from_pairs(values: Vec<(FeatureColumn, f64)>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = FeatureColumn> + '_ {
        self.values.iter().map(|(c, _)| *c)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(|(_, v)| *v)
    }

    pub fn get(&self, column: FeatureColumn) -> Option<f64> {
        self.values.iter().find(|(c, _)| *c == column).map(|(_, v)| *v)
    }

    /// True if names and order equal the schema's
    pub fn conforms_to(&self, schema: &FeatureSchema) -> bool {
        self.values.len() == schema.len()
            && self.columns().zip(schema.columns()).all(|(a, b)| a == *b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::codes::{Activity, Gender, Level, YesNo};

    fn sample_input() -> PatientInput {
        PatientInput {
            age: 50,
            gender: Gender::Male,
            height_cm: 168,
            weight_kg: 62.0,
            ap_hi: 110,
            ap_lo: 80,
            cholesterol: Level::Normal,
            gluc: Level::AboveNormal,
            smoke: YesNo::No,
            alco: YesNo::No,
            active: Activity::Active,
        }
    }

    #[test]
    fn test_known_layout_sizes() {
        assert_eq!(COMPACT_LAYOUT.len(), 7);
        assert_eq!(EXTENDED_LAYOUT.len(), 13);
        assert_eq!(EXTENDED_LAYOUT, FeatureColumn::ALL);
    }

    #[test]
    fn test_column_names_round_trip() {
        for &column in FeatureColumn::ALL {
            assert_eq!(FeatureColumn::from_name(column.name()).unwrap(), column);
        }
    }

    #[test]
    fn test_from_names_detects_layout() {
        let schema = FeatureSchema::from_names(&[
            "gender", "height", "weight", "ap_hi", "ap_lo", "cholesterol", "gluc",
        ])
        .unwrap();
        assert_eq!(schema.kind(), Some(LayoutKind::Compact));

        let reordered = FeatureSchema::from_names(&["height", "gender"]).unwrap();
        assert_eq!(reordered.kind(), None);
    }

    #[test]
    fn test_from_names_rejects_bad_schemas() {
        let empty: [&str; 0] = [];
        assert_eq!(FeatureSchema::from_names(&empty), Err(SchemaError::Empty));
        assert_eq!(
            FeatureSchema::from_names(&["gender", "cardio"]),
            Err(SchemaError::UnknownColumn("cardio".to_string()))
        );
        assert_eq!(
            FeatureSchema::from_names(&["gender", "gender"]),
            Err(SchemaError::DuplicateColumn("gender".to_string()))
        );
    }

    #[test]
    fn test_assemble_compact_order() {
        let record = LayoutKind::Compact.schema().assemble(&sample_input());
        let values: Vec<f64> = record.values().collect();
        assert_eq!(values, vec![1.0, 168.0, 62.0, 110.0, 80.0, 1.0, 2.0]);
        assert_eq!(record.get(FeatureColumn::Bmi), None);
    }

    #[test]
    fn test_assemble_extended_has_derived() {
        let schema = LayoutKind::Extended.schema();
        let record = schema.assemble(&sample_input());
        assert_eq!(record.len(), 13);
        assert_eq!(record.get(FeatureColumn::Bmi), Some(21.97));
        assert_eq!(record.get(FeatureColumn::PulsePressure), Some(30.0));
        assert_eq!(record.get(FeatureColumn::Active), Some(1.0));
        assert!(record.conforms_to(&schema));
        assert!(!record.conforms_to(&LayoutKind::Compact.schema()));
    }

    #[test]
    fn test_assemble_follows_declared_order() {
        let schema = FeatureSchema::from_names(&["ap_lo", "ap_hi", "pulse_pressure"]).unwrap();
        let values: Vec<f64> = schema.assemble(&sample_input()).values().collect();
        assert_eq!(values, vec![80.0, 110.0, 30.0]);
    }

    #[test]
    fn test_ensure_matches() {
        let compact = LayoutKind::Compact.schema();
        assert!(compact.ensure_matches(LayoutKind::Compact).is_ok());
        let err = compact.ensure_matches(LayoutKind::Extended).unwrap_err();
        assert!(matches!(err, SchemaError::Mismatch { .. }));
    }

    #[test]
    fn test_layout_hash_order_sensitive() {
        let a = FeatureSchema::from_names(&["height", "weight"]).unwrap();
        let b = FeatureSchema::from_names(&["weight", "height"]).unwrap();
        assert_ne!(a.layout_hash(), b.layout_hash());
        assert_eq!(a.layout_hash(), a.clone().layout_hash());
    }

    #[test]
    fn test_layout_kind_parse() {
        assert_eq!("Extended".parse::<LayoutKind>().unwrap(), LayoutKind::Extended);
        assert!("wide".parse::<LayoutKind>().is_err());
    }
}
