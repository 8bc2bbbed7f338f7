//! Schema Module - Input Adaptation
//!
//! Translates user-facing choices into training-time codes and assembles
//! records in exactly the column order the loaded model declares.

pub mod codes;
pub mod input;
pub mod layout;

pub use codes::{Activity, Categorical, Gender, Level, YesNo};
pub use input::{PatientInput, RawCodes};
pub use layout::{
    FeatureColumn, FeatureRecord, FeatureSchema, LayoutInfo, LayoutKind, COMPACT_LAYOUT,
    EXTENDED_LAYOUT,
};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("invalid code {code} for field '{field}'")]
    UnknownCode { field: &'static str, code: i32 },

    #[error("invalid label '{label}' for field '{field}'")]
    UnknownLabel { field: &'static str, label: String },

    #[error("unknown feature column '{0}'")]
    UnknownColumn(String),

    #[error("duplicate feature column '{0}'")]
    DuplicateColumn(String),

    #[error("model declares no feature columns")]
    Empty,

    #[error("unknown feature layout '{0}' (expected compact or extended)")]
    UnknownLayout(String),

    #[error("feature schema mismatch: expected [{expected}], model declares [{declared}]")]
    Mismatch { expected: String, declared: String },
}
