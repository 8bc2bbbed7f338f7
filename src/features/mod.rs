//! Features Module - Feature Derivation
//!
//! Pure arithmetic over the raw inputs. No error conditions.

pub mod derive;

pub use derive::{bmi, pulse_pressure, round2, DerivedFeatures};
