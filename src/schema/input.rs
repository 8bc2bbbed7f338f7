//! Patient Input - typed clinical inputs shared by both front-ends

use serde::{Deserialize, Serialize};

use super::codes::{Activity, Categorical, Gender, Level, YesNo};
use super::SchemaError;

/// Validated clinical inputs, categorical fields already decoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    /// Age in years
    pub age: i32,
    pub gender: Gender,
    pub height_cm: i32,
    pub weight_kg: f64,
    /// Systolic blood pressure
    pub ap_hi: i32,
    /// Diastolic blood pressure
    pub ap_lo: i32,
    pub cholesterol: Level,
    pub gluc: Level,
    pub smoke: YesNo,
    pub alco: YesNo,
    pub active: Activity,
}

/// Raw integer codes exactly as the HTTP API receives them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCodes {
    pub gender: i32,
    pub cholesterol: i32,
    pub gluc: i32,
    pub smoke: i32,
    pub alco: i32,
    pub active: i32,
}

impl PatientInput {
    /// Build from numeric fields plus undecoded categorical codes
    pub fn from_codes(
        age: i32,
        height_cm: i32,
        weight_kg: f64,
        ap_hi: i32,
        ap_lo: i32,
        codes: RawCodes,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            age,
            gender: decode::<Gender>("gender", codes.gender)?,
            height_cm,
            weight_kg,
            ap_hi,
            ap_lo,
            cholesterol: decode::<Level>("cholesterol", codes.cholesterol)?,
            gluc: decode::<Level>("gluc", codes.gluc)?,
            smoke: decode::<YesNo>("smoke", codes.smoke)?,
            alco: decode::<YesNo>("alco", codes.alco)?,
            active: decode::<Activity>("active", codes.active)?,
        })
    }
}

fn decode<T: Categorical>(field: &'static str, code: i32) -> Result<T, SchemaError> {
    T::from_code(code).map_err(|_| SchemaError::UnknownCode { field, code })
}
