//! Derived clinical features: BMI and pulse pressure.

use serde::{Deserialize, Serialize};

use crate::schema::PatientInput;

/// BMI = weight(kg) / height(m)²
pub fn bmi(height_cm: i32, weight_kg: f64) -> f64 {
    let height_m = height_cm as f64 / 100.0;
    weight_kg / (height_m * height_m)
}

/// Systolic minus diastolic. Not validated, may be negative.
/// Widened to i64 so any pair of i32 readings subtracts exactly.
pub fn pulse_pressure(ap_hi: i32, ap_lo: i32) -> i64 {
    i64::from(ap_hi) - i64::from(ap_lo)
}

/// Round to 2 decimal places (display precision)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Engineered features for a single patient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// BMI rounded to 2 decimals
    pub bmi: f64,
    pub pulse_pressure: i64,
}

impl DerivedFeatures {
    pub fn from_input(input: &PatientInput) -> Self {
        Self {
            bmi: round2(bmi(input.height_cm, input.weight_kg)),
            pulse_pressure: pulse_pressure(input.ap_hi, input.ap_lo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_reference_case() {
        assert_eq!(round2(bmi(168, 62.0)), 21.97);
        assert_eq!(round2(bmi(170, 70.0)), 24.22);
    }

    #[test]
    fn test_bmi_non_negative() {
        for height in [100, 150, 199, 250] {
            for weight in [30.0, 62.5, 120.0, 200.0] {
                let value = round2(bmi(height, weight));
                assert!(value >= 0.0);
                let exact = weight / ((height as f64 / 100.0).powi(2));
                assert!((value - exact).abs() <= 0.005 + 1e-9);
            }
        }
    }

    #[test]
    fn test_pulse_pressure_exact() {
        assert_eq!(pulse_pressure(110, 80), 30);
        assert_eq!(pulse_pressure(120, 120), 0);
        // nonsensical inputs pass straight through
        assert_eq!(pulse_pressure(70, 90), -20);
    }

    #[test]
    fn test_pulse_pressure_extremes() {
        assert_eq!(pulse_pressure(i32::MAX, -1), 2_147_483_648);
        assert_eq!(pulse_pressure(i32::MIN, i32::MAX), -4_294_967_295);
        assert_eq!(pulse_pressure(i32::MAX, i32::MIN), 4_294_967_295);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(-0.004), -0.0);
    }
}
