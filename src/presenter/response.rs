//! JSON response for the prediction endpoint

use serde::{Deserialize, Serialize};

use crate::features::DerivedFeatures;
use crate::model::{Prediction, RiskLabel};

impl RiskLabel {
    pub fn message(self) -> &'static str {
        match self {
            RiskLabel::High => "High risk of cardiovascular disease",
            RiskLabel::Low => "Low risk of cardiovascular disease",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// 0 = low risk, 1 = high risk
    pub prediction: u8,
    /// `[p0, p1]`, null when the model has no probabilities
    pub probability: Option<[f64; 2]>,
    pub bmi: f64,
    pub pulse_pressure: i64,
    pub message: String,
}

impl PredictionResponse {
    pub fn new(prediction: &Prediction, derived: &DerivedFeatures) -> Self {
        Self {
            prediction: prediction.label.code(),
            probability: prediction.probability,
            bmi: derived.bmi,
            pulse_pressure: derived.pulse_pressure,
            message: prediction.label.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_risk_response_json() {
        let prediction = Prediction { label: RiskLabel::High, probability: Some([0.25, 0.75]) };
        let derived = DerivedFeatures { bmi: 21.97, pulse_pressure: 30 };
        let json = serde_json::to_value(PredictionResponse::new(&prediction, &derived)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "prediction": 1,
                "probability": [0.25, 0.75],
                "bmi": 21.97,
                "pulse_pressure": 30,
                "message": "High risk of cardiovascular disease"
            })
        );
    }

    #[test]
    fn test_missing_probability_is_null() {
        let prediction = Prediction { label: RiskLabel::Low, probability: None };
        let derived = DerivedFeatures { bmi: 24.22, pulse_pressure: 40 };
        let json = serde_json::to_value(PredictionResponse::new(&prediction, &derived)).unwrap();

        assert!(json["probability"].is_null());
        assert_eq!(json["prediction"], 0);
        assert_eq!(json["message"], "Low risk of cardiovascular disease");
    }
}
