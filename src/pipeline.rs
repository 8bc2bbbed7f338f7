//! Request-to-prediction pipeline shared by the HTTP API and the CLI form
//!
//! input → derived features → ordered record → model

use serde::Serialize;

use crate::features::DerivedFeatures;
use crate::model::{ModelError, Prediction, RiskModel};
use crate::schema::PatientInput;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    pub derived: DerivedFeatures,
    pub prediction: Prediction,
}

pub fn run<M: RiskModel + ?Sized>(model: &M, input: &PatientInput) -> Result<Outcome, ModelError> {
    let derived = DerivedFeatures::from_input(input);
    let record = model.schema().assemble(input);
    let prediction = model.predict(&record)?;
    Ok(Outcome { derived, prediction })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArtifactSource, Classifier, ModelArtifact, ModelType};
    use crate::schema::{Activity, Gender, Level, YesNo, EXTENDED_LAYOUT};

    fn extended_model() -> Classifier {
        let artifact = ModelArtifact {
            model_type: ModelType::LogisticRegression,
            version: None,
            feature_names: EXTENDED_LAYOUT.iter().map(|c| c.name().to_string()).collect(),
            coefficients: vec![0.05, 0.0, 0.0, 0.0, 0.08, 0.04, 0.0, 0.4, 0.1, -0.1, -0.1, -0.2, 0.01],
            intercept: -10.0,
            threshold: 0.5,
            scaler: None,
        };
        Classifier::new(artifact, ArtifactSource { path: "<memory>".into(), sha256: String::new() })
            .unwrap()
    }

    #[test]
    fn test_run_reference_patient() {
        let input = PatientInput {
            age: 50,
            gender: Gender::Male,
            height_cm: 168,
            weight_kg: 62.0,
            ap_hi: 110,
            ap_lo: 80,
            cholesterol: Level::Normal,
            gluc: Level::Normal,
            smoke: YesNo::No,
            alco: YesNo::No,
            active: Activity::Active,
        };
        let model = extended_model();
        let outcome = run(&model, &input).unwrap();

        assert_eq!(outcome.derived.bmi, 21.97);
        assert_eq!(outcome.derived.pulse_pressure, 30);

        // z = 2.5 + 1.7576 + 4.4 + 0.4 + 0.1 - 0.2 + 0.3 - 10 = -0.7424
        let p = outcome.prediction.p_high().unwrap();
        assert!((p - 0.3225).abs() < 1e-3, "p = {}", p);
        assert!(!outcome.prediction.label.is_high());
    }
}
