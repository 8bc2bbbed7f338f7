//! Prediction handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::presenter::PredictionResponse;
use crate::schema::{PatientInput, RawCodes, SchemaError};
use crate::{pipeline, AppError, AppResult, AppState};

/// Request body, categorical fields as training-time integer codes
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(min = 0, message = "must not be negative"))]
    pub age: i32,
    pub gender: i32,
    #[validate(range(min = 1, message = "must be positive"))]
    pub height: i32,
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub weight: f64,
    pub ap_hi: i32,
    pub ap_lo: i32,
    pub cholesterol: i32,
    pub gluc: i32,
    pub smoke: i32,
    pub alco: i32,
    pub active: i32,
}

impl PredictRequest {
    pub fn to_input(&self) -> Result<PatientInput, SchemaError> {
        PatientInput::from_codes(
            self.age,
            self.height,
            self.weight,
            self.ap_hi,
            self.ap_lo,
            RawCodes {
                gender: self.gender,
                cholesterol: self.cholesterol,
                gluc: self.gluc,
                smoke: self.smoke,
                alco: self.alco,
                active: self.active,
            },
        )
    }
}

/// Run one prediction
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    // No model: fail before touching the request
    let classifier = state.model.classifier().ok_or(AppError::ModelUnavailable)?;

    let Json(req) = payload?;
    req.validate()?;
    let input = req.to_input()?;

    let outcome = pipeline::run(classifier.as_ref(), &input)?;

    tracing::debug!(
        prediction = outcome.prediction.label.code(),
        p_high = outcome.prediction.p_high(),
        bmi = outcome.derived.bmi,
        "Prediction served"
    );

    Ok(Json(PredictionResponse::new(&outcome.prediction, &outcome.derived)))
}
