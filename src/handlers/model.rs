//! Model inspection handler

use axum::{extract::State, Json};

use crate::model::ModelInfo;
use crate::{AppError, AppResult, AppState};

/// Loaded model summary, including the declared feature names
pub async fn info(State(state): State<AppState>) -> AppResult<Json<ModelInfo>> {
    let classifier = state.model.classifier().ok_or(AppError::ModelUnavailable)?;
    Ok(Json(classifier.info().clone()))
}
