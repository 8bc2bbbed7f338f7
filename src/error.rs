//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::model::ModelError;
use crate::schema::SchemaError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Service errors
    ModelUnavailable,

    // Request errors
    InvalidInput(String),

    // Inference errors
    PredictionFailed(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PredictionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::ModelUnavailable => "Model not loaded".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::PredictionFailed(msg) => format!("Prediction error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        match &self {
            AppError::ModelUnavailable => tracing::warn!("Request rejected: model not loaded"),
            AppError::InvalidInput(msg) => tracing::debug!("Invalid input: {}", msg),
            AppError::PredictionFailed(msg) => tracing::error!("Prediction error: {}", msg),
        }

        let body = Json(json!({
            "detail": detail,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        if err.is_invalid_input() {
            AppError::InvalidInput(err.to_string())
        } else {
            AppError::PredictionFailed(err.to_string())
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| "invalid value".to_string());
                format!("{}: {}", field, reason)
            })
            .collect();
        fields.sort();
        AppError::InvalidInput(fields.join("; "))
    }
}
