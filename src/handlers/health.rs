//! Health / readiness handler

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::model::ModelInfo;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model: Option<ModelInfo>,
    reason: Option<String>,
    inference_count: u64,
    avg_latency_ms: f64,
}

/// 200 when the model is ready, 503 otherwise
pub async fn check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = chrono::Utc::now().timestamp();
    let version = env!("CARGO_PKG_VERSION");

    match state.model.classifier() {
        Some(classifier) => {
            let stats = classifier.stats();
            (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "ready",
                    version,
                    timestamp,
                    model: Some(classifier.info().clone()),
                    reason: None,
                    inference_count: stats.inference_count,
                    avg_latency_ms: stats.avg_latency_ms,
                }),
            )
        }
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "model_unavailable",
                version,
                timestamp,
                model: None,
                reason: state.model.reason().map(str::to_string),
                inference_count: 0,
                avg_latency_ms: 0.0,
            }),
        ),
    }
}
