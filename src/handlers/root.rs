//! Root status handler

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusMessage {
    message: &'static str,
}

pub async fn index() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Cardiovascular Disease Predictor API is running",
    })
}
