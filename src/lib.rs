//! Cardiovascular Disease Risk Predictor
//!
//! Serves a pre-trained linear classifier over HTTP and to the terminal
//! assessment form.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  input ─► features ─► schema ─► model ─► presenter ─► output │
//! │           (BMI, PP)   (codes,   (linear   (JSON /            │
//! │                        order)    scorer)   banners)          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  axum API (cardio-risk-api)    │   CLI form (cardio-assess)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod model;
pub mod pipeline;
pub mod presenter;
pub mod schema;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::Config;
pub use error::{AppError, AppResult};
pub use model::ModelHandle;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub model: ModelHandle,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::index))
        .route("/health", get(handlers::health::check))
        .route("/model", get(handlers::model::info))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Initialize logging; `RUST_LOG` overrides the default filter
pub fn init_tracing(default_filter: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
