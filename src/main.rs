//! Cardiovascular Disease Predictor API server

use anyhow::Context;

use cardio_risk::{create_router, init_tracing, AppState, Config, ModelHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Invalid configuration")?;

    // Initialize logging
    let default_filter = if config.is_production() {
        "cardio_risk=info,tower_http=info"
    } else {
        "cardio_risk=debug,tower_http=debug"
    };
    init_tracing(default_filter, config.json_logs());

    tracing::info!("Cardiovascular Disease Predictor API starting...");

    // Load model once; a schema mismatch refuses to serve
    let model = ModelHandle::load(&config).context("Refusing to serve: feature schema mismatch")?;
    if !model.is_ready() {
        tracing::warn!(
            "Serving without a model: {}",
            model.reason().unwrap_or("unknown reason")
        );
    }

    // Build application state
    let state = AppState {
        config: config.clone(),
        model,
    };

    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
