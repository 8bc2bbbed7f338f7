//! Model Module - Classifier Wrapper
//!
//! Loads the artifact once at startup and exposes read-only inference.
//! Swapping estimators only touches this module.

pub mod artifact;
pub mod classifier;
pub mod handle;

pub use artifact::{ModelArtifact, ModelType, Scaler, DEFAULT_THRESHOLD};
pub use classifier::{
    ArtifactSource, Classifier, ModelInfo, Prediction, RiskLabel, RiskModel, StatsSnapshot,
};
pub use handle::ModelHandle;

use thiserror::Error;

use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum ModelError {
    // Load-time errors
    #[error("model not found: {0}")]
    NotFound(String),

    #[error("failed to read model {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    #[error("model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    // Inference-time errors
    #[error("feature mismatch: model expects [{expected}], got [{got}]")]
    SchemaMismatch { expected: String, got: String },

    #[error("{0} model does not provide probabilities")]
    ProbabilityUnsupported(&'static str),

    #[error("{0}")]
    Inference(String),
}

impl ModelError {
    /// Caller-side problem rather than a model failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ModelError::SchemaMismatch { .. })
    }
}
