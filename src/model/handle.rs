//! Model Handle - process-wide readiness state
//!
//! Acquired once before the server accepts traffic. A missing or corrupt
//! artifact leaves the handle `Unavailable` (the process still serves and
//! reports it); a schema the adapter cannot satisfy is a startup error.

use std::path::Path;
use std::sync::Arc;

use super::artifact::{sha256_hex, verify_checksum, ModelArtifact};
use super::classifier::{ArtifactSource, Classifier, RiskModel};
use super::ModelError;
use crate::config::Config;
use crate::schema::{LayoutKind, SchemaError};

#[derive(Debug, Clone)]
pub enum ModelHandle {
    Ready(Arc<Classifier>),
    Unavailable { reason: Arc<str> },
}

impl ModelHandle {
    /// Load using the configured path, checksum and layout pin
    pub fn load(config: &Config) -> Result<Self, SchemaError> {
        Self::load_from(
            &config.model_path,
            config.model_sha256.as_deref(),
            config.feature_schema,
        )
    }

    pub fn load_from(
        path: &Path,
        expected_sha256: Option<&str>,
        pinned: Option<LayoutKind>,
    ) -> Result<Self, SchemaError> {
        tracing::info!("Loading model from: {}", path.display());

        let classifier = match load_classifier(path, expected_sha256) {
            Ok(classifier) => classifier,
            Err(ModelError::Schema(e)) => {
                tracing::error!("Model schema rejected: {}", e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Model unavailable: {}", e);
                return Ok(Self::unavailable(e.to_string()));
            }
        };

        if let Some(pinned) = pinned {
            if let Err(e) = classifier.schema().ensure_matches(pinned) {
                tracing::error!("Model schema does not match pinned layout '{}': {}", pinned, e);
                return Err(e);
            }
        }

        let info = classifier.info();
        tracing::info!(
            model_type = info.model_type.as_str(),
            version = info.version.as_deref().unwrap_or("-"),
            features = info.layout.feature_count,
            layout = %info.layout.kind.map(|k| k.to_string()).unwrap_or_else(|| "custom".to_string()),
            layout_hash = %format!("{:08x}", info.layout.hash),
            "Model loaded successfully"
        );

        Ok(Self::Ready(Arc::new(classifier)))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self::Unavailable { reason: Arc::from(reason) }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn classifier(&self) -> Option<&Arc<Classifier>> {
        match self {
            Self::Ready(classifier) => Some(classifier),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(&**reason),
        }
    }
}

impl From<Classifier> for ModelHandle {
    fn from(classifier: Classifier) -> Self {
        Self::Ready(Arc::new(classifier))
    }
}

fn load_classifier(path: &Path, expected_sha256: Option<&str>) -> Result<Classifier, ModelError> {
    let bytes = ModelArtifact::read(path)?;
    let sha256 = match expected_sha256 {
        Some(expected) => verify_checksum(&bytes, expected)?,
        None => sha256_hex(&bytes),
    };
    let artifact = ModelArtifact::from_slice(&bytes)?;

    Classifier::new(
        artifact,
        ArtifactSource {
            path: path.display().to_string(),
            sha256,
        },
    )
}
