//! Model Artifact - serialized linear classifier
//!
//! JSON document holding a fitted linear model: declared feature names,
//! coefficients, intercept, decision threshold and an optional
//! standardization step fitted before the estimator.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::ModelError;

/// Default decision threshold for a standard probabilistic estimator
pub const DEFAULT_THRESHOLD: f64 = 0.5;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Probabilistic; label from p1 >= threshold
    LogisticRegression,
    /// Margin only; label from decision >= 0, no probabilities
    LinearSvm,
}

impl ModelType {
    pub fn has_proba(self) -> bool {
        matches!(self, ModelType::LogisticRegression)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::LogisticRegression => "logistic_regression",
            ModelType::LinearSvm => "linear_svm",
        }
    }
}

/// Standardization fitted at training time: x' = (x - mean) / scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model_type: ModelType,
    #[serde(default)]
    pub version: Option<String>,
    /// Column names in the order the model was fit on
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub scaler: Option<Scaler>,
}

impl ModelArtifact {
    /// Read artifact bytes from disk
    pub fn read(path: &Path) -> Result<Vec<u8>, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.display().to_string()));
        }
        std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse and validate an artifact
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Structural checks; the declared column names are checked by the schema
    pub fn validate(&self) -> Result<(), ModelError> {
        let n = self.feature_names.len();

        if self.coefficients.len() != n {
            return Err(ModelError::Invalid(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                n
            )));
        }

        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid("non-finite model parameter".to_string()));
        }

        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(ModelError::Invalid(format!(
                "threshold {} outside (0, 1)",
                self.threshold
            )));
        }

        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(ModelError::Invalid(format!(
                    "scaler has {}/{} entries for {} features",
                    scaler.mean.len(),
                    scaler.scale.len(),
                    n
                )));
            }
            if scaler.mean.iter().any(|m| !m.is_finite()) {
                return Err(ModelError::Invalid("non-finite scaler mean".to_string()));
            }
            if scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                return Err(ModelError::Invalid("scaler scale must be finite and non-zero".to_string()));
            }
        }

        Ok(())
    }
}

/// Hex SHA-256 of the artifact bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Compare against an expected digest (case-insensitive)
pub fn verify_checksum(bytes: &[u8], expected: &str) -> Result<String, ModelError> {
    let actual = sha256_hex(bytes);
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(ModelError::ChecksumMismatch {
            expected: expected.trim().to_string(),
            actual,
        });
    }
    Ok(actual)
}
