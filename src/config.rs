//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::schema::{LayoutKind, SchemaError};

/// Default artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/cardiovascular_model_logistic.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Serialized classifier artifact
    pub model_path: PathBuf,

    /// Expected SHA-256 of the artifact (hex)
    pub model_sha256: Option<String>,

    /// Layout the artifact must declare, if pinned
    pub feature_schema: Option<LayoutKind>,

    /// Environment (development, production)
    pub environment: String,

    /// Log output: "pretty" or "json"
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_sha256: None,
            feature_schema: None,
            environment: "development".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, SchemaError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key -> value source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SchemaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let feature_schema = match get("FEATURE_SCHEMA") {
            Some(value) => Some(value.parse::<LayoutKind>()?),
            None => None,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),

            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: get("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            model_sha256: get("MODEL_SHA256"),

            feature_schema,

            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),

            log_format: get("LOG_FORMAT").unwrap_or(defaults.log_format),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
