//! Classifier - inference over a loaded artifact
//!
//! Read-only after construction. The only interior mutability is the pair
//! of atomic counters used for latency reporting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::artifact::{ModelArtifact, ModelType};
use super::ModelError;
use crate::schema::{FeatureRecord, FeatureSchema, LayoutInfo};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Binary risk label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    High,
}

impl RiskLabel {
    pub fn code(self) -> u8 {
        match self {
            RiskLabel::Low => 0,
            RiskLabel::High => 1,
        }
    }

    pub fn is_high(self) -> bool {
        self == RiskLabel::High
    }
}

/// Label plus class probabilities [p0, p1] when the model has them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: RiskLabel,
    pub probability: Option<[f64; 2]>,
}

impl Prediction {
    /// Probability of the high-risk class
    pub fn p_high(&self) -> Option<f64> {
        self.probability.map(|p| p[1])
    }
}

/// Where an artifact came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSource {
    pub path: String,
    pub sha256: String,
}

/// Loaded model summary for status endpoints and the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: ModelType,
    pub version: Option<String>,
    pub path: String,
    pub sha256: String,
    pub threshold: f64,
    pub has_proba: bool,
    pub standardized: bool,
    pub layout: LayoutInfo,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct InferenceStats {
    count: AtomicU64,
    latency_us_sum: AtomicU64,
}

/// Snapshot of the inference counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub inference_count: u64,
    pub avg_latency_ms: f64,
}

// ============================================================================
// RISK MODEL TRAIT
// ============================================================================

/// Contract consumed by the front-ends and by offline scoring
pub trait RiskModel: Send + Sync {
    fn schema(&self) -> &FeatureSchema;

    fn predict(&self, record: &FeatureRecord) -> Result<Prediction, ModelError>;

    /// Label only: 0 = low risk, 1 = high risk
    fn classify(&self, record: &FeatureRecord) -> Result<RiskLabel, ModelError> {
        self.predict(record).map(|p| p.label)
    }

    /// `[p0, p1]`, or `None` when the estimator has no probabilities
    fn predict_proba(&self, record: &FeatureRecord) -> Result<Option<[f64; 2]>, ModelError> {
        self.predict(record).map(|p| p.probability)
    }

    /// Probability of label 1, in [0, 1]
    fn classify_proba(&self, record: &FeatureRecord) -> Result<f64, ModelError>;
}

// ============================================================================
// LINEAR CLASSIFIER
// ============================================================================

pub struct Classifier {
    artifact: ModelArtifact,
    schema: FeatureSchema,
    info: ModelInfo,
    stats: InferenceStats,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("model_type", &self.artifact.model_type)
            .field("features", &self.schema.len())
            .finish()
    }
}

impl Classifier {
    /// Bind an artifact to the schema it declares
    pub fn new(artifact: ModelArtifact, source: ArtifactSource) -> Result<Self, ModelError> {
        artifact.validate()?;
        let schema = FeatureSchema::from_names(&artifact.feature_names)?;

        let info = ModelInfo {
            model_type: artifact.model_type,
            version: artifact.version.clone(),
            path: source.path,
            sha256: source.sha256,
            threshold: artifact.threshold,
            has_proba: artifact.model_type.has_proba(),
            standardized: artifact.scaler.is_some(),
            layout: schema.info(),
            loaded_at: Utc::now(),
        };

        Ok(Self {
            artifact,
            schema,
            info,
            stats: InferenceStats::default(),
        })
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn stats(&self) -> StatsSnapshot {
        let count = self.stats.count.load(Ordering::Relaxed);
        let sum = self.stats.latency_us_sum.load(Ordering::Relaxed);
        let avg_latency_ms = if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 };
        StatsSnapshot { inference_count: count, avg_latency_ms }
    }

    /// Raw linear decision value z
    pub fn decision(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        if !record.conforms_to(&self.schema) {
            return Err(ModelError::SchemaMismatch {
                expected: self.schema.names().join(","),
                got: record.columns().map(|c| c.name()).collect::<Vec<_>>().join(","),
            });
        }

        let mut z = self.artifact.intercept;
        for (i, x) in record.values().enumerate() {
            let x = match &self.artifact.scaler {
                Some(s) => (x - s.mean[i]) / s.scale[i],
                None => x,
            };
            z += self.artifact.coefficients[i] * x;
        }

        if !z.is_finite() {
            return Err(ModelError::Inference(format!("non-finite decision value {}", z)));
        }
        Ok(z)
    }

    fn record_latency(&self, started: Instant) {
        let elapsed = started.elapsed().as_micros() as u64;
        self.stats.latency_us_sum.fetch_add(elapsed, Ordering::Relaxed);
        self.stats.count.fetch_add(1, Ordering::Relaxed);
    }
}

impl RiskModel for Classifier {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, record: &FeatureRecord) -> Result<Prediction, ModelError> {
        let started = Instant::now();
        let z = self.decision(record)?;

        let prediction = match self.artifact.model_type {
            ModelType::LogisticRegression => {
                let p1 = sigmoid(z);
                Prediction {
                    label: if p1 >= self.artifact.threshold { RiskLabel::High } else { RiskLabel::Low },
                    probability: Some([1.0 - p1, p1]),
                }
            }
            ModelType::LinearSvm => Prediction {
                label: if z >= 0.0 { RiskLabel::High } else { RiskLabel::Low },
                probability: None,
            },
        };

        self.record_latency(started);
        tracing::trace!(z, label = prediction.label.code(), "prediction");
        Ok(prediction)
    }

    fn classify_proba(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        if !self.artifact.model_type.has_proba() {
            return Err(ModelError::ProbabilityUnsupported(self.artifact.model_type.as_str()));
        }
        self.predict(record)?
            .p_high()
            .ok_or(ModelError::ProbabilityUnsupported(self.artifact.model_type.as_str()))
    }
}

/// Logistic function, stable for large |z|
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::artifact::Scaler;
    use crate::schema::{Activity, FeatureColumn, Gender, LayoutKind, Level, PatientInput, YesNo};

    fn source() -> ArtifactSource {
        ArtifactSource { path: "<memory>".to_string(), sha256: String::new() }
    }

    fn artifact(model_type: ModelType, coefficients: Vec<f64>, intercept: f64) -> ModelArtifact {
        ModelArtifact {
            model_type,
            version: Some("test".to_string()),
            feature_names: vec!["ap_hi".to_string(), "ap_lo".to_string()],
            coefficients,
            intercept,
            threshold: 0.5,
            scaler: None,
        }
    }

    fn record(ap_hi: f64, ap_lo: f64) -> FeatureRecord {
        FeatureRecord::from_pairs(vec![(FeatureColumn::ApHi, ap_hi), (FeatureColumn::ApLo, ap_lo)])
    }

    fn patient() -> PatientInput {
        PatientInput {
            age: 50,
            gender: Gender::Male,
            height_cm: 168,
            weight_kg: 62.0,
            ap_hi: 110,
            ap_lo: 80,
            cholesterol: Level::Normal,
            gluc: Level::Normal,
            smoke: YesNo::No,
            alco: YesNo::No,
            active: Activity::Active,
        }
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(-800.0).is_finite());
    }

    #[test]
    fn test_probability_in_unit_interval() {
        let model = Classifier::new(artifact(ModelType::LogisticRegression, vec![0.05, 0.01], -7.0), source()).unwrap();
        for ap_hi in [-500.0, 0.0, 90.0, 120.0, 180.0, 10_000.0] {
            let p = model.classify_proba(&record(ap_hi, 80.0)).unwrap();
            assert!((0.0..=1.0).contains(&p), "p = {}", p);
            let [p0, p1] = model.predict_proba(&record(ap_hi, 80.0)).unwrap().unwrap();
            assert!((p0 + p1 - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_label_follows_threshold() {
        let model = Classifier::new(artifact(ModelType::LogisticRegression, vec![0.05, 0.01], -7.0), source()).unwrap();
        for ap_hi in [90.0, 110.0, 120.0, 125.0, 130.0, 160.0] {
            let rec = record(ap_hi, 80.0);
            let p = model.classify_proba(&rec).unwrap();
            let label = model.classify(&rec).unwrap();
            assert_eq!(label.is_high(), p >= 0.5);
        }
    }

    #[test]
    fn test_threshold_exactly_met_is_high() {
        // z = 0 -> p1 = 0.5
        let model = Classifier::new(artifact(ModelType::LogisticRegression, vec![0.0, 0.0], 0.0), source()).unwrap();
        assert_eq!(model.classify(&record(120.0, 80.0)).unwrap(), RiskLabel::High);
    }

    #[test]
    fn test_custom_threshold() {
        let mut a = artifact(ModelType::LogisticRegression, vec![0.0, 0.0], 0.5);
        a.threshold = 0.7;
        let model = Classifier::new(a, source()).unwrap();
        // p1 = sigmoid(0.5) ~ 0.62
        assert_eq!(model.classify(&record(120.0, 80.0)).unwrap(), RiskLabel::Low);
    }

    #[test]
    fn test_deterministic() {
        let model = Classifier::new(artifact(ModelType::LogisticRegression, vec![0.05, 0.01], -7.0), source()).unwrap();
        let rec = record(135.0, 85.0);
        let first = model.predict(&rec).unwrap();
        for _ in 0..10 {
            assert_eq!(model.predict(&rec).unwrap(), first);
        }
        assert_eq!(model.stats().inference_count, 11);
    }

    #[test]
    fn test_scaler_applied() {
        let mut a = artifact(ModelType::LogisticRegression, vec![1.0, 0.0], 0.0);
        a.scaler = Some(Scaler { mean: vec![120.0, 80.0], scale: vec![10.0, 10.0] });
        let model = Classifier::new(a, source()).unwrap();
        assert_eq!(model.decision(&record(130.0, 80.0)).unwrap(), 1.0);
        assert_eq!(model.decision(&record(120.0, 80.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_linear_svm_has_no_proba() {
        let model = Classifier::new(artifact(ModelType::LinearSvm, vec![0.05, 0.0], -6.0), source()).unwrap();
        let prediction = model.predict(&record(130.0, 80.0)).unwrap();
        assert_eq!(prediction.label, RiskLabel::High);
        assert!(prediction.probability.is_none());
        assert!(matches!(
            model.classify_proba(&record(130.0, 80.0)),
            Err(ModelError::ProbabilityUnsupported(_))
        ));
    }

    #[test]
    fn test_mismatched_record_rejected() {
        let model = Classifier::new(artifact(ModelType::LogisticRegression, vec![0.05, 0.01], -7.0), source()).unwrap();
        let swapped = FeatureRecord::from_pairs(vec![(FeatureColumn::ApLo, 80.0), (FeatureColumn::ApHi, 120.0)]);
        assert!(matches!(model.classify(&swapped), Err(ModelError::SchemaMismatch { .. })));

        let compact = LayoutKind::Compact.schema().assemble(&patient());
        assert!(matches!(model.predict(&compact), Err(ModelError::SchemaMismatch { .. })));
        assert_eq!(model.stats().inference_count, 0);
    }

    #[test]
    fn test_non_finite_decision_is_inference_error() {
        let model = Classifier::new(artifact(ModelType::LogisticRegression, vec![1e308, 1e308], 0.0), source()).unwrap();
        assert!(matches!(
            model.predict(&record(1e308, 1e308)),
            Err(ModelError::Inference(_))
        ));
    }

    #[test]
    fn test_unknown_declared_column_rejected() {
        let mut a = artifact(ModelType::LogisticRegression, vec![0.0, 0.0], 0.0);
        a.feature_names = vec!["ap_hi".to_string(), "cardio".to_string()];
        assert!(matches!(Classifier::new(a, source()), Err(ModelError::Schema(_))));
    }

    #[test]
    fn test_info_reports_layout() {
        let model = Classifier::new(artifact(ModelType::LogisticRegression, vec![0.05, 0.01], -7.0), source()).unwrap();
        let info = model.info();
        assert_eq!(info.layout.feature_count, 2);
        assert_eq!(info.layout.kind, None);
        assert!(info.has_proba);
        assert!(!info.standardized);
    }
}
