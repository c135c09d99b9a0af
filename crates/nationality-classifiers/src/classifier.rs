//! Classifier trait and common types

use async_trait::async_trait;
use nationality_core::Result;

/// Trait for all classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text
    async fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Result of classification
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// Classification label
    pub label: String,

    /// Probability of the label (0.0-1.0)
    pub score: f64,

    /// Additional metadata
    pub metadata: ClassificationMetadata,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
            metadata: ClassificationMetadata::default(),
            latency_us: 0,
        }
    }

    /// Check if score exceeds threshold
    pub fn exceeds_threshold(&self, threshold: f64) -> bool {
        self.score >= threshold
    }

    /// Probability recorded for `label`, if class scores were attached
    pub fn score_for(&self, label: &str) -> Option<f64> {
        self.metadata
            .all_scores
            .as_ref()?
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, s)| *s)
    }
}

/// Metadata about classification
#[derive(Debug, Clone, Default)]
pub struct ClassificationMetadata {
    /// Model name or version
    pub model: Option<String>,

    /// All class scores, in model class order
    pub all_scores: Option<Vec<(String, f64)>>,

    /// Number of recognized n-gram occurrences in the input
    pub matched_features: u32,
}
