//! Name nationality classifier
//!
//! Multinomial logistic regression over character n-gram counts. Each class
//! gets `intercept + sum(coefficient * count)`; the label is the arg-max of
//! those scores and probabilities are their softmax.

use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier};
use crate::features::{extract_features, FeatureCounts};
use crate::model::Model;
use nationality_core::Result;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Default classifier name
pub const DEFAULT_NAME: &str = "nationality";

/// Predicts the nationality class of a person's name.
///
/// The model is mandatory at construction and shared read-only, so a single
/// instance can serve concurrent callers without locking.
#[derive(Debug, Clone)]
pub struct NameNationalityClassifier {
    name: String,
    model: Arc<Model>,
}

impl NameNationalityClassifier {
    /// Load the model JSON at `path` and build a classifier around it
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let model = Model::from_file(path)?;
        Ok(Self::from_model(model))
    }

    /// Build a classifier around an already validated model
    pub fn from_model(model: Model) -> Self {
        Self::from_shared(Arc::new(model))
    }

    /// Build a classifier sharing a model with other instances
    pub fn from_shared(model: Arc<Model>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            model,
        }
    }

    /// Set the name reported through [`Classifier::name`]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Recognized n-gram counts for `name`
    pub fn extract_features(&self, name: &str) -> FeatureCounts<'_> {
        extract_features(&self.model, name)
    }

    /// Raw linear score per class, in model class order
    pub fn scores(&self, name: &str) -> Vec<f64> {
        self.score_features(&self.extract_features(name))
    }

    /// Most likely class label for `name`.
    ///
    /// Ties go to the class listed first in the model.
    pub fn predict(&self, name: &str) -> &str {
        let scores = self.scores(name);
        &self.model.classes()[argmax(&scores)]
    }

    /// Probability of every class for `name`
    pub fn predict_probabilities(&self, name: &str) -> ClassProbabilities {
        self.probabilities_from_scores(&self.scores(name))
    }

    fn score_features(&self, features: &FeatureCounts<'_>) -> Vec<f64> {
        let mut scores = self.model.intercepts().to_vec();

        for (_, feature) in features.iter() {
            let count = f64::from(feature.count);
            for (class_idx, score) in scores.iter_mut().enumerate() {
                *score += self.model.coefficient(class_idx, feature.index) * count;
            }
        }

        scores
    }

    fn probabilities_from_scores(&self, scores: &[f64]) -> ClassProbabilities {
        let entries = self
            .model
            .classes()
            .iter()
            .cloned()
            .zip(softmax(scores))
            .collect();

        ClassProbabilities { entries }
    }
}

#[async_trait::async_trait]
impl Classifier for NameNationalityClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();

        let features = self.extract_features(text);
        let matched_features = features.total();
        let scores = self.score_features(&features);
        let probabilities = self.probabilities_from_scores(&scores);

        let best = argmax(&scores);
        let label = self.model.classes()[best].clone();
        let score = probabilities.entries[best].1;

        let latency_us = start.elapsed().as_micros() as u64;
        metrics::counter!("nationality_predictions_total", "label" => label.clone()).increment(1);
        metrics::histogram!("nationality_classify_latency_us").record(latency_us as f64);

        Ok(ClassificationResult {
            label,
            score,
            metadata: ClassificationMetadata {
                model: Some(self.name.clone()),
                all_scores: Some(probabilities.into_vec()),
                matched_features,
            },
            latency_us,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Per-class probabilities, in model class order
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities {
    entries: Vec<(String, f64)>,
}

impl ClassProbabilities {
    /// Probability of `label`
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(l, p)| (l.as_str(), *p))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// Sum of all probabilities (1.0 up to rounding)
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Most probable class; ties go to the first class
    pub fn best(&self) -> Option<(&str, f64)> {
        let probabilities: Vec<f64> = self.entries.iter().map(|(_, p)| *p).collect();
        if probabilities.is_empty() {
            return None;
        }
        let (label, p) = &self.entries[argmax(&probabilities)];
        Some((label.as_str(), *p))
    }

    pub fn into_vec(self) -> Vec<(String, f64)> {
        self.entries
    }
}

impl From<ClassProbabilities> for HashMap<String, f64> {
    fn from(probabilities: ClassProbabilities) -> Self {
        probabilities.entries.into_iter().collect()
    }
}

impl IntoIterator for ClassProbabilities {
    type Item = (String, f64);
    type IntoIter = std::vec::IntoIter<(String, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Index of the first maximum in `values` (0 for an empty slice)
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = idx;
        }
    }
    best
}

/// Softmax of `scores`, shifted by the maximum to avoid overflow.
///
/// Scores that overflowed to `+inf` share all of the probability mass.
/// If every score is `-inf` the distribution is uniform.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == f64::INFINITY {
        let top = scores.iter().filter(|s| **s == f64::INFINITY).count() as f64;
        return scores
            .iter()
            .map(|s| if *s == f64::INFINITY { 1.0 / top } else { 0.0 })
            .collect();
    }

    if max == f64::NEG_INFINITY {
        let uniform = 1.0 / scores.len() as f64;
        return vec![uniform; scores.len()];
    }

    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}
