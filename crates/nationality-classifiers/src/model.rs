//! Trained logistic-regression parameters and their JSON representation
//!
//! A [`Model`] holds the n-gram vocabulary, the class labels, a dense
//! `classes x features` coefficient matrix and one intercept per class.
//! It is validated once at construction and immutable afterwards.

use crate::features::{MAX_NGRAM_CHARS, MIN_NGRAM_CHARS};
use nationality_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Placeholder path reported for models parsed from memory
const IN_MEMORY_SOURCE: &str = "<memory>";

/// On-disk shape of a trained model.
///
/// Field names are part of the external format and must match the JSON
/// produced by the training pipeline exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub features: Vec<String>,
    pub classes: Vec<String>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Validated, immutable model parameters
#[derive(Debug, Clone)]
pub struct Model {
    features: Vec<String>,
    classes: Vec<String>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    feature_index: HashMap<String, usize>,
}

impl Model {
    /// Build a model from its parts, validating all dimensions
    pub fn new(
        features: Vec<String>,
        classes: Vec<String>,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> Result<Self> {
        if classes.is_empty() {
            return Err(Error::invalid("model has no classes"));
        }

        if coefficients.len() != classes.len() {
            return Err(Error::invalid(format!(
                "expected {} coefficient rows (one per class), found {}",
                classes.len(),
                coefficients.len()
            )));
        }

        if intercepts.len() != classes.len() {
            return Err(Error::invalid(format!(
                "expected {} intercepts (one per class), found {}",
                classes.len(),
                intercepts.len()
            )));
        }

        for (class, row) in classes.iter().zip(&coefficients) {
            if row.len() != features.len() {
                return Err(Error::invalid(format!(
                    "coefficient row for class '{}' has {} entries, expected {} (one per feature)",
                    class,
                    row.len(),
                    features.len()
                )));
            }
        }

        let mut feature_index = HashMap::with_capacity(features.len());
        for (idx, feature) in features.iter().enumerate() {
            if feature_index.insert(feature.clone(), idx).is_some() {
                return Err(Error::invalid(format!("duplicate feature '{}'", feature)));
            }
        }

        let unreachable = features
            .iter()
            .filter(|f| !(MIN_NGRAM_CHARS..=MAX_NGRAM_CHARS).contains(&f.chars().count()))
            .count();
        if unreachable > 0 {
            warn!(
                "{} of {} features fall outside the {}..={} character n-gram range and will never match",
                unreachable,
                features.len(),
                MIN_NGRAM_CHARS,
                MAX_NGRAM_CHARS
            );
        }

        debug!(
            classes = classes.len(),
            features = features.len(),
            "Validated model"
        );

        Ok(Self {
            features,
            classes,
            coefficients,
            intercepts,
            feature_index,
        })
    }

    /// Parse a model from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let document: ModelDocument = serde_json::from_str(json)
            .map_err(|e| Error::model_load(IN_MEMORY_SOURCE, e))?;
        Self::try_from(document)
    }

    /// Load a model from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading model from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| Error::model_load(path, e))?;
        let document: ModelDocument =
            serde_json::from_str(&content).map_err(|e| Error::model_load(path, e))?;

        let model = Self::try_from(document)?;
        info!(
            "Loaded model with {} classes and {} features",
            model.num_classes(),
            model.num_features()
        );

        Ok(model)
    }

    /// The n-gram vocabulary, in coefficient column order
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// The class labels, in coefficient row order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Coefficient matrix, one row per class
    pub fn coefficients(&self) -> &[Vec<f64>] {
        &self.coefficients
    }

    /// One bias per class
    pub fn intercepts(&self) -> &[f64] {
        &self.intercepts
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }

    /// Column index of an n-gram, if it is part of the vocabulary
    pub fn feature_index(&self, ngram: &str) -> Option<usize> {
        self.feature_index.get(ngram).copied()
    }

    /// Row index of a class label
    pub fn class_index(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    /// Weight of `feature_idx` for `class_idx`
    #[inline]
    pub(crate) fn coefficient(&self, class_idx: usize, feature_idx: usize) -> f64 {
        self.coefficients[class_idx][feature_idx]
    }

    /// Convert back into the serializable representation
    pub fn to_document(&self) -> ModelDocument {
        ModelDocument {
            features: self.features.clone(),
            classes: self.classes.clone(),
            coefficients: self.coefficients.clone(),
            intercepts: self.intercepts.clone(),
        }
    }
}

impl TryFrom<ModelDocument> for Model {
    type Error = Error;

    fn try_from(doc: ModelDocument) -> Result<Self> {
        Self::new(doc.features, doc.classes, doc.coefficients, doc.intercepts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn document() -> ModelDocument {
        ModelDocument {
            features: strings(&["a", "ab", " x"]),
            classes: strings(&["one", "two"]),
            coefficients: vec![vec![0.1, 0.2, 0.3], vec![-0.1, -0.2, -0.3]],
            intercepts: vec![0.5, -0.5],
        }
    }

    #[test]
    fn test_valid_model() {
        let model = Model::try_from(document()).unwrap();

        assert_eq!(model.num_classes(), 2);
        assert_eq!(model.num_features(), 3);
        assert_eq!(model.feature_index("ab"), Some(1));
        assert_eq!(model.feature_index(" x"), Some(2));
        assert_eq!(model.feature_index("zz"), None);
        assert_eq!(model.class_index("two"), Some(1));
        assert_eq!(model.coefficient(1, 2), -0.3);
        assert_eq!(model.to_document(), document());
    }

    #[test]
    fn test_row_length_mismatch() {
        let mut doc = document();
        doc.coefficients[1].pop();

        let err = Model::try_from(doc).unwrap_err();
        assert!(matches!(err, Error::ModelInvalid(ref m) if m.contains("'two'")), "{err}");
    }

    #[test]
    fn test_row_count_mismatch() {
        let mut doc = document();
        doc.coefficients.pop();

        assert!(matches!(Model::try_from(doc), Err(Error::ModelInvalid(_))));
    }

    #[test]
    fn test_intercept_count_mismatch() {
        let mut doc = document();
        doc.intercepts.push(1.0);

        assert!(matches!(Model::try_from(doc), Err(Error::ModelInvalid(_))));
    }

    #[test]
    fn test_no_classes() {
        let doc = ModelDocument {
            features: strings(&["a"]),
            classes: vec![],
            coefficients: vec![],
            intercepts: vec![],
        };

        assert!(matches!(Model::try_from(doc), Err(Error::ModelInvalid(_))));
    }

    #[test]
    fn test_duplicate_feature() {
        let mut doc = document();
        doc.features[2] = "a".to_string();

        let err = Model::try_from(doc).unwrap_err();
        assert!(err.to_string().contains("duplicate feature 'a'"));
    }

    #[test]
    fn test_empty_vocabulary_is_valid() {
        let doc = ModelDocument {
            features: vec![],
            classes: strings(&["only"]),
            coefficients: vec![vec![]],
            intercepts: vec![0.0],
        };

        let model = Model::try_from(doc).unwrap();
        assert_eq!(model.num_features(), 0);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "features": ["a", "b"],
            "classes": ["x", "y"],
            "coefficients": [[1.0, 0.0], [0.0, 1.0]],
            "intercepts": [0.0, 0.0]
        }"#;

        let model = Model::from_json(json).unwrap();
        assert_eq!(model.classes(), ["x", "y"]);
        assert_eq!(model.features(), ["a", "b"]);
    }

    #[test]
    fn test_from_json_missing_field() {
        let json = r#"{"features": ["a"], "classes": ["x"], "coefficients": [[1.0]]}"#;

        let err = Model::from_json(json).unwrap_err();
        assert!(matches!(err, Error::ModelLoad { .. }));
        assert!(err.to_string().contains("intercepts"), "{err}");
    }

    #[test]
    fn test_from_file_missing() {
        let err = Model::from_file("/nonexistent/features.json").unwrap_err();

        match err {
            Error::ModelLoad { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/features.json"))
            }
            other => panic!("Expected ModelLoad, got {other:?}"),
        }
    }
}
