//! Name nationality classifiers
//!
//! Predicts the nationality class of a person's name with a pre-trained
//! multinomial logistic regression over character n-grams:
//! - [`features`]: lowercasing, name-start marker and 1..3 character n-gram counts
//! - [`model`]: validated coefficient matrix and its JSON representation
//! - [`nationality`]: linear scoring, arg-max prediction and softmax probabilities
//!
//! Models are immutable after loading, so one classifier can be shared
//! across threads behind an `Arc`.

pub mod classifier;
pub mod config;
pub mod features;
pub mod model;
pub mod nationality;
pub mod registry;

pub use classifier::{ClassificationMetadata, ClassificationResult, Classifier};
pub use config::{ClassifierConfig, ModelConfigSpec};
pub use features::{extract_features, FeatureCount, FeatureCounts};
pub use model::{Model, ModelDocument};
pub use nationality::{ClassProbabilities, NameNationalityClassifier};
pub use registry::{load_config, ClassifierRegistry};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::model::Model;
    pub use crate::nationality::{ClassProbabilities, NameNationalityClassifier};
    pub use crate::registry::ClassifierRegistry;
}
