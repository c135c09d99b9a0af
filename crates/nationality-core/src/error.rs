//! Error types for the nationality classifier

use std::path::{Path, PathBuf};

/// Result type alias using the classifier's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed underlying cause of a model load failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error type for model loading and classification
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model source could not be read or did not deserialize
    #[error("failed to load model from {}: {source}", .path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The model parameters have inconsistent dimensions
    #[error("invalid model: {0}")]
    ModelInvalid(String),

    /// No model is loaded under the requested name
    #[error("model not loaded: {0}")]
    ModelNotLoaded(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new model load error for the given source path
    pub fn model_load(path: impl AsRef<Path>, source: impl Into<BoxError>) -> Self {
        Self::ModelLoad {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Create a new invalid model error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::ModelInvalid(msg.into())
    }

    /// Create a new model-not-loaded error
    pub fn not_loaded(name: impl Into<String>) -> Self {
        Self::ModelNotLoaded(name.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
