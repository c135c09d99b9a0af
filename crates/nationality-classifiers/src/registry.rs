//! Classifier registry initialization and management

use crate::{ClassifierConfig, NameNationalityClassifier};
use nationality_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// Registry of loaded nationality classifiers, addressed by name
pub struct ClassifierRegistry {
    /// Loaded classifier configuration
    config: ClassifierConfig,

    /// Instantiated classifiers by name
    classifiers: HashMap<String, Arc<NameNationalityClassifier>>,
}

impl ClassifierRegistry {
    /// Create an empty registry for the given configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            classifiers: HashMap::new(),
        }
    }

    /// Load every configured model, failing on the first one that does not load
    pub fn from_config(config: ClassifierConfig) -> Result<Self> {
        if let Some(default) = &config.default_model {
            if !config.models.contains_key(default) {
                return Err(Error::config(format!(
                    "default model '{}' is not configured",
                    default
                )));
            }
        }

        let mut registry = Self::new(config);
        registry.initialize_classifiers()?;

        Ok(registry)
    }

    /// Load registry from configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = load_config(path)?;
        Self::from_config(config)
    }

    fn initialize_classifiers(&mut self) -> Result<()> {
        info!("Initializing {} classifiers", self.config.models.len());

        for model_name in self.config.model_names() {
            let path = self.config.model_path(&model_name).ok_or_else(|| {
                Error::config(format!("Model {} not found in config", model_name))
            })?;

            match NameNationalityClassifier::from_path(&path) {
                Ok(classifier) => {
                    info!("Loaded model: {}", model_name);
                    self.register(model_name.clone(), classifier.with_name(model_name));
                }
                Err(e) => {
                    error!("Failed to load model {}: {}", model_name, e);
                    return Err(e);
                }
            }
        }

        info!("Initialized {} classifiers", self.classifiers.len());

        Ok(())
    }

    /// Register a classifier under `name`, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, classifier: NameNationalityClassifier) {
        self.classifiers.insert(name.into(), Arc::new(classifier));
    }

    /// Get a classifier by name
    pub fn get(&self, name: &str) -> Result<Arc<NameNationalityClassifier>> {
        self.classifiers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_loaded(name))
    }

    /// Get the configured default classifier
    pub fn default_classifier(&self) -> Result<Arc<NameNationalityClassifier>> {
        let name = self
            .config
            .default_model
            .as_deref()
            .ok_or_else(|| Error::config("no default model configured"))?;

        self.get(name)
    }

    /// Check if a classifier is registered
    pub fn contains(&self, name: &str) -> bool {
        self.classifiers.contains_key(name)
    }

    /// Get list of registered classifier names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classifiers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of loaded classifiers
    pub fn count(&self) -> usize {
        self.classifiers.len()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

/// Load classifier configuration from file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClassifierConfig> {
    ClassifierConfig::from_file(path.as_ref())
        .map_err(|e| Error::config(format!("Failed to load classifiers config: {}", e)))
}
