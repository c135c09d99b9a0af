//! Configuration for classifiers and model loading

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration for all classifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Model configurations by name
    #[serde(default)]
    pub models: BTreeMap<String, ModelConfigSpec>,

    /// Model served when callers do not ask for one by name
    #[serde(default)]
    pub default_model: Option<String>,

    /// Base directory for relative model paths
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
}

/// Model configuration specification (for YAML/config files)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfigSpec {
    /// Path to the model JSON, absolute or relative to `models_dir`
    pub path: PathBuf,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            models: BTreeMap::new(),
            default_model: None,
            models_dir: default_models_dir(),
        }
    }
}

impl ClassifierConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }

    /// Resolved filesystem path of a configured model
    pub fn model_path(&self, name: &str) -> Option<PathBuf> {
        let spec = self.models.get(name)?;

        if spec.path.is_absolute() {
            Some(spec.path.clone())
        } else {
            Some(self.models_dir.join(&spec.path))
        }
    }

    /// Get all model names
    pub fn model_names(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_config_yaml() {
        let yaml = r#"
models:
  nationality:
    path: features.json
    description: "china / russia / rest"

  legacy:
    path: /opt/models/legacy.json

default_model: nationality
models_dir: ./my-models
"#;

        let config = ClassifierConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.models.len(), 2);
        assert_eq!(config.model_names(), ["legacy", "nationality"]);
        assert_eq!(config.default_model.as_deref(), Some("nationality"));
        assert_eq!(config.models_dir, PathBuf::from("./my-models"));
        assert_eq!(
            config.models["nationality"].description.as_deref(),
            Some("china / russia / rest")
        );
    }

    #[test]
    fn test_model_path_resolution() {
        let yaml = r#"
models:
  relative:
    path: nested/features.json
  absolute:
    path: /opt/models/features.json
"#;

        let config = ClassifierConfig::from_yaml(yaml).unwrap();

        assert_eq!(
            config.model_path("relative").unwrap(),
            PathBuf::from("./models/nested/features.json")
        );
        assert_eq!(
            config.model_path("absolute").unwrap(),
            PathBuf::from("/opt/models/features.json")
        );
        assert!(config.model_path("missing").is_none());
    }

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::from_yaml("{}").unwrap();

        assert!(config.models.is_empty());
        assert!(config.default_model.is_none());
        assert_eq!(config.models_dir, PathBuf::from("./models"));
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let yaml = r#"
models:
  broken:
    description: no path
"#;

        assert!(ClassifierConfig::from_yaml(yaml).is_err());
    }
}
