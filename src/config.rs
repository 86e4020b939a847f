//! YAML configuration file support for Folio.
//!
//! Ranking weights and "find similar" limits can be kept in a single YAML
//! file and loaded at startup.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "portfolio-prod"
//!
//! ranking:
//!   tag_weight: 0.7
//!   embedding_weight: 0.3
//!
//! similar:
//!   default_limit: 3
//!   max_limit: 50
//! ```

use std::fs;
use std::path::Path;

use catalog::SimilarPolicy;
use serde::{Deserialize, Serialize};
use similarity::{RankConfig, Ranker};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct FolioConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Blending weights for the similarity ranker
    #[serde(default)]
    pub ranking: RankConfig,

    /// Result-count policy for "find similar"
    #[serde(default)]
    pub similar: SimilarPolicy,
}

impl FolioConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: FolioConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.ranking
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;

        if self.similar.default_limit == 0 {
            return Err(ConfigLoadError::Validation(
                "similar.default_limit must be greater than zero".into(),
            ));
        }
        if self.similar.max_limit < self.similar.default_limit {
            return Err(ConfigLoadError::Validation(
                "similar.max_limit must be >= similar.default_limit".into(),
            ));
        }
        Ok(())
    }

    /// Build a ranker from the configured weights.
    pub fn ranker(&self) -> Result<Ranker, ConfigLoadError> {
        Ranker::new(self.ranking).map_err(|e| ConfigLoadError::Validation(e.to_string()))
    }
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            ranking: RankConfig::default(),
            similar: SimilarPolicy::default(),
        }
    }
}
