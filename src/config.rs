//! Configuration management for the prediction service

use crate::predict::DEFAULT_PLACEHOLDER_TARGET;
use crate::schema::VocabularyPolicy;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Default configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub artifacts: ArtifactsConfig,
    pub prediction: PredictionConfig,
    pub logging: LoggingConfig,
}

/// Fitted artifact locations
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Fitted pipeline written by `habitrisk fit`
    pub pipeline_path: String,
    /// Linear classifier parameters (JSON)
    pub model_path: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            pipeline_path: "artifacts/pipeline.bin".to_string(),
            model_path: "artifacts/model.json".to_string(),
        }
    }
}

/// Request handling
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictionConfig {
    /// Target value written into request tables before transforming
    pub placeholder_target: String,
    /// Reject answers outside the known vocabularies instead of encoding them as unknown
    pub strict_vocabulary: bool,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            placeholder_target: DEFAULT_PLACEHOLDER_TARGET.to_string(),
            strict_vocabulary: false,
        }
    }
}

impl PredictionConfig {
    pub fn vocabulary_policy(&self) -> VocabularyPolicy {
        if self.strict_vocabulary {
            VocabularyPolicy::Strict
        } else {
            VocabularyPolicy::Permissive
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file, if present, and the environment
    pub fn load() -> Result<Self> {
        Self::build(File::with_name(DEFAULT_CONFIG_PATH).required(false))
    }

    /// Load configuration from a specific file and the environment
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(File::from(path.as_ref()))
    }

    fn build(file: File<config::FileSourceFile, config::FileFormat>) -> Result<Self> {
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("HABITRISK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
