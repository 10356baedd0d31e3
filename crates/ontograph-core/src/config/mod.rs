//! Configuration management for ontograph.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `ontograph.toml` file
//! 3. User config `~/.config/ontograph/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

use crate::projection::ProjectionConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Graph projection settings.
    pub projection: ProjectionSettings,

    /// Axiom normalizer settings.
    pub normalizer: NormalizerConfig,

    /// Normal-form cache settings.
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./ontograph.toml` (project local)
    /// 2. `~/.config/ontograph/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(PROJECT_CONFIG_FILE).exists() {
            return Self::from_file(PROJECT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(strategy) = lookup("ONTOGRAPH_STRATEGY") {
            self.projection.strategy = strategy;
        }
        if let Some(value) = lookup("ONTOGRAPH_BIDIRECTIONAL_TAXONOMY") {
            self.projection.bidirectional_taxonomy =
                parse_bool("ONTOGRAPH_BIDIRECTIONAL_TAXONOMY", &value)?;
        }
        if let Some(value) = lookup("ONTOGRAPH_ONLY_TAXONOMY") {
            self.projection.only_taxonomy = parse_bool("ONTOGRAPH_ONLY_TAXONOMY", &value)?;
        }
        if let Some(value) = lookup("ONTOGRAPH_INCLUDE_LITERALS") {
            self.projection.include_literals = parse_bool("ONTOGRAPH_INCLUDE_LITERALS", &value)?;
        }
        if let Some(dir) = lookup("ONTOGRAPH_CACHE_DIR") {
            self.cache.dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

/// Graph projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Registered strategy name (`taxonomy`, `taxonomy_rels`, `dl2vec`,
    /// `owl2vec_star`).
    pub strategy: String,

    /// Also emit `superClassOf` edges.
    pub bidirectional_taxonomy: bool,

    /// Do not descend into restriction fillers.
    pub only_taxonomy: bool,

    /// Emit literal edges for annotations.
    pub include_literals: bool,

    /// Annotation properties followed by the literal projection.
    pub annotation_properties: Vec<String>,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            strategy: DEFAULT_STRATEGY.to_string(),
            bidirectional_taxonomy: false,
            only_taxonomy: false,
            include_literals: false,
            annotation_properties: DEFAULT_ANNOTATION_PROPERTIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ProjectionSettings {
    /// The projector configuration these settings describe.
    pub fn to_projection_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            bidirectional_taxonomy: self.bidirectional_taxonomy,
            only_taxonomy: self.only_taxonomy,
            include_literals: self.include_literals,
            annotation_properties: self.annotation_properties.clone(),
        }
    }
}

/// Axiom normalizer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Dropped axioms kept verbatim in a summary.
    pub max_recorded_issues: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_recorded_issues: DEFAULT_MAX_RECORDED_ISSUES,
        }
    }
}

/// Normal-form cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}
