//! Configuration loading and management for wikiq.
//!
//! Loads optional defaults from `wikiq.toml`; CLI flags override whatever is
//! found here, and a missing file simply means built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Rewriter model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hugging Face model identifier (e.g., "google/flan-t5-base")
    #[serde(default = "default_model")]
    pub name: String,
    /// Explicit cache directory for downloaded model files
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

/// Wikipedia endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// MediaWiki API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

/// Summary rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Number of sentences to keep from the article intro
    #[serde(default = "default_sentences")]
    pub sentences: i64,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub wiki: WikiConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

fn default_model() -> String {
    "google/flan-t5-base".to_string()
}

fn default_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_sentences() -> i64 {
    5
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            cache_dir: None,
        }
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            sentences: default_sentences(),
        }
    }
}

impl Config {
    /// Load configuration from the default locations, falling back to
    /// built-in defaults when no config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("wikiq.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("wikiq").join("wikiq.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }
}
