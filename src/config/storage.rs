//! Configuration Storage
//!
//! This module reads the optional on-disk configuration file holding
//! model and request settings. The API key never lives here.

use crate::error::{InterviewPrepError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Application directory under the platform config dir
const APP_DIR: &str = "interview-prep";

/// Persistent configuration data
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Model identifier
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// API base URL
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Upper bound on generated tokens per request
    pub max_output_tokens: Option<u32>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the configuration file path
    pub fn config_file() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            InterviewPrepError::Config("Could not find configuration directory".to_string())
        })?;
        Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            InterviewPrepError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&content).map_err(|e| match e {
            InterviewPrepError::Config(msg) => {
                InterviewPrepError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            InterviewPrepError::Config(format!("Failed to parse config file: {}", e))
        })
    }
}
