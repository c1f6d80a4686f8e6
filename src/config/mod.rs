//! Configuration module
//!
//! This module resolves runtime settings from built-in defaults, the optional
//! config file, the environment (including a local `.env`) and CLI overrides.

pub mod storage;

use crate::error::Result;
use crate::llm::client::DEFAULT_TIMEOUT_SECS;
use crate::llm::providers::gemini::{GeminiProvider, DEFAULT_MODEL, GEMINI_API_BASE};
use crate::llm::GenerationParams;
use std::path::Path;
use tracing::debug;

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Load a local `.env` file into the process environment, if present
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) => debug!("no .env loaded: {}", e),
    }
}

/// Read the API key from the environment; blank values count as missing
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Resolved application settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// API credential, if any
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Sampling temperature for every request
    pub temperature: f32,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Upper bound on generated tokens per request; provider default if unset
    pub max_output_tokens: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_output_tokens: None,
        }
    }
}

impl Settings {
    /// Layer a config file over the defaults
    pub fn from_file_config(config: storage::Config) -> Self {
        let defaults = Self::default();
        Self {
            api_key: None,
            model: config.model.unwrap_or(defaults.model),
            temperature: config.temperature.unwrap_or(defaults.temperature),
            base_url: config.base_url.unwrap_or(defaults.base_url),
            timeout_secs: config.timeout_secs.unwrap_or(defaults.timeout_secs),
            max_output_tokens: config.max_output_tokens.or(defaults.max_output_tokens),
        }
    }

    /// Load settings: defaults, then config file, then environment
    ///
    /// `config_path` overrides the default config file location.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => storage::Config::load_from(path)?,
            None => storage::Config::load()?,
        };

        Ok(Self::from_file_config(config).with_api_key(api_key_from_env()))
    }

    /// Set the credential
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Override the model when one is given
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }

    /// Whether a credential is available
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generation parameters shared by all pipeline requests
    pub fn generation_params(&self) -> GenerationParams {
        let params = GenerationParams::new().with_temperature(self.temperature);
        match self.max_output_tokens {
            Some(max_output_tokens) => params.with_max_output_tokens(max_output_tokens),
            None => params,
        }
    }

    /// Build the Gemini provider described by these settings
    pub fn build_provider(&self) -> Result<GeminiProvider> {
        let provider = GeminiProvider::new(
            self.api_key.clone().unwrap_or_default(),
            Some(self.model.clone()),
        )?
        .with_base_url(self.base_url.clone())
        .with_timeout(self.timeout_secs)?;
        Ok(provider)
    }
}
