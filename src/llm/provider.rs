//! LLM Provider Trait
//!
//! This module defines the trait-based abstraction for the text-generation
//! service, plus the response and model catalog types it produces.

use crate::error::{InterviewPrepError, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Capability name advertised by models that can generate content
pub const GENERATE_CONTENT: &str = "generateContent";

/// One piece of a structured response
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Generated text
    Text(String),
    /// Any non-text part (inline data, function calls, ...)
    Other(serde_json::Value),
}

/// Generated content, either plain text or an ordered fragment sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A single plain string
    Text(String),
    /// Ordered parts of a multi-part response
    Fragments(Vec<Fragment>),
}

impl Content {
    /// Recover the full generated text
    pub fn text(&self) -> String {
        match self {
            Content::Text(text) => text_from_plain(text),
            Content::Fragments(fragments) => text_from_fragments(fragments),
        }
    }
}

fn text_from_plain(text: &str) -> String {
    text.to_string()
}

/// Concatenate text fragments in order, skipping non-text ones
fn text_from_fragments(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .filter_map(|fragment| match fragment {
            Fragment::Text(text) => Some(text.as_str()),
            Fragment::Other(_) => None,
        })
        .collect()
}

/// LLM response
#[derive(Debug, Clone, PartialEq)]
pub struct LLMResponse {
    /// Generated content
    pub content: Content,
    /// Number of tokens used (input)
    pub input_tokens: Option<u32>,
    /// Number of tokens used (output)
    pub output_tokens: Option<u32>,
    /// Model used for generation
    pub model: Option<String>,
    /// Finish reason (e.g., "STOP", "MAX_TOKENS")
    pub finish_reason: Option<String>,
}

impl LLMResponse {
    /// Create a new response
    pub fn new(content: Content) -> Self {
        Self {
            content,
            input_tokens: None,
            output_tokens: None,
            model: None,
            finish_reason: None,
        }
    }

    /// Create a response holding plain text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(Content::Text(text.into()))
    }

    /// Extracted text of the response
    pub fn text(&self) -> String {
        self.content.text()
    }
}

/// LLM generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Maximum tokens to generate
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature (higher = more varied)
    pub temperature: Option<f32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_output_tokens: None,
            temperature: Some(0.7),
        }
    }
}

impl GenerationParams {
    /// Create new default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max tokens
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A model entry from the provider's catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Model identifier, e.g. `models/gemini-flash-latest`
    pub name: String,
    /// Human readable name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Capabilities the model supports
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Whether the model can be used for content generation
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == GENERATE_CONTENT)
    }
}

/// Trait for LLM providers
///
/// Every pipeline stage receives a provider handle explicitly, so tests can
/// substitute a stub implementation.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion for a single prompt
    ///
    /// # Arguments
    /// * `prompt` - Prompt text sent as one user turn
    /// * `params` - Generation parameters
    async fn generate(
        &self,
        prompt: &str,
        params: Option<&GenerationParams>,
    ) -> Result<LLMResponse>;

    /// Generate a completion and return only its text
    async fn generate_text(
        &self,
        prompt: &str,
        params: Option<&GenerationParams>,
    ) -> Result<String> {
        let response = self.generate(prompt, params).await?;
        Ok(response.text())
    }

    /// Fetch the full model catalog
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Check if the provider has an API key configured
    fn has_api_key(&self) -> bool;

    /// Validate the provider configuration
    fn validate_config(&self) -> Result<()> {
        if !self.has_api_key() {
            return Err(InterviewPrepError::ApiKeyMissing(
                self.provider_name().to_string(),
            ));
        }
        Ok(())
    }
}

/// Keep only models advertising the content generation capability
pub fn content_models(models: Vec<ModelInfo>) -> Vec<ModelInfo> {
    models
        .into_iter()
        .filter(ModelInfo::supports_generate_content)
        .collect()
}
