//! LLM integration module
//!
//! This module provides the trait-based text-generation service abstraction
//! and the Gemini implementation.

pub mod client;
pub mod provider;

// Provider implementations
pub mod providers {
    pub mod gemini;
}

// Re-exports
pub use provider::{
    content_models, Content, Fragment, GenerationParams, LLMProvider, LLMResponse, ModelInfo,
};
pub use providers::gemini::GeminiProvider;
