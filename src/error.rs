//! Error types for Interview-Prep
//!
//! This module defines the error types used throughout the application.

use thiserror::Error;

/// Result type alias for Interview-Prep
pub type Result<T> = std::result::Result<T, InterviewPrepError>;

/// Main error type for Interview-Prep
#[derive(Error, Debug)]
pub enum InterviewPrepError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP-related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key configured for the provider
    #[error("API key missing for provider: {0}")]
    ApiKeyMissing(String),

    /// The remote API answered with a non-success status
    #[error("{provider} API error (status {status}): {message}")]
    LLMApiError {
        provider: String,
        message: String,
        status: u16,
    },

    /// A successful response whose body could not be understood
    #[error("{provider} returned an invalid response: {message}")]
    InvalidResponse { provider: String, message: String },

    /// Invalid header name or value
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Interactive input errors
    #[error("Input error: {0}")]
    Input(String),
}
