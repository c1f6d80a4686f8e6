//! LLM HTTP Client
//!
//! This module provides a reusable HTTP client for making requests to LLM APIs.
//! Requests are single round trips; failures are returned to the caller as-is.

use crate::error::{InterviewPrepError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (in seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP client for LLM API requests
#[derive(Clone)]
pub struct LLMHttpClient {
    /// Reqwest HTTP client
    client: Client,
    /// Provider name used in error messages
    provider: String,
}

impl LLMHttpClient {
    /// Create a new HTTP client with default settings
    pub fn new(provider: impl Into<String>) -> Result<Self> {
        Self::with_timeout(provider, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(provider: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            provider: provider.into(),
        })
    }

    /// Make a POST request with a JSON body
    ///
    /// # Returns
    /// Response body as string
    pub async fn post_json<T: Serialize>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &T,
    ) -> Result<String> {
        debug!(url, "POST");
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        self.read_body(response).await
    }

    /// Make a GET request
    ///
    /// # Returns
    /// Response body as string
    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<String> {
        debug!(url, "GET");
        let response = self.client.get(url).headers(headers).send().await?;

        self.read_body(response).await
    }

    /// Return the body of a successful response, or an API error
    async fn read_body(&self, response: Response) -> Result<String> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.text().await?);
        }

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());

        Err(InterviewPrepError::LLMApiError {
            provider: self.provider.clone(),
            message: response_text,
            status: status.as_u16(),
        })
    }

    /// Build JSON headers with a custom authorization header
    pub fn build_headers_with_auth(auth_header: &str, auth_value: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self::add_header(headers, auth_header, auth_value)
    }

    /// Add custom header to existing headers
    pub fn add_header(mut headers: HeaderMap, key: &str, value: &str) -> Result<HeaderMap> {
        let key_header = HeaderName::from_str(key).map_err(|_| {
            InterviewPrepError::InvalidHeader(format!("Invalid header name: {}", key))
        })?;
        // Never echo the value, it is usually a secret
        let value_header = HeaderValue::from_str(value).map_err(|_| {
            InterviewPrepError::InvalidHeader(format!("Invalid header value for {}", key))
        })?;

        headers.insert(key_header, value_header);
        Ok(headers)
    }
}
