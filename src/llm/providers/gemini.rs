//! Google Gemini API Provider
//!
//! This module implements the LLMProvider trait for the Gemini REST API.

use crate::error::{InterviewPrepError, Result};
use crate::llm::client::{LLMHttpClient, DEFAULT_TIMEOUT_SECS};
use crate::llm::provider::{
    Content, Fragment, GenerationParams, LLMProvider, LLMResponse, ModelInfo,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gemini API base URL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Largest page models.list accepts
const MODELS_PAGE_SIZE: u32 = 1000;

/// Google Gemini API provider
pub struct GeminiProvider {
    /// API key for authentication
    api_key: String,
    /// Model to use (e.g., "gemini-flash-latest")
    model: String,
    /// API base URL
    base_url: String,
    /// HTTP client for making requests
    client: LLMHttpClient,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Arguments
    /// * `api_key` - Google API key (may be empty; calls then fail validation)
    /// * `model` - Model identifier (defaults to gemini-flash-latest)
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: GEMINI_API_BASE.to_string(),
            client: LLMHttpClient::with_timeout("Gemini", DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a client with a different request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Result<Self> {
        self.client = LLMHttpClient::with_timeout("Gemini", timeout_secs)?;
        Ok(self)
    }

    /// The configured model
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Model path segment; the API accepts both `x` and `models/x`
    fn model_path(&self) -> String {
        if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model_path())
    }

    /// models.list URL for one page; `page_token` comes from the previous page
    fn models_url(&self, page_token: Option<&str>) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&format!("{}/models", self.base_url)).map_err(|e| {
            InterviewPrepError::Config(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("pageSize", &MODELS_PAGE_SIZE.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }
        Ok(url)
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap> {
        LLMHttpClient::build_headers_with_auth(API_KEY_HEADER, &self.api_key)
    }

    /// Build the request body for a single user prompt
    fn build_request(&self, prompt: &str, params: Option<&GenerationParams>) -> GeminiRequest {
        let defaults = GenerationParams::default();
        let params = params.unwrap_or(&defaults);

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![serde_json::json!({ "text": prompt })],
            }],
            generation_config: Some(GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_output_tokens,
            }),
        }
    }

    fn parse_error(message: String) -> InterviewPrepError {
        InterviewPrepError::InvalidResponse {
            provider: "Gemini".to_string(),
            message,
        }
    }

    /// Convert a raw generateContent body into our response type
    fn parse_response(body: &str) -> Result<LLMResponse> {
        let response: GeminiResponse = serde_json::from_str(body)
            .map_err(|e| Self::parse_error(format!("Failed to parse response: {}", e)))?;

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            Self::parse_error(format!("Empty response: {}", reason))
        })?;

        let fragments = candidate
            .content
            .map(|content| content.parts.into_iter().map(to_fragment).collect())
            .unwrap_or_default();

        Ok(LLMResponse {
            content: Content::Fragments(fragments),
            input_tokens: response.usage_metadata.as_ref().and_then(|u| u.prompt_token_count),
            output_tokens: response
                .usage_metadata
                .as_ref()
                .and_then(|u| u.candidates_token_count),
            model: response.model_version,
            finish_reason: candidate.finish_reason,
        })
    }

    fn parse_models(body: &str) -> Result<ModelListResponse> {
        serde_json::from_str(body)
            .map_err(|e| Self::parse_error(format!("Failed to parse model list: {}", e)))
    }
}

/// Text parts become text fragments; anything else is kept opaque
fn to_fragment(part: serde_json::Value) -> Fragment {
    match part.get("text").and_then(|t| t.as_str()) {
        Some(text) => Fragment::Text(text.to_string()),
        None => Fragment::Other(part),
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: Option<&GenerationParams>,
    ) -> Result<LLMResponse> {
        self.validate_config()?;

        let request = self.build_request(prompt, params);
        let headers = self.build_headers()?;

        debug!(model = %self.model, prompt_len = prompt.len(), "generateContent");
        let body = self
            .client
            .post_json(&self.generate_url(), headers, &request)
            .await?;

        Self::parse_response(&body)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        self.validate_config()?;

        let headers = self.build_headers()?;
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = self.models_url(page_token.as_deref())?;
            let body = self.client.get(url.as_str(), headers.clone()).await?;
            let page = Self::parse_models(&body)?;
            debug!(count = page.models.len(), "fetched model page");
            models.extend(page.models);

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(models)
    }

    fn provider_name(&self) -> &str {
        "Gemini"
    }

    fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Gemini generateContent request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// A conversation turn; parts stay as raw JSON so non-text parts survive
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Gemini generateContent response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

/// Gemini models.list response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_provider_creation() {
        let provider = GeminiProvider::new("test-key", None).unwrap();
        assert_eq!(provider.model(), "gemini-flash-latest");
        assert_eq!(provider.provider_name(), "Gemini");
        assert!(provider.has_api_key());
    }

    #[test]
    fn test_urls() {
        let provider = GeminiProvider::new("k", Some("gemini-2.5-flash".to_string()))
            .unwrap()
            .with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            provider.generate_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            provider.models_url(None).unwrap().as_str(),
            "http://localhost:8080/v1beta/models?pageSize=1000"
        );
        assert_eq!(
            provider.models_url(Some("a b/c")).unwrap().as_str(),
            "http://localhost:8080/v1beta/models?pageSize=1000&pageToken=a+b%2Fc"
        );

        let provider = GeminiProvider::new("k", Some("models/gemini-pro".to_string())).unwrap();
        assert_eq!(
            provider.generate_url(),
            format!("{}/models/gemini-pro:generateContent", GEMINI_API_BASE)
        );
    }

    #[test]
    fn test_request_body() {
        let provider = GeminiProvider::new("k", None).unwrap();
        let request = provider.build_request("Hello", None);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["contents"],
            serde_json::json!([{"role": "user", "parts": [{"text": "Hello"}]}])
        );
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
        assert!(json["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn test_parse_multi_part_response() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "1. What is a list?\n"},
                        {"functionCall": {"name": "noop", "args": {}}},
                        {"text": "2. What is a tuple?"}
                    ]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 20},
            "modelVersion": "gemini-2.5-flash"
        }"#;

        let response = GeminiProvider::parse_response(body).unwrap();
        assert_eq!(response.text(), "1. What is a list?\n2. What is a tuple?");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(response.input_tokens, Some(12));
        assert_eq!(response.output_tokens, Some(20));
        assert_eq!(response.model.as_deref(), Some("gemini-2.5-flash"));

        match response.content {
            Content::Fragments(fragments) => {
                assert_eq!(fragments.len(), 3);
                assert!(matches!(fragments[1], Fragment::Other(_)));
            }
            Content::Text(_) => panic!("expected fragments"),
        }
    }

    #[test]
    fn test_parse_blocked_response() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = GeminiProvider::parse_response(body).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));

        let err = GeminiProvider::parse_response("not json").unwrap_err();
        assert!(matches!(err, InterviewPrepError::InvalidResponse { .. }));
        assert!(err
            .to_string()
            .starts_with("Gemini returned an invalid response: Failed to parse response"));
        assert!(!err.to_string().contains("status"));
    }

    #[test]
    fn test_parse_models() {
        let body = r#"{
            "models": [
                {
                    "name": "models/gemini-flash-latest",
                    "displayName": "Gemini Flash Latest",
                    "supportedGenerationMethods": ["generateContent", "countTokens"]
                },
                {
                    "name": "models/embedding-001",
                    "supportedGenerationMethods": ["embedContent"]
                }
            ]
        }"#;

        let page = GeminiProvider::parse_models(body).unwrap();
        assert_eq!(page.next_page_token, None);
        let models = page.models;
        assert_eq!(models.len(), 2);
        assert!(models[0].supports_generate_content());
        assert_eq!(models[0].display_name.as_deref(), Some("Gemini Flash Latest"));
        assert!(!models[1].supports_generate_content());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let provider = GeminiProvider::new("", None).unwrap();
        assert!(!provider.has_api_key());

        let err = provider.generate("Hello", None).await.unwrap_err();
        assert!(matches!(err, InterviewPrepError::ApiKeyMissing(_)));

        let err = provider.list_models().await.unwrap_err();
        assert!(matches!(err, InterviewPrepError::ApiKeyMissing(_)));
    }

    /// Serve canned model pages; the second page only for a pageToken request
    async fn serve_model_pages(
        listener: tokio::net::TcpListener,
        requests: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    ) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == &b"\r\n\r\n"[..]) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let head = String::from_utf8_lossy(&head).to_ascii_lowercase();
            requests.lock().unwrap().push(head.clone());

            let body = if head.contains("pagetoken=abc") {
                r#"{"models": [{"name": "models/page-two", "supportedGenerationMethods": ["generateContent"]}]}"#
            } else {
                r#"{"models": [{"name": "models/page-one", "supportedGenerationMethods": ["generateContent"]}], "nextPageToken": "abc"}"#
            };
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
    }

    #[tokio::test]
    async fn test_list_models_follows_page_tokens() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        tokio::spawn(serve_model_pages(listener, requests.clone()));

        let provider = GeminiProvider::new("test-key", None)
            .unwrap()
            .with_base_url(format!("http://{}/v1beta", addr));
        let models = provider.list_models().await.unwrap();

        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["models/page-one", "models/page-two"]);

        let requests = requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("get /v1beta/models?pagesize=1000 http/1.1"));
        assert!(requests[1].starts_with("get /v1beta/models?pagesize=1000&pagetoken=abc http/1.1"));
        assert!(requests[0].contains("x-goog-api-key: test-key"));
    }
}
