//! Gemini Provider - Implementation of AIProvider for Google's Generative Language API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! Requests go to `{base_url}/models/{model}:generateContent` with the key in
//! the `x-goog-api-key` header. JSON-only output is requested through
//! `generationConfig.responseMimeType`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    ResponseFormat, TokenUsage,
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::invalid_request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                response_mime_type: match request.response_format {
                    ResponseFormat::Json => Some("application/json".to_string()),
                    ResponseFormat::Text => None,
                },
            },
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&Self::to_gemini_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to provider errors.
    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();

        Err(Self::status_error(status.as_u16(), retry_after, &error_body))
    }

    fn status_error(status: u16, retry_after: Option<u32>, error_body: &str) -> AIError {
        let message = Self::error_message(error_body);
        match status {
            401 | 403 => AIError::AuthenticationFailed,
            429 => AIError::rate_limited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
            400 | 404 => AIError::invalid_request(message),
            500..=599 => AIError::unavailable(format!("Server error {}: {}", status, message)),
            _ => AIError::network(format!("Unexpected status {}: {}", status, message)),
        }
    }

    /// Extracts `error.message` from a Google API error body, falling back to the raw text.
    fn error_message(error_body: &str) -> String {
        serde_json::from_str::<GeminiErrorBody>(error_body)
            .ok()
            .map(|body| body.error.message)
            .unwrap_or_else(|| error_body.to_string())
    }

    fn into_completion(&self, response: GeminiResponse) -> Result<CompletionResponse, AIError> {
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(AIError::content_filtered(reason));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No candidates in response"))?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") | None => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                FinishReason::ContentFilter
            }
            Some(_) => FinishReason::Other,
        };

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if content.is_empty() && finish_reason == FinishReason::ContentFilter {
            return Err(AIError::content_filtered("response blocked by safety filters"));
        }

        let usage = response
            .usage_metadata
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            usage,
            model: response
                .model_version
                .unwrap_or_else(|| self.config.model.clone()),
            finish_reason,
        })
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        let response = Self::handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        self.into_completion(gemini_response)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    prompt_feedback: Option<PromptFeedback>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::ports::RequestMetadata;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(GeminiConfig::new("test-key")).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new("Analyze https://example.org", RequestMetadata::new(SessionId::new(), "t"))
            .with_json_response()
            .with_temperature(0.7)
    }

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-2.0-pro")
            .with_base_url("https://custom.api.com/v1")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "gemini-2.0-pro");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_debug_redacts_key() {
        let config = GeminiConfig::new("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn generate_url_embeds_model() {
        let provider = GeminiProvider::new(
            GeminiConfig::new("k").with_base_url("https://example.test/v1beta/"),
        )
        .unwrap();
        assert_eq!(
            provider.generate_url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_matches_wire_format() {
        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&request())).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Analyze https://example.org");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!(body["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn text_requests_omit_mime_type() {
        let plain = CompletionRequest::new("Hi", RequestMetadata::new(SessionId::new(), "t"));
        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&plain)).unwrap();
        assert!(body["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn status_errors_are_classified() {
        assert_eq!(
            GeminiProvider::status_error(401, None, ""),
            AIError::AuthenticationFailed
        );
        assert_eq!(
            GeminiProvider::status_error(403, None, ""),
            AIError::AuthenticationFailed
        );
        assert_eq!(
            GeminiProvider::status_error(429, Some(12), ""),
            AIError::rate_limited(12)
        );
        assert_eq!(
            GeminiProvider::status_error(429, None, ""),
            AIError::rate_limited(DEFAULT_RETRY_AFTER_SECS)
        );
        assert!(matches!(
            GeminiProvider::status_error(503, None, "overloaded"),
            AIError::Unavailable { .. }
        ));
        assert!(matches!(
            GeminiProvider::status_error(418, None, ""),
            AIError::Network(_)
        ));
    }

    #[test]
    fn error_message_prefers_api_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            GeminiProvider::status_error(400, None, body),
            AIError::invalid_request("API key not valid")
        );
        assert_eq!(GeminiProvider::error_message("plain text"), "plain text");
    }

    #[test]
    fn response_text_and_usage_are_extracted() {
        let raw = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"overallScore\":"}, {"text": "80}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 80, "totalTokenCount": 200},
            "modelVersion": "gemini-2.5-flash-001"
        }"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        let completion = provider().into_completion(response).unwrap();

        assert_eq!(completion.content, "{\"overallScore\":80}");
        assert_eq!(completion.usage.total_tokens, 200);
        assert_eq!(completion.model, "gemini-2.5-flash-001");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let raw = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            provider().into_completion(response).unwrap_err(),
            AIError::content_filtered("SAFETY")
        );
    }

    #[test]
    fn missing_candidates_is_parse_error() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            provider().into_completion(response),
            Err(AIError::Parse(_))
        ));
    }

    #[test]
    fn provider_info_reports_model() {
        let info = provider().provider_info();
        assert_eq!(info.name, "gemini");
        assert_eq!(info.model, DEFAULT_GEMINI_MODEL);
    }
}
