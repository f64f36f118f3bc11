//! AnalysisGateway - Requests one simulated analysis and validates the answer.
//!
//! The gateway owns the fixed prompt, the JSON-only response contract and the
//! request deadline. It never retries; every failure is reported once as an
//! [`AnalysisError`].

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use uuid::Uuid;

use crate::domain::analysis::{
    analysis_prompt, validator, AnalysisError, AnalysisResult, TargetUrl, ANALYSIS_TEMPERATURE,
};
use crate::domain::foundation::SessionId;
use crate::ports::{AIError, AIProvider, CompletionRequest, RequestMetadata};

/// Default deadline for one analysis request.
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(60);

/// Gateway to the text-generation backend.
///
/// Built without a provider when no credential is configured; callers check
/// [`is_configured`](Self::is_configured) before starting an analysis.
#[derive(Clone)]
pub struct AnalysisGateway {
    provider: Option<Arc<dyn AIProvider>>,
    timeout: Duration,
    temperature: f32,
}

impl AnalysisGateway {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider: Some(provider),
            timeout: DEFAULT_ANALYSIS_TIMEOUT,
            temperature: ANALYSIS_TEMPERATURE,
        }
    }

    /// A gateway with no backend; every request fails with `NotConfigured`.
    pub fn unconfigured() -> Self {
        Self {
            provider: None,
            timeout: DEFAULT_ANALYSIS_TIMEOUT,
            temperature: ANALYSIS_TEMPERATURE,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Whether a backend credential is available.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Request an analysis of `target_url` on behalf of `session_id`.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` without making a call if no provider is set
    /// - `BackendFailure` if the provider fails or the deadline passes
    /// - `MalformedPayload` if the answer is not a valid analysis object
    pub async fn request_analysis(
        &self,
        target_url: &TargetUrl,
        session_id: SessionId,
    ) -> Result<AnalysisResult, AnalysisError> {
        let provider = self.provider.as_ref().ok_or(AnalysisError::NotConfigured)?;

        let request = CompletionRequest::new(
            analysis_prompt(target_url),
            RequestMetadata::new(session_id, Uuid::new_v4().to_string()),
        )
        .with_json_response()
        .with_temperature(self.temperature);

        tracing::debug!(
            session_id = %session_id,
            host = %target_url.host(),
            provider = %provider.provider_info().name,
            "Requesting analysis"
        );

        let response = match timeout(self.timeout, provider.complete(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                tracing::warn!(session_id = %session_id, error = %err, "Analysis backend failed");
                return Err(AnalysisError::backend_failure(err.to_string()));
            }
            Err(_) => {
                let err = AIError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                };
                tracing::warn!(session_id = %session_id, error = %err, "Analysis backend timed out");
                return Err(AnalysisError::backend_failure(err.to_string()));
            }
        };

        validator::parse(&response.content).map_err(|err| {
            tracing::warn!(session_id = %session_id, error = %err, "Analysis payload rejected");
            AnalysisError::from(err)
        })
    }
}

impl std::fmt::Debug for AnalysisGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisGateway")
            .field(
                "provider",
                &self.provider.as_ref().map(|p| p.provider_info()),
            )
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::analysis::test_fixtures::SAMPLE_PAYLOAD;
    use crate::ports::ResponseFormat;

    fn url() -> TargetUrl {
        TargetUrl::parse("https://example.org").unwrap()
    }

    #[tokio::test]
    async fn unconfigured_gateway_makes_no_call() {
        let gateway = AnalysisGateway::unconfigured();
        assert!(!gateway.is_configured());
        assert_eq!(
            gateway.request_analysis(&url(), SessionId::new()).await,
            Err(AnalysisError::NotConfigured)
        );
    }

    #[tokio::test]
    async fn valid_payload_becomes_result() {
        let mock = MockAIProvider::new().with_response(SAMPLE_PAYLOAD);
        let gateway = AnalysisGateway::new(Arc::new(mock.clone()));

        let result = gateway.request_analysis(&url(), SessionId::new()).await.unwrap();
        assert_eq!(result.overall_score().value(), 80);

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].response_format, ResponseFormat::Json);
        assert_eq!(calls[0].temperature, Some(ANALYSIS_TEMPERATURE));
        assert!(calls[0].prompt.contains("\"https://example.org\""));
    }

    #[tokio::test]
    async fn fenced_payload_is_accepted() {
        let mock = MockAIProvider::new().with_response(format!("```json\n{}\n```", SAMPLE_PAYLOAD));
        let gateway = AnalysisGateway::new(Arc::new(mock));
        assert!(gateway.request_analysis(&url(), SessionId::new()).await.is_ok());
    }

    #[tokio::test]
    async fn missing_field_is_malformed_payload() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE_PAYLOAD).unwrap();
        value.as_object_mut().unwrap().remove("reportSummary");
        let mock = MockAIProvider::new().with_response(value.to_string());
        let gateway = AnalysisGateway::new(Arc::new(mock));

        let err = gateway.request_analysis(&url(), SessionId::new()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedPayload(ref m) if m.contains("reportSummary")));
    }

    #[tokio::test]
    async fn provider_error_is_backend_failure() {
        let mock = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "overloaded".to_string(),
        });
        let gateway = AnalysisGateway::new(Arc::new(mock.clone()));

        let err = gateway.request_analysis(&url(), SessionId::new()).await.unwrap_err();
        assert_eq!(
            err,
            AnalysisError::backend_failure("provider unavailable: overloaded")
        );
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let mock = MockAIProvider::new()
            .with_response(SAMPLE_PAYLOAD)
            .with_delay(Duration::from_millis(200));
        let gateway =
            AnalysisGateway::new(Arc::new(mock)).with_timeout(Duration::from_millis(20));

        let err = gateway.request_analysis(&url(), SessionId::new()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::BackendFailure(ref m) if m.contains("timed out")));
    }
}
