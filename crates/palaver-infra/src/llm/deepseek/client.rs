//! DeepSeekProvider -- concrete [`LlmProvider`] implementation for DeepSeek.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use palaver_core::llm::provider::LlmProvider;
use palaver_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderKind, Usage};

use super::types::{DeepSeekErrorResponse, DeepSeekMessage, DeepSeekRequest, DeepSeekResponse};

/// Sampling temperature sent with every DeepSeek request.
pub const DEEPSEEK_TEMPERATURE: f64 = 0.7;

/// DeepSeek chat completions provider.
///
/// Does not derive Debug so the key never reaches log output.
pub struct DeepSeekProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl DeepSeekProvider {
    /// Create a provider against `base_url` with the given request timeout.
    pub fn new(
        api_key: Option<SecretString>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| provider_error(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn to_deepseek_request(request: &CompletionRequest) -> DeepSeekRequest {
        DeepSeekRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| DeepSeekMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: DEEPSEEK_TEMPERATURE,
        }
    }
}

fn provider_error(message: String) -> LlmError {
    LlmError::Provider {
        provider: ProviderKind::DeepSeek,
        message,
    }
}

impl LlmProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        "deepseek"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DeepSeek
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::MissingApiKey {
            provider: ProviderKind::DeepSeek,
            env_var: ProviderKind::DeepSeek.api_key_env_var(),
        })?;

        let body = Self::to_deepseek_request(request);

        let response = self
            .client
            .post(self.url())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| provider_error(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<DeepSeekErrorResponse>(&error_body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => format!("HTTP {status}: {error_body}"),
            };
            return Err(provider_error(message));
        }

        let parsed: DeepSeekResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("failed to parse response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| provider_error("response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        let usage = parsed.usage.unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: parsed.model.unwrap_or_else(|| request.model.clone()),
            usage: Some(Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
        })
    }
}
