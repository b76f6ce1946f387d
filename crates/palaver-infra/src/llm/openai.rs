//! OpenAI provider.
//!
//! Uses [`async_openai`] for type-safe request building against the chat
//! completions endpoint. Responses are decoded into a local shape whose usage
//! counters default to zero, since upstreams and proxies do not always report
//! all three. The base URL is configurable so tests and proxies can stand in
//! for `https://api.openai.com/v1`.

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use backoff::ExponentialBackoff;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use palaver_core::llm::provider::LlmProvider;
use palaver_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, Message, MessageRole, ProviderKind, Usage,
};

/// OpenAI chat completions provider.
///
/// The client is only built when a key is configured; without one every
/// call fails with [`LlmError::MissingApiKey`] before any network I/O.
/// Each call makes exactly one upstream attempt bounded by `timeout`.
///
/// Does NOT derive Debug: the `async_openai::Client` holds the API key.
pub struct OpenAiProvider {
    client: Option<Client<OpenAIConfig>>,
}

impl OpenAiProvider {
    pub fn new(
        api_key: Option<&SecretString>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let Some(key) = api_key else {
            return Ok(Self { client: None });
        };

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                provider: ProviderKind::OpenAi,
                message: format!("failed to create HTTP client: {e}"),
            })?;
        let config = OpenAIConfig::new()
            .with_api_key(key.expose_secret())
            .with_api_base(base_url);
        let client = Client::with_config(config)
            .with_http_client(http_client)
            .with_backoff(no_retry());

        Ok(Self {
            client: Some(client),
        })
    }

    fn build_request(request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages = request.messages.iter().map(to_openai_message).collect();

        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages,
            max_completion_tokens: Some(request.max_tokens),
            ..Default::default()
        }
    }
}

/// A backoff policy whose first `next_backoff` already returns `None`, so
/// rate-limit and 5xx responses fail on the first attempt.
fn no_retry() -> ExponentialBackoff {
    ExponentialBackoff {
        max_elapsed_time: Some(Duration::ZERO),
        ..Default::default()
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    model: String,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

fn to_openai_message(msg: &Message) -> ChatCompletionRequestMessage {
    match msg.role {
        MessageRole::System => {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(msg.content.clone()),
                name: None,
            })
        }
        MessageRole::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
            name: None,
        }),
        MessageRole::Assistant => {
            #[allow(deprecated)]
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                    msg.content.clone(),
                )),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}

impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let client = self.client.as_ref().ok_or(LlmError::MissingApiKey {
            provider: ProviderKind::OpenAi,
            env_var: ProviderKind::OpenAi.api_key_env_var(),
        })?;

        let response: ChatCompletion = client
            .chat()
            .create_byot(Self::build_request(request))
            .await
            .map_err(map_openai_error)?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Provider {
                provider: ProviderKind::OpenAi,
                message: "response contained no choices".to_string(),
            })?;
        let content = choice.message.content.unwrap_or_default();

        let usage = response.usage.unwrap_or_default();
        let usage = Usage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        };

        Ok(CompletionResponse {
            content,
            model: response.model,
            usage: Some(usage),
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to a provider-tagged [`LlmError`].
///
/// API errors surface the upstream `error.message`; everything else uses the
/// error's own rendering.
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    let message = match err {
        OpenAIError::ApiError(api_err) => api_err.message,
        other => other.to_string(),
    };
    LlmError::Provider {
        provider: ProviderKind::OpenAi,
        message,
    }
}
