//! Provider routing: model id -> provider family -> one upstream call.
//!
//! The decision is made once from the model id prefix
//! ([`ProviderKind::from_model_id`]) and then matched exhaustively, so an
//! unrecognized id fails before any network I/O.

use tracing::{Instrument, debug, info_span};

use palaver_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MAX_OUTPUT_TOKENS, Message, ProviderKind,
};

use super::box_provider::BoxLlmProvider;

/// Holds one provider per [`ProviderKind`].
pub struct ProviderRouter {
    openai: BoxLlmProvider,
    deepseek: BoxLlmProvider,
}

impl ProviderRouter {
    pub fn new(openai: BoxLlmProvider, deepseek: BoxLlmProvider) -> Self {
        Self { openai, deepseek }
    }

    /// The provider serving `kind`.
    pub fn provider(&self, kind: ProviderKind) -> &BoxLlmProvider {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::DeepSeek => &self.deepseek,
        }
    }

    /// Send the full conversation `history` to whichever provider `model_id`
    /// routes to, with the fixed output cap.
    ///
    /// # Errors
    ///
    /// - [`LlmError::UnknownModel`] if the id matches no routing prefix.
    /// - Any provider-tagged error from the upstream call.
    pub async fn send_message(
        &self,
        history: Vec<Message>,
        model_id: &str,
    ) -> Result<CompletionResponse, LlmError> {
        let kind = ProviderKind::from_model_id(model_id)
            .ok_or_else(|| LlmError::UnknownModel(model_id.to_string()))?;
        let provider = self.provider(kind);

        let request = CompletionRequest {
            model: model_id.to_string(),
            messages: history,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.messages = request.messages.len(),
        );

        let response = provider.complete(&request).instrument(span).await?;

        let usage = response.usage.unwrap_or_default();
        debug!(
            provider = provider.name(),
            response_model = %response.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Provider call completed"
        );

        Ok(response)
    }
}
