//! LlmProvider trait definition.
//!
//! This is the core abstraction that both upstream providers implement.
//! Uses RPITIT for `complete`; [`BoxLlmProvider`](super::box_provider::BoxLlmProvider)
//! adds dynamic dispatch on top.

use palaver_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderKind};

/// Trait for LLM provider backends (OpenAI, DeepSeek).
///
/// Implementations live in palaver-infra (e.g., `DeepSeekProvider`).
/// A provider must not persist anything; the caller owns all side effects.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai", "deepseek").
    fn name(&self) -> &str;

    /// Which provider family this backend serves.
    fn kind(&self) -> ProviderKind;

    /// Send a completion request and receive the full normalized response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
