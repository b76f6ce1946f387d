//! LLM provider implementations.
//!
//! Contains the two concrete implementations of the [`LlmProvider`] trait
//! defined in `palaver-core`, and [`build_provider_router`], which wires both
//! into a [`ProviderRouter`] from the server config and loaded credentials.
//!
//! [`LlmProvider`]: palaver_core::llm::provider::LlmProvider

pub mod deepseek;
pub mod openai;

use std::time::Duration;

use palaver_core::llm::box_provider::BoxLlmProvider;
use palaver_core::llm::router::ProviderRouter;
use palaver_types::config::ServerConfig;
use palaver_types::llm::{LlmError, ProviderKind};

use crate::secret::ProviderCredentials;

use self::deepseek::DeepSeekProvider;
use self::openai::OpenAiProvider;

/// Build the provider router.
///
/// A missing credential is logged once here and otherwise tolerated: the
/// server still starts, and calls routed to that provider fail with
/// [`LlmError::MissingApiKey`].
pub fn build_provider_router(
    config: &ServerConfig,
    credentials: ProviderCredentials,
) -> Result<ProviderRouter, LlmError> {
    for kind in [ProviderKind::OpenAi, ProviderKind::DeepSeek] {
        if credentials.get(kind).is_none() {
            tracing::warn!(
                provider = %kind,
                env_var = kind.api_key_env_var(),
                "API key not set; requests routed to this provider will fail"
            );
        }
    }

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let openai = OpenAiProvider::new(
        credentials.openai.as_ref(),
        &config.openai_base_url,
        timeout,
    )?;
    let deepseek = DeepSeekProvider::new(credentials.deepseek, &config.deepseek_base_url, timeout)?;

    Ok(ProviderRouter::new(
        BoxLlmProvider::new(openai),
        BoxLlmProvider::new(deepseek),
    ))
}
