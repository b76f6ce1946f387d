//! LLM request/response types for Palaver.
//!
//! These types model the provider-agnostic data shapes exchanged with the
//! upstream chat-completion services, plus the closed set of provider kinds
//! a model id can route to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generation cap applied to every upstream call.
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Request to an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
}

/// Normalized reply from either provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    /// Model identifier reported by the provider; may differ from the request.
    pub model: String,
    pub usage: Option<Usage>,
}

/// Token usage counters. Missing upstream counters default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Upstream API family a model id routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    DeepSeek,
}

impl ProviderKind {
    /// Resolve the provider for a model id by prefix.
    ///
    /// `gpt-` and `o1-` route to OpenAI, `deepseek-` to DeepSeek. The test is
    /// purely lexical: ids absent from the model catalog still route.
    pub fn from_model_id(model_id: &str) -> Option<Self> {
        if model_id.starts_with("gpt-") || model_id.starts_with("o1-") {
            Some(ProviderKind::OpenAi)
        } else if model_id.starts_with("deepseek-") {
            Some(ProviderKind::DeepSeek)
        } else {
            None
        }
    }

    /// Environment variable holding this provider's bearer credential.
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "OpenAI"),
            ProviderKind::DeepSeek => write!(f, "DeepSeek"),
        }
    }
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("{provider} Error: missing API key ({env_var} is not set)")]
    MissingApiKey {
        provider: ProviderKind,
        env_var: &'static str,
    },

    /// Network failure, non-success status, or malformed payload.
    #[error("{provider} Error: {message}")]
    Provider {
        provider: ProviderKind,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_routing() {
        assert_eq!(ProviderKind::from_model_id("gpt-4o"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::from_model_id("gpt-5"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::from_model_id("o1-mini"), Some(ProviderKind::OpenAi));
        assert_eq!(
            ProviderKind::from_model_id("deepseek-chat"),
            Some(ProviderKind::DeepSeek)
        );
        assert_eq!(
            ProviderKind::from_model_id("deepseek-reasoner"),
            Some(ProviderKind::DeepSeek)
        );
        assert_eq!(ProviderKind::from_model_id("llama-3"), None);
        // Prefix match is case-sensitive and requires the dash.
        assert_eq!(ProviderKind::from_model_id("GPT-4o"), None);
        assert_eq!(ProviderKind::from_model_id("o1"), None);
        assert_eq!(ProviderKind::from_model_id("deepseek"), None);
    }

    #[test]
    fn test_provider_kind_serde() {
        assert_eq!(serde_json::to_string(&ProviderKind::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(
            serde_json::to_string(&ProviderKind::DeepSeek).unwrap(),
            "\"deepseek\""
        );
    }

    #[test]
    fn test_provider_error_display() {
        let err = LlmError::Provider {
            provider: ProviderKind::DeepSeek,
            message: "Insufficient Balance".to_string(),
        };
        assert_eq!(err.to_string(), "DeepSeek Error: Insufficient Balance");

        let err = LlmError::UnknownModel("llama-3".to_string());
        assert_eq!(err.to_string(), "Unknown model: llama-3");
    }

    #[test]
    fn test_usage_serializes_camel_case() {
        let usage = Usage {
            prompt_tokens: 1,
            completion_tokens: 1,
            total_tokens: 2,
        };
        let json = serde_json::to_value(usage).unwrap();
        assert_eq!(json["promptTokens"], 1);
        assert_eq!(json["totalTokens"], 2);
    }

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let parsed: MessageRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
    }
}
