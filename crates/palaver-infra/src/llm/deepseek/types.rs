//! DeepSeek chat completions wire types.
//!
//! These are DeepSeek-specific request/response structures. They are NOT the
//! generic LLM types from palaver-types, which are provider-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct DeepSeekRequest {
    pub model: String,
    pub messages: Vec<DeepSeekMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepSeekMessage {
    pub role: String,
    pub content: String,
}

/// Non-streaming response body. Only the fields we read are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<DeepSeekChoice>,
    #[serde(default)]
    pub usage: Option<DeepSeekUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekChoice {
    pub message: DeepSeekResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token counters; any missing counter reads as zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeepSeekUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Error envelope: `{"error": {"message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekErrorResponse {
    pub error: DeepSeekErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekErrorBody {
    pub message: String,
}
