//! Static catalog of the models offered to the client.
//!
//! The catalog drives model selection in the UI. Routing does not consult it;
//! see [`ProviderKind::from_model_id`](crate::llm::ProviderKind::from_model_id).

use serde::Serialize;

use crate::llm::ProviderKind;

/// Id of the primary model, used when a request names none.
pub const DEFAULT_MODEL_ID: &str = "gpt-5";

/// One entry in the model catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: ProviderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// Available models, primary first.
pub const AVAILABLE_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "gpt-5",
        name: "GPT-5",
        provider: ProviderKind::OpenAi,
        description: Some("Latest OpenAI model"),
    },
    ModelInfo {
        id: "gpt-4o",
        name: "GPT-4 Turbo",
        provider: ProviderKind::OpenAi,
        description: Some("Fast and capable"),
    },
    ModelInfo {
        id: "deepseek-chat",
        name: "DeepSeek Chat",
        provider: ProviderKind::DeepSeek,
        description: Some("DeepSeek conversational model"),
    },
    ModelInfo {
        id: "deepseek-coder",
        name: "DeepSeek Coder",
        provider: ProviderKind::DeepSeek,
        description: Some("Specialized for coding tasks"),
    },
];

/// Exact-match lookup by id.
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    AVAILABLE_MODELS.iter().find(|m| m.id == id)
}
