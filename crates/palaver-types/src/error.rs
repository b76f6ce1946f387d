use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in palaver-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors surfaced by chat operations to the request boundary.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Message not found")]
    MessageNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ProviderKind;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Storage("lock poisoned".to_string());
        assert_eq!(err.to_string(), "storage error: lock poisoned");
    }

    #[test]
    fn test_chat_error_is_transparent_over_llm() {
        let err: ChatError = LlmError::Provider {
            provider: ProviderKind::OpenAi,
            message: "invalid api key".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "OpenAI Error: invalid api key");
    }
}
