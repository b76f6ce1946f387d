//! Explicit validation of caller-supplied drafts.
//!
//! Each function turns an unvalidated draft into its typed counterpart or a
//! [`ChatError::Validation`] naming the offending field.

use palaver_types::chat::{
    ChatMode, NewChatSession, SendMessage, SendMessageDraft, SessionDraft, SessionPatch,
};
use palaver_types::error::ChatError;
use palaver_types::model::DEFAULT_MODEL_ID;

/// Longest accepted model identifier.
pub const MAX_MODEL_ID_LEN: usize = 50;

/// Validate the fields of a new session, filling defaults for absent ones.
pub fn validate_new_session(draft: SessionDraft) -> Result<NewChatSession, ChatError> {
    let patch = validate_session_patch(draft)?;
    let defaults = NewChatSession::default();

    Ok(NewChatSession {
        title: patch.title.unwrap_or(defaults.title),
        model: patch.model.unwrap_or(defaults.model),
        mode: patch.mode.unwrap_or(defaults.mode),
        is_pinned: patch.is_pinned.unwrap_or(defaults.is_pinned),
    })
}

/// Validate a partial session update. Absent fields stay `None`.
pub fn validate_session_patch(draft: SessionDraft) -> Result<SessionPatch, ChatError> {
    let title = match draft.title {
        Some(title) if title.trim().is_empty() => {
            return Err(ChatError::Validation("title must not be blank".to_string()));
        }
        other => other,
    };

    let model = match draft.model {
        Some(model) => Some(validate_model_id(model)?),
        None => None,
    };

    let mode = match draft.mode {
        Some(mode) => Some(mode.parse::<ChatMode>().map_err(|_| {
            ChatError::Validation(format!("mode must be 'chat' or 'agent', got '{mode}'"))
        })?),
        None => None,
    };

    Ok(SessionPatch {
        title,
        model,
        mode,
        is_pinned: draft.is_pinned,
    })
}

/// Validate a send-message body.
///
/// Content must be a non-empty string. The model defaults to the catalog's
/// primary id and is otherwise left for the router to accept or reject.
pub fn validate_send_message(draft: SendMessageDraft) -> Result<SendMessage, ChatError> {
    let content = match draft.content {
        Some(content) if !content.is_empty() => content,
        _ => return Err(ChatError::Validation("Content is required".to_string())),
    };

    Ok(SendMessage {
        content,
        model: draft.model.unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
        attachment_ids: draft.attachment_ids.unwrap_or_default(),
    })
}

fn validate_model_id(model: String) -> Result<String, ChatError> {
    if model.trim().is_empty() {
        return Err(ChatError::Validation("model must not be empty".to_string()));
    }
    if model.chars().count() > MAX_MODEL_ID_LEN {
        return Err(ChatError::Validation(format!(
            "model must be at most {MAX_MODEL_ID_LEN} characters"
        )));
    }
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use palaver_types::chat::DEFAULT_SESSION_TITLE;

    fn draft(title: Option<&str>, model: Option<&str>, mode: Option<&str>) -> SessionDraft {
        SessionDraft {
            title: title.map(str::to_string),
            model: model.map(str::to_string),
            mode: mode.map(str::to_string),
            is_pinned: None,
        }
    }

    #[test]
    fn new_session_with_all_fields() {
        let session = validate_new_session(draft(Some("t"), Some("gpt-5"), Some("agent"))).unwrap();
        assert_eq!(session.title, "t");
        assert_eq!(session.model, "gpt-5");
        assert_eq!(session.mode, ChatMode::Agent);
        assert!(!session.is_pinned);
    }

    #[test]
    fn new_session_fills_defaults() {
        let session = validate_new_session(SessionDraft::default()).unwrap();
        assert_eq!(session.title, DEFAULT_SESSION_TITLE);
        assert_eq!(session.model, DEFAULT_MODEL_ID);
        assert_eq!(session.mode, ChatMode::Chat);
    }

    #[test]
    fn new_session_rejects_unknown_mode() {
        let err = validate_new_session(draft(None, None, Some("autopilot"))).unwrap_err();
        assert!(matches!(err, ChatError::Validation(msg) if msg.contains("autopilot")));
    }

    #[test]
    fn new_session_rejects_oversized_model() {
        let long = "gpt-".to_string() + &"x".repeat(60);
        let err = validate_new_session(draft(None, Some(&long), None)).unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[test]
    fn new_session_rejects_blank_title() {
        let err = validate_new_session(draft(Some("   "), None, None)).unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[test]
    fn patch_keeps_absent_fields_unset() {
        let patch = validate_session_patch(SessionDraft {
            is_pinned: Some(true),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            patch,
            SessionPatch {
                is_pinned: Some(true),
                ..Default::default()
            }
        );
    }

    #[test]
    fn send_message_requires_content() {
        let missing = validate_send_message(SendMessageDraft::default()).unwrap_err();
        assert!(matches!(missing, ChatError::Validation(_)));

        let empty = validate_send_message(SendMessageDraft {
            content: Some(String::new()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(empty, ChatError::Validation(_)));
    }

    #[test]
    fn send_message_defaults_model_and_attachments() {
        let msg = validate_send_message(SendMessageDraft {
            content: Some("hi".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(msg.content, "hi");
        assert_eq!(msg.model, "gpt-5");
        assert!(msg.attachment_ids.is_empty());
    }
}
