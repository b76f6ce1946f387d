//! Chat session, message, and attachment types for Palaver.
//!
//! Field names serialize in camelCase (`sessionId`, `isPinned`, `createdAt`)
//! because that is the wire shape the browser client consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::model::DEFAULT_MODEL_ID;

// Re-export MessageRole from llm module (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

/// Title given to sessions created without one ("new conversation").
pub const DEFAULT_SESSION_TITLE: &str = "محادثة جديدة";

/// Conversation mode of a session.
///
/// `Agent` is a UI-level variant; the server treats both modes identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Chat,
    Agent,
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatMode::Chat => write!(f, "chat"),
            ChatMode::Agent => write!(f, "agent"),
        }
    }
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chat" => Ok(ChatMode::Chat),
            "agent" => Ok(ChatMode::Agent),
            other => Err(format!("invalid chat mode: '{other}'")),
        }
    }
}

/// A named conversation thread.
///
/// `updated_at` is bumped on every partial update and every appended message,
/// so it never precedes `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: Uuid,
    pub title: String,
    pub model: String,
    pub mode: ChatMode,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new session. Identity and timestamps are assigned
/// by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChatSession {
    pub title: String,
    pub model: String,
    pub mode: ChatMode,
    pub is_pinned: bool,
}

impl Default for NewChatSession {
    fn default() -> Self {
        Self {
            title: DEFAULT_SESSION_TITLE.to_string(),
            model: DEFAULT_MODEL_ID.to_string(),
            mode: ChatMode::Chat,
            is_pinned: false,
        }
    }
}

/// Validated partial update for a session. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPatch {
    pub title: Option<String>,
    pub model: Option<String>,
    pub mode: Option<ChatMode>,
    pub is_pinned: Option<bool>,
}

impl SessionPatch {
    /// Merge the set fields into `session`. Does not touch timestamps.
    pub fn apply_to(&self, session: &mut ChatSession) {
        if let Some(ref title) = self.title {
            session.title = title.clone();
        }
        if let Some(ref model) = self.model {
            session.model = model.clone();
        }
        if let Some(mode) = self.mode {
            session.mode = mode;
        }
        if let Some(is_pinned) = self.is_pinned {
            session.is_pinned = is_pinned;
        }
    }
}

/// Unvalidated session fields as they arrive from a caller.
///
/// Both the create and the partial-update paths run this through
/// `palaver_core::chat::validation` before touching the repository.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub title: Option<String>,
    pub model: Option<String>,
    pub mode: Option<String>,
    pub is_pinned: Option<bool>,
}

/// Unvalidated send-message body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageDraft {
    pub content: Option<String>,
    pub model: Option<String>,
    pub attachment_ids: Option<Vec<String>>,
}

/// Validated send-message request.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessage {
    pub content: String,
    pub model: String,
    /// Raw ids as sent by the client; ids that fail to resolve are dropped.
    pub attachment_ids: Vec<String>,
}

/// A single turn within a chat session.
///
/// Messages are ordered by `created_at` within a session; that order is also
/// the conversation order sent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    /// Resolved attachments (user messages only). `None` when the request
    /// named no attachment ids.
    pub attachments: Option<Vec<Attachment>>,
    /// Opaque structured data, e.g. `{model, usage}` on assistant replies.
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new message. Identity and `created_at` are assigned by the
/// repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChatMessage {
    pub session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub attachments: Option<Vec<Attachment>>,
    pub metadata: Option<serde_json::Value>,
}

/// Metadata for an uploaded file. Referenced, never owned, by messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Uuid,
    pub filename: String,
    pub mimetype: String,
    /// Decimal byte count.
    pub size: String,
    /// Opaque storage location of the bytes.
    pub path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAttachment {
    pub filename: String,
    pub mimetype: String,
    pub size: String,
    pub path: String,
}

/// The pair of messages persisted by one send-message round-trip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageExchange {
    pub user_message: ChatMessage,
    pub ai_message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session() -> ChatSession {
        let now = Utc::now();
        ChatSession {
            id: Uuid::now_v7(),
            title: "Test chat".to_string(),
            model: "gpt-5".to_string(),
            mode: ChatMode::Chat,
            is_pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_chat_mode_roundtrip() {
        for mode in [ChatMode::Chat, ChatMode::Agent] {
            let s = mode.to_string();
            let parsed: ChatMode = s.parse().unwrap();
            assert_eq!(mode, parsed);
        }
        assert!("robot".parse::<ChatMode>().is_err());
    }

    #[test]
    fn test_new_session_defaults() {
        let draft = NewChatSession::default();
        assert_eq!(draft.title, DEFAULT_SESSION_TITLE);
        assert_eq!(draft.model, "gpt-5");
        assert_eq!(draft.mode, ChatMode::Chat);
        assert!(!draft.is_pinned);
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut session = make_session();
        let patch = SessionPatch {
            is_pinned: Some(true),
            mode: Some(ChatMode::Agent),
            ..Default::default()
        };
        patch.apply_to(&mut session);

        assert!(session.is_pinned);
        assert_eq!(session.mode, ChatMode::Agent);
        assert_eq!(session.title, "Test chat");
        assert_eq!(session.model, "gpt-5");
    }

    #[test]
    fn test_chat_session_serializes_camel_case() {
        let json = serde_json::to_value(make_session()).unwrap();
        assert_eq!(json["isPinned"], false);
        assert_eq!(json["mode"], "chat");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_session_draft_accepts_partial_json() {
        let draft: SessionDraft = serde_json::from_str(r#"{"isPinned": true}"#).unwrap();
        assert_eq!(draft.is_pinned, Some(true));
        assert!(draft.title.is_none());
    }
}
