//! In-memory implementation of [`ChatRepository`].
//!
//! Each entity lives in its own [`DashMap`], so every operation is atomic
//! for a single entity without a global lock. A process-wide sequence
//! number breaks timestamp ties, keeping orderings deterministic when two
//! writes land in the same clock tick.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use palaver_core::chat::repository::ChatRepository;
use palaver_types::chat::{
    Attachment, ChatMessage, ChatSession, NewAttachment, NewChatMessage, NewChatSession,
    SessionPatch,
};
use palaver_types::error::RepositoryError;

struct StoredSession {
    session: ChatSession,
    /// Sequence number of the last write that bumped `updated_at`.
    touched: u64,
}

struct StoredMessage {
    message: ChatMessage,
    seq: u64,
}

/// Repository backed by three concurrent maps: sessions, messages, attachments.
///
/// Nothing is persisted across restarts.
#[derive(Default)]
pub struct InMemoryChatRepository {
    sessions: DashMap<Uuid, StoredSession>,
    messages: DashMap<Uuid, StoredMessage>,
    attachments: DashMap<Uuid, Attachment>,
    seq: AtomicU64,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Bump `updated_at` to now, never earlier than `created_at`.
    fn touch(&self, stored: &mut StoredSession) {
        stored.session.updated_at = not_before(stored.session.created_at);
        stored.touched = self.next_seq();
    }
}

fn not_before(floor: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(floor)
}

impl ChatRepository for InMemoryChatRepository {
    async fn create_session(&self, session: NewChatSession) -> Result<ChatSession, RepositoryError> {
        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::now_v7(),
            title: session.title,
            model: session.model,
            mode: session.mode,
            is_pinned: session.is_pinned,
            created_at: now,
            updated_at: now,
        };

        self.sessions.insert(
            session.id,
            StoredSession {
                session: session.clone(),
                touched: self.next_seq(),
            },
        );
        Ok(session)
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        let mut stored: Vec<(DateTime<Utc>, u64, ChatSession)> = self
            .sessions
            .iter()
            .map(|entry| (entry.session.updated_at, entry.touched, entry.session.clone()))
            .collect();

        stored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        Ok(stored.into_iter().map(|(_, _, session)| session).collect())
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        Ok(self.sessions.get(session_id).map(|entry| entry.session.clone()))
    }

    async fn update_session(
        &self,
        session_id: &Uuid,
        patch: &SessionPatch,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let Some(mut entry) = self.sessions.get_mut(session_id) else {
            return Ok(None);
        };

        patch.apply_to(&mut entry.session);
        self.touch(&mut entry);
        Ok(Some(entry.session.clone()))
    }

    async fn delete_session(&self, session_id: &Uuid) -> Result<bool, RepositoryError> {
        if self.sessions.remove(session_id).is_none() {
            return Ok(false);
        }

        self.messages
            .retain(|_, stored| stored.message.session_id != *session_id);
        Ok(true)
    }

    async fn create_message(&self, message: NewChatMessage) -> Result<ChatMessage, RepositoryError> {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            session_id: message.session_id,
            role: message.role,
            content: message.content,
            attachments: message.attachments,
            metadata: message.metadata,
            created_at: Utc::now(),
        };

        self.messages.insert(
            message.id,
            StoredMessage {
                message: message.clone(),
                seq: self.next_seq(),
            },
        );

        if let Some(mut entry) = self.sessions.get_mut(&message.session_id) {
            self.touch(&mut entry);
        }

        Ok(message)
    }

    async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut stored: Vec<(DateTime<Utc>, u64, ChatMessage)> = self
            .messages
            .iter()
            .filter(|entry| entry.message.session_id == *session_id)
            .map(|entry| (entry.message.created_at, entry.seq, entry.message.clone()))
            .collect();

        stored.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        Ok(stored.into_iter().map(|(_, _, message)| message).collect())
    }

    async fn get_message(&self, message_id: &Uuid) -> Result<Option<ChatMessage>, RepositoryError> {
        Ok(self.messages.get(message_id).map(|entry| entry.message.clone()))
    }

    async fn delete_message(&self, message_id: &Uuid) -> Result<bool, RepositoryError> {
        Ok(self.messages.remove(message_id).is_some())
    }

    async fn create_attachment(&self, attachment: NewAttachment) -> Result<Attachment, RepositoryError> {
        let attachment = Attachment {
            id: Uuid::now_v7(),
            filename: attachment.filename,
            mimetype: attachment.mimetype,
            size: attachment.size,
            path: attachment.path,
            created_at: Utc::now(),
        };
        self.attachments.insert(attachment.id, attachment.clone());
        Ok(attachment)
    }

    async fn get_attachment(&self, attachment_id: &Uuid) -> Result<Option<Attachment>, RepositoryError> {
        Ok(self.attachments.get(attachment_id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palaver_types::chat::{ChatMode, MessageRole};

    fn new_session(title: &str) -> NewChatSession {
        NewChatSession {
            title: title.to_string(),
            model: "gpt-5".to_string(),
            mode: ChatMode::Chat,
            is_pinned: false,
        }
    }

    fn new_message(session_id: Uuid, role: MessageRole, content: &str) -> NewChatMessage {
        NewChatMessage {
            session_id,
            role,
            content: content.to_string(),
            attachments: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let repo = InMemoryChatRepository::new();
        let session = repo.create_session(new_session("Test chat")).await.unwrap();

        assert_eq!(session.created_at, session.updated_at);
        let fetched = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(fetched, session);
        assert!(repo.get_session(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let repo = InMemoryChatRepository::new();
        let a = repo.create_session(new_session("same")).await.unwrap();
        let b = repo.create_session(new_session("same")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_session_merges_and_bumps_updated_at() {
        let repo = InMemoryChatRepository::new();
        let session = repo.create_session(new_session("Before")).await.unwrap();

        let patch = SessionPatch {
            title: Some("After".to_string()),
            is_pinned: Some(true),
            ..Default::default()
        };
        let updated = repo.update_session(&session.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.title, "After");
        assert!(updated.is_pinned);
        assert_eq!(updated.model, "gpt-5");
        assert_eq!(updated.created_at, session.created_at);
        assert!(updated.updated_at >= session.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_session_returns_none() {
        let repo = InMemoryChatRepository::new();
        let result = repo
            .update_session(&Uuid::now_v7(), &SessionPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_sessions_most_recent_first() {
        let repo = InMemoryChatRepository::new();
        let first = repo.create_session(new_session("first")).await.unwrap();
        let second = repo.create_session(new_session("second")).await.unwrap();
        let third = repo.create_session(new_session("third")).await.unwrap();

        let ids: Vec<Uuid> = repo.list_sessions().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        // Appending a message moves the session to the front.
        repo.create_message(new_message(first.id, MessageRole::User, "hi"))
            .await
            .unwrap();
        let sessions = repo.list_sessions().await.unwrap();
        assert_eq!(sessions[0].id, first.id);
        assert!(sessions.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[tokio::test]
    async fn test_messages_returned_in_creation_order() {
        let repo = InMemoryChatRepository::new();
        let session = repo.create_session(new_session("order")).await.unwrap();

        let mut created = Vec::new();
        for i in 0..20 {
            let role = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            let msg = repo
                .create_message(new_message(session.id, role, &format!("msg {i}")))
                .await
                .unwrap();
            created.push(msg.id);
        }

        let messages = repo.get_messages(&session.id).await.unwrap();
        let ids: Vec<Uuid> = messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, created);
        assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn test_get_messages_is_scoped_to_session() {
        let repo = InMemoryChatRepository::new();
        let a = repo.create_session(new_session("a")).await.unwrap();
        let b = repo.create_session(new_session("b")).await.unwrap();

        repo.create_message(new_message(a.id, MessageRole::User, "for a"))
            .await
            .unwrap();
        repo.create_message(new_message(b.id, MessageRole::User, "for b"))
            .await
            .unwrap();

        let messages = repo.get_messages(&a.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "for a");
    }

    #[tokio::test]
    async fn test_create_message_touches_session() {
        let repo = InMemoryChatRepository::new();
        let session = repo.create_session(new_session("touch")).await.unwrap();
        let msg = repo
            .create_message(new_message(session.id, MessageRole::User, "hi"))
            .await
            .unwrap();

        let touched = repo.get_session(&session.id).await.unwrap().unwrap();
        assert!(touched.updated_at >= msg.created_at);
        assert!(touched.updated_at >= touched.created_at);
    }

    #[tokio::test]
    async fn test_create_message_without_session_is_allowed() {
        let repo = InMemoryChatRepository::new();
        let orphan_session = Uuid::now_v7();
        repo.create_message(new_message(orphan_session, MessageRole::System, "orphan"))
            .await
            .unwrap();

        assert_eq!(repo.get_messages(&orphan_session).await.unwrap().len(), 1);
        assert!(repo.list_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_session_cascades_to_messages() {
        let repo = InMemoryChatRepository::new();
        let doomed = repo.create_session(new_session("doomed")).await.unwrap();
        let kept = repo.create_session(new_session("kept")).await.unwrap();

        let doomed_msg = repo
            .create_message(new_message(doomed.id, MessageRole::User, "bye"))
            .await
            .unwrap();
        repo.create_message(new_message(kept.id, MessageRole::User, "stay"))
            .await
            .unwrap();

        assert!(repo.delete_session(&doomed.id).await.unwrap());
        assert!(repo.get_session(&doomed.id).await.unwrap().is_none());
        assert!(repo.get_messages(&doomed.id).await.unwrap().is_empty());
        assert!(repo.get_message(&doomed_msg.id).await.unwrap().is_none());
        assert_eq!(repo.get_messages(&kept.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_session_changes_nothing() {
        let repo = InMemoryChatRepository::new();
        let session = repo.create_session(new_session("still here")).await.unwrap();
        repo.create_message(new_message(session.id, MessageRole::User, "hi"))
            .await
            .unwrap();

        assert!(!repo.delete_session(&Uuid::now_v7()).await.unwrap());
        assert_eq!(repo.list_sessions().await.unwrap().len(), 1);
        assert_eq!(repo.get_messages(&session.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_message_does_not_touch_session() {
        let repo = InMemoryChatRepository::new();
        let session = repo.create_session(new_session("s")).await.unwrap();
        let msg = repo
            .create_message(new_message(session.id, MessageRole::User, "hi"))
            .await
            .unwrap();
        let before = repo.get_session(&session.id).await.unwrap().unwrap();

        assert!(repo.delete_message(&msg.id).await.unwrap());
        assert!(!repo.delete_message(&msg.id).await.unwrap());

        let after = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(after.updated_at, before.updated_at);
        assert!(repo.get_messages(&session.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_attachments_survive_session_delete() {
        let repo = InMemoryChatRepository::new();
        let attachment = repo
            .create_attachment(NewAttachment {
                filename: "notes.txt".to_string(),
                mimetype: "text/plain".to_string(),
                size: "12".to_string(),
                path: "uploads/abc".to_string(),
            })
            .await
            .unwrap();

        let session = repo.create_session(new_session("with file")).await.unwrap();
        repo.create_message(NewChatMessage {
            attachments: Some(vec![attachment.clone()]),
            ..new_message(session.id, MessageRole::User, "see file")
        })
        .await
        .unwrap();
        repo.delete_session(&session.id).await.unwrap();

        let fetched = repo.get_attachment(&attachment.id).await.unwrap().unwrap();
        assert_eq!(fetched, attachment);
        assert_eq!(fetched.size, "12");
    }
}
