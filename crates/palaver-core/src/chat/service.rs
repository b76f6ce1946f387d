//! Chat service orchestrating storage and the provider router.
//!
//! ChatService is the single entry point the request handlers use. It owns
//! the repository and the provider router, so each handler is a thin
//! function of (request, service).

use palaver_types::chat::{
    Attachment, ChatMessage, ChatSession, MessageExchange, MessageRole, NewAttachment,
    NewChatMessage, SendMessage, SessionDraft,
};
use palaver_types::error::ChatError;
use palaver_types::llm::Message;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::chat::validation::{validate_new_session, validate_session_patch};
use crate::llm::router::ProviderRouter;

/// Orchestrates session lifecycle, message persistence, and the
/// send-message round-trip.
///
/// Generic over `ChatRepository` to maintain clean architecture
/// (palaver-core never depends on palaver-infra).
pub struct ChatService<R: ChatRepository> {
    repo: R,
    providers: ProviderRouter,
}

impl<R: ChatRepository> ChatService<R> {
    /// Create a new chat service with the given repository and providers.
    pub fn new(repo: R, providers: ProviderRouter) -> Self {
        Self { repo, providers }
    }

    /// Access the chat repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // --- Sessions ---

    /// Validate `draft` and create a session from it.
    pub async fn create_session(&self, draft: SessionDraft) -> Result<ChatSession, ChatError> {
        let new_session = validate_new_session(draft)?;
        let session = self.repo.create_session(new_session).await?;
        info!(session_id = %session.id, model = %session.model, "Session created");
        Ok(session)
    }

    /// All sessions, most recently active first.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.repo.list_sessions().await?)
    }

    pub async fn get_session(&self, session_id: &Uuid) -> Result<ChatSession, ChatError> {
        self.repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)
    }

    /// Validate `draft` as a partial update and merge it into the session.
    pub async fn update_session(
        &self,
        session_id: &Uuid,
        draft: SessionDraft,
    ) -> Result<ChatSession, ChatError> {
        let patch = validate_session_patch(draft)?;
        self.repo
            .update_session(session_id, &patch)
            .await?
            .ok_or(ChatError::SessionNotFound)
    }

    /// Delete a session and, with it, all of its messages.
    pub async fn delete_session(&self, session_id: &Uuid) -> Result<(), ChatError> {
        if !self.repo.delete_session(session_id).await? {
            return Err(ChatError::SessionNotFound);
        }
        info!(session_id = %session_id, "Session deleted");
        Ok(())
    }

    // --- Messages ---

    /// Conversation history of a session in created_at order.
    ///
    /// An unknown session simply has no messages.
    pub async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.repo.get_messages(session_id).await?)
    }

    pub async fn delete_message(&self, message_id: &Uuid) -> Result<(), ChatError> {
        let message = self
            .repo
            .get_message(message_id)
            .await?
            .ok_or(ChatError::MessageNotFound)?;
        if !self.repo.delete_message(message_id).await? {
            return Err(ChatError::MessageNotFound);
        }
        info!(message_id = %message_id, session_id = %message.session_id, "Message deleted");
        Ok(())
    }

    /// Persist the user's message, ask the routed provider for a reply over
    /// the full history, and persist the reply.
    ///
    /// If the provider call fails, the user message stays persisted; there
    /// is no compensating rollback.
    pub async fn send_message(
        &self,
        session_id: &Uuid,
        request: SendMessage,
    ) -> Result<MessageExchange, ChatError> {
        self.get_session(session_id).await?;

        let attachments = if request.attachment_ids.is_empty() {
            None
        } else {
            Some(self.resolve_attachments(&request.attachment_ids).await?)
        };

        let user_message = self
            .repo
            .create_message(NewChatMessage {
                session_id: *session_id,
                role: MessageRole::User,
                content: request.content,
                attachments,
                metadata: None,
            })
            .await?;

        let history: Vec<Message> = self
            .repo
            .get_messages(session_id)
            .await?
            .into_iter()
            .map(|m| Message {
                role: m.role,
                content: m.content,
            })
            .collect();

        let reply = match self.providers.send_message(history, &request.model).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    session_id = %session_id,
                    model = %request.model,
                    error = %e,
                    "Provider call failed, user message kept"
                );
                return Err(e.into());
            }
        };

        let ai_message = self
            .repo
            .create_message(NewChatMessage {
                session_id: *session_id,
                role: MessageRole::Assistant,
                content: reply.content,
                attachments: None,
                metadata: Some(serde_json::json!({
                    "model": reply.model,
                    "usage": reply.usage,
                })),
            })
            .await?;

        info!(
            session_id = %session_id,
            model = %request.model,
            user_message_id = %user_message.id,
            ai_message_id = %ai_message.id,
            "Message exchange persisted"
        );

        Ok(MessageExchange {
            user_message,
            ai_message,
        })
    }

    /// Look up each id, silently dropping ids that are malformed or unknown.
    async fn resolve_attachments(&self, ids: &[String]) -> Result<Vec<Attachment>, ChatError> {
        let mut resolved = Vec::with_capacity(ids.len());
        for raw in ids {
            let Ok(id) = raw.parse::<Uuid>() else {
                continue;
            };
            if let Some(attachment) = self.repo.get_attachment(&id).await? {
                resolved.push(attachment);
            }
        }
        Ok(resolved)
    }

    // --- Attachments ---

    /// Record metadata for already-stored uploads, in order.
    pub async fn create_attachments(
        &self,
        uploads: Vec<NewAttachment>,
    ) -> Result<Vec<Attachment>, ChatError> {
        let mut created = Vec::with_capacity(uploads.len());
        for upload in uploads {
            created.push(self.repo.create_attachment(upload).await?);
        }
        Ok(created)
    }
}
