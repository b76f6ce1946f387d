//! ChatRepository trait definition.
//!
//! Provides CRUD operations for chat sessions, messages, and attachment
//! metadata. Identity and timestamps are assigned by the implementation.

use palaver_types::chat::{
    Attachment, ChatMessage, ChatSession, NewAttachment, NewChatMessage, NewChatSession,
    SessionPatch,
};
use palaver_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session, message, and attachment persistence.
///
/// Implementations live in palaver-infra (e.g., `InMemoryChatRepository`).
/// Each operation must appear atomic for a single entity; the only
/// cross-entity guarantees are the cascade in `delete_session` and the
/// `updated_at` touch in `create_message`.
pub trait ChatRepository: Send + Sync {
    /// Create a new session with a fresh id and `created_at == updated_at == now`.
    fn create_session(
        &self,
        session: NewChatSession,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// List all sessions, ordered by updated_at DESC.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Get a chat session by its unique ID.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Merge `patch` into the session and set updated_at to now.
    ///
    /// Returns `None` when the session does not exist.
    fn update_session(
        &self,
        session_id: &Uuid,
        patch: &SessionPatch,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Delete a session and every message it owns. Returns whether it existed.
    fn delete_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Save a new message and touch the owning session's updated_at.
    ///
    /// Does not validate that the session exists; callers check first.
    fn create_message(
        &self,
        message: NewChatMessage,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// Get messages for a session, ordered by created_at ASC.
    fn get_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Get a single message by ID.
    fn get_message(
        &self,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatMessage>, RepositoryError>> + Send;

    /// Delete one message. Leaves the session's updated_at alone.
    fn delete_message(
        &self,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Record metadata for an uploaded file.
    fn create_attachment(
        &self,
        attachment: NewAttachment,
    ) -> impl std::future::Future<Output = Result<Attachment, RepositoryError>> + Send;

    /// Get attachment metadata by ID.
    fn get_attachment(
        &self,
        attachment_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Attachment>, RepositoryError>> + Send;
}
