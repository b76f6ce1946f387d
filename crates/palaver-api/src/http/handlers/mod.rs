//! HTTP request handlers for the REST API.

pub mod message;
pub mod model;
pub mod session;
pub mod upload;

use uuid::Uuid;

use palaver_types::error::ChatError;

use crate::http::error::AppError;

/// Parse a session id from a path segment. A malformed id names no session.
pub(crate) fn parse_session_id(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Chat(ChatError::SessionNotFound))
}

/// Parse a message id from a path segment. A malformed id names no message.
pub(crate) fn parse_message_id(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Chat(ChatError::MessageNotFound))
}
