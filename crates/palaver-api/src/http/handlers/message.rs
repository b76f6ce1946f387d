//! Message HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/sessions/{session_id}/messages - Conversation history
//! - POST   /api/sessions/{session_id}/messages - Send a message, get the reply
//! - DELETE /api/messages/{id}                  - Delete one message

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use palaver_core::chat::validation::validate_send_message;
use palaver_types::chat::{ChatMessage, MessageExchange, SendMessageDraft};

use crate::http::error::AppError;
use crate::http::handlers::{parse_message_id, parse_session_id};
use crate::state::AppState;

/// GET /api/sessions/{session_id}/messages - Unknown sessions have no messages.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let Ok(session_id) = session_id.parse() else {
        return Ok(Json(Vec::new()));
    };
    let messages = state.chat_service.get_messages(&session_id).await?;
    Ok(Json(messages))
}

/// POST /api/sessions/{session_id}/messages
///
/// Body: `{ "content": "...", "model"?: "...", "attachmentIds"?: [...] }`.
/// The body is validated before the session is looked up.
pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<SendMessageDraft>, JsonRejection>,
) -> Result<Json<MessageExchange>, AppError> {
    let Json(draft) = payload?;
    let request = validate_send_message(draft)?;
    let session_id = parse_session_id(&session_id)?;

    let exchange = state
        .chat_service
        .send_message(&session_id, request)
        .await?;
    Ok(Json(exchange))
}

/// DELETE /api/messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let message_id = parse_message_id(&id)?;
    state.chat_service.delete_message(&message_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
