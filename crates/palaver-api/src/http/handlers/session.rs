//! Session CRUD HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/sessions      - List sessions, most recently active first
//! - POST   /api/sessions      - Create a session
//! - GET    /api/sessions/{id} - Get a single session
//! - PATCH  /api/sessions/{id} - Partially update a session
//! - DELETE /api/sessions/{id} - Delete a session and its messages

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use palaver_types::chat::{ChatSession, SessionDraft};

use crate::http::error::AppError;
use crate::http::handlers::parse_session_id;
use crate::state::AppState;

/// GET /api/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatSession>>, AppError> {
    let sessions = state.chat_service.list_sessions().await?;
    Ok(Json(sessions))
}

/// POST /api/sessions - An absent body creates a session with all defaults.
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Option<Json<SessionDraft>>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatSession>), AppError> {
    let draft = payload?.map(|Json(draft)| draft).unwrap_or_default();
    let session = state.chat_service.create_session(draft).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatSession>, AppError> {
    let session_id = parse_session_id(&id)?;
    let session = state.chat_service.get_session(&session_id).await?;
    Ok(Json(session))
}

/// PATCH /api/sessions/{id} - Only the fields present in the body change.
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SessionDraft>, JsonRejection>,
) -> Result<Json<ChatSession>, AppError> {
    let Json(draft) = payload?;
    let session_id = parse_session_id(&id)?;
    let session = state.chat_service.update_session(&session_id, draft).await?;
    Ok(Json(session))
}

/// DELETE /api/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let session_id = parse_session_id(&id)?;
    state.chat_service.delete_session(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
