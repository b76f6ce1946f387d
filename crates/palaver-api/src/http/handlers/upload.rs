//! File upload handler.
//!
//! POST /api/upload (multipart/form-data, file parts under the `files` field)
//!
//! Every part is read and checked against the configured limits before any
//! byte is written, so a rejected request leaves nothing behind. A failure
//! while storing or recording the batch removes the files it already wrote.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use palaver_infra::storage::detect_mime;
use palaver_types::chat::Attachment;
use palaver_types::error::ChatError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Multipart field name carrying the uploaded files.
pub const FILES_FIELD: &str = "files";

struct PendingUpload {
    filename: String,
    mimetype: String,
    data: Vec<u8>,
}

/// POST /api/upload
pub async fn upload_files(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Vec<Attachment>>, AppError> {
    let mut multipart = multipart?;
    let limits = state.upload_limits;
    let mut pending: Vec<PendingUpload> = Vec::new();

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        if pending.len() == limits.max_files {
            return Err(AppError::Validation(format!(
                "Too many files: at most {} per request",
                limits.max_files
            )));
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let mimetype = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| detect_mime(&filename));

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if data.len() + chunk.len() > limits.max_file_bytes {
                return Err(AppError::Validation(format!(
                    "File '{filename}' exceeds the {} byte limit",
                    limits.max_file_bytes
                )));
            }
            data.extend_from_slice(&chunk);
        }

        pending.push(PendingUpload {
            filename,
            mimetype,
            data,
        });
    }

    if pending.is_empty() {
        return Err(AppError::Validation("No files uploaded".to_string()));
    }

    let files: Vec<(&str, &str, &[u8])> = pending
        .iter()
        .map(|u| (u.filename.as_str(), u.mimetype.as_str(), u.data.as_slice()))
        .collect();
    let stored = state
        .uploads
        .save_all(files)
        .await
        .map_err(|e| AppError::Chat(ChatError::from(e)))?;

    let attachments = match state.chat_service.create_attachments(stored.clone()).await {
        Ok(attachments) => attachments,
        Err(e) => {
            state.uploads.discard(&stored).await;
            return Err(e.into());
        }
    };
    tracing::info!(count = attachments.len(), "Files uploaded");
    Ok(Json(attachments))
}
