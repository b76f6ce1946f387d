//! Local filesystem store for uploaded files.
//!
//! Each upload is written under the configured directory with a freshly
//! generated name. The client's filename is recorded as metadata only and
//! never touches the path.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use palaver_types::chat::NewAttachment;
use palaver_types::error::RepositoryError;

/// Writes upload bytes to `<dir>/<uuid>`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `data` and describe it as an attachment ready to be recorded.
    pub async fn save(
        &self,
        filename: &str,
        mimetype: &str,
        data: &[u8],
    ) -> Result<NewAttachment, RepositoryError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| RepositoryError::Storage(format!("Failed to create upload dir: {e}")))?;

        let path = self.dir.join(Uuid::now_v7().simple().to_string());
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| RepositoryError::Storage(format!("Failed to write upload: {e}")))?;

        tracing::debug!(filename, path = %path.display(), size = data.len(), "Upload stored");

        Ok(NewAttachment {
            filename: filename.to_string(),
            mimetype: mimetype.to_string(),
            size: data.len().to_string(),
            path: path.to_string_lossy().into_owned(),
        })
    }

    /// Persist a batch of `(filename, mimetype, data)` files.
    ///
    /// All or nothing: if any write fails, files already written by this
    /// call are removed before the error is returned.
    pub async fn save_all<'a, I>(&self, files: I) -> Result<Vec<NewAttachment>, RepositoryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a [u8])>,
    {
        let mut stored = Vec::new();
        for (filename, mimetype, data) in files {
            match self.save(filename, mimetype, data).await {
                Ok(attachment) => stored.push(attachment),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    /// Remove the files behind attachments that will never be recorded.
    pub async fn discard(&self, attachments: &[NewAttachment]) {
        for attachment in attachments {
            if let Err(e) = tokio::fs::remove_file(&attachment.path).await {
                tracing::warn!(path = %attachment.path, error = %e, "Failed to remove orphaned upload");
            }
        }
    }
}
