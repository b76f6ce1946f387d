//! Uploaded file storage.
//!
//! Raw upload bytes live on the local filesystem; their metadata lives in
//! the chat repository as attachments.

use std::path::Path;

pub mod upload;

pub use upload::UploadStore;

/// Detect MIME type from file extension.
///
/// Fallback for multipart parts that carry no `Content-Type`.
pub fn detect_mime(filename: &str) -> String {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        // Text
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",

        // Documents
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",

        // Archives
        "zip" => "application/zip",

        _ => "application/octet-stream",
    }
    .to_string()
}
