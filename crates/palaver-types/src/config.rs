//! Server configuration types for Palaver.
//!
//! `ServerConfig` represents the optional `palaver.toml` that controls the
//! listen address, upload limits, and upstream endpoints.

use serde::{Deserialize, Serialize};

/// Default OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default DeepSeek API base URL.
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";

/// Top-level configuration for the Palaver server.
///
/// All fields have sensible defaults; an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory uploaded files are written to.
    pub upload_dir: String,
    /// Per-file size cap for uploads, in bytes.
    pub max_upload_file_bytes: usize,
    /// Maximum number of files accepted by one upload request.
    pub max_upload_files: usize,
    pub openai_base_url: String,
    pub deepseek_base_url: String,
    /// Upper bound on a single upstream call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            upload_dir: "uploads".to_string(),
            max_upload_file_bytes: 10 * 1024 * 1024,
            max_upload_files: 5,
            openai_base_url: OPENAI_BASE_URL.to_string(),
            deepseek_base_url: DEEPSEEK_BASE_URL.to_string(),
            request_timeout_secs: 300,
        }
    }
}
