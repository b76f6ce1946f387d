//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API and
//! the CLI. The chat service is generic over its repository; AppState pins
//! it to the in-memory implementation.

use std::sync::Arc;

use palaver_core::chat::service::ChatService;
use palaver_core::llm::router::ProviderRouter;
use palaver_infra::llm::build_provider_router;
use palaver_infra::memory::InMemoryChatRepository;
use palaver_infra::secret::ProviderCredentials;
use palaver_infra::storage::UploadStore;
use palaver_types::config::ServerConfig;

/// Concrete type alias for the service generic pinned to the infra implementation.
pub type ConcreteChatService = ChatService<InMemoryChatRepository>;

/// Per-request caps on the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_file_bytes: usize,
    pub max_files: usize,
}

impl From<&ServerConfig> for UploadLimits {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_file_bytes: config.max_upload_file_bytes,
            max_files: config.max_upload_files,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub uploads: Arc<UploadStore>,
    pub upload_limits: UploadLimits,
}

impl AppState {
    /// Wire state from already-built parts. Tests inject scripted providers here.
    pub fn new(providers: ProviderRouter, uploads: UploadStore, upload_limits: UploadLimits) -> Self {
        Self {
            chat_service: Arc::new(ChatService::new(
                InMemoryChatRepository::default(),
                providers,
            )),
            uploads: Arc::new(uploads),
            upload_limits,
        }
    }

    /// Initialize the application state from config and the process environment.
    pub fn init(config: &ServerConfig) -> anyhow::Result<Self> {
        let providers = build_provider_router(config, ProviderCredentials::from_env())?;

        Ok(Self::new(
            providers,
            UploadStore::new(&config.upload_dir),
            UploadLimits::from(config),
        ))
    }
}
