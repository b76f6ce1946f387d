//! Environment variable credentials.
//!
//! Each upstream provider takes one bearer credential from the process
//! environment (`OPENAI_API_KEY`, `DEEPSEEK_API_KEY`). Values are wrapped in
//! [`SecretString`] as soon as they are read and never logged.

use secrecy::SecretString;

use palaver_types::llm::ProviderKind;

/// Bearer credentials for both providers. A missing key is not an error here;
/// calls routed to that provider fail instead.
#[derive(Default)]
pub struct ProviderCredentials {
    pub openai: Option<SecretString>,
    pub deepseek: Option<SecretString>,
}

impl ProviderCredentials {
    /// Read both keys from their environment variables.
    pub fn from_env() -> Self {
        Self {
            openai: read_env_secret(ProviderKind::OpenAi.api_key_env_var()),
            deepseek: read_env_secret(ProviderKind::DeepSeek.api_key_env_var()),
        }
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&SecretString> {
        match kind {
            ProviderKind::OpenAi => self.openai.as_ref(),
            ProviderKind::DeepSeek => self.deepseek.as_ref(),
        }
    }
}

/// Read `name` from the environment. Unset and empty values both yield `None`.
pub fn read_env_secret(name: &str) -> Option<SecretString> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}
