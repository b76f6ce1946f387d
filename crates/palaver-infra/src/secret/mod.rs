//! Provider credential loading.
//!
//! - `env`: read-only environment variable lookup for upstream API keys

pub mod env;

pub use env::ProviderCredentials;
