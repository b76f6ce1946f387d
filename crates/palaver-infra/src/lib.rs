//! Infrastructure layer for Palaver.
//!
//! Implements the port traits defined in `palaver-core`:
//! - `memory`: in-process `ChatRepository` (one concurrent map per entity)
//! - `llm`: OpenAI and DeepSeek `LlmProvider` backends
//! - `secret`: provider credentials from the environment
//! - `storage`: on-disk storage for uploaded file bytes
//! - `config`: `palaver.toml` loading

pub mod config;
pub mod llm;
pub mod memory;
pub mod secret;
pub mod storage;
