//! Shared domain types for Palaver.
//!
//! This crate contains the core domain types used across the Palaver chat
//! server: sessions, messages, attachments, the model catalog, provider-agnostic
//! LLM shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod model;
