//! LLM provider abstractions for Palaver.
//!
//! This module defines the core traits and utilities for provider integration:
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `ProviderRouter`: resolves a model id to one provider and calls it

pub mod box_provider;
pub mod provider;
pub mod router;
