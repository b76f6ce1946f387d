//! Business logic and repository trait definitions for Palaver.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements. It depends only on `palaver-types` --
//! never on `palaver-infra` or any HTTP/IO crate.

pub mod chat;
pub mod llm;
