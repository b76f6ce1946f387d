//! Chat session, message, and attachment handling for Palaver.
//!
//! - `repository`: the `ChatRepository` port the infrastructure layer implements
//! - `validation`: explicit checks turning caller drafts into typed values
//! - `service`: `ChatService`, orchestrating storage and the provider router

pub mod repository;
pub mod service;
pub mod validation;
