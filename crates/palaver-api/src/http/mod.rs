//! HTTP/REST API layer for Palaver.
//!
//! Axum-based REST API under `/api/` with JSON bodies in camelCase and
//! permissive CORS for the browser client.

pub mod error;
pub mod handlers;
pub mod router;
