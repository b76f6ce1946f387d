//! DeepSeek provider implementation.
//!
//! DeepSeek speaks an OpenAI-style chat completions protocol but is reached
//! with a plain [`reqwest`] client so the request body (fixed temperature,
//! `max_tokens`) and error decoding stay under our control.

pub mod client;
pub mod types;

pub use client::DeepSeekProvider;
