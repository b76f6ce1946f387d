//! In-process storage backends.

pub mod chat;

pub use chat::InMemoryChatRepository;
