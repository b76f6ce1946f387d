//! Palaver application layer: shared state and the REST API.
//!
//! The `palaver` binary (see `main.rs`) drives these from the command line.

pub mod http;
pub mod state;
