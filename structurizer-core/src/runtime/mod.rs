//! Runtime layer.
//!
//! Sits between the high-level API (generate_text, generate_object) and the
//! low-level provider interface (chat_completion). Responsible for:
//! - Converting high-level requests to chat completion requests
//! - Selecting the JSON output strategy for the provider (JSON Schema vs JSON Mode)
//! - Holding the layered provider

pub mod executor;

pub use executor::{RuntimeExecutor, RuntimeExecutorBuilder};
