//! # Structurizer Core
//!
//! Provider-neutral abstractions and runtime for turning text into
//! structured JSON with a large language model.

pub mod error;
pub mod layer;
pub mod provider;
pub mod runtime;
pub mod strategy;
pub mod types;

// Re-exports
pub use error::AiError;
pub use layer::{Layer, LayeredProvider};
pub use provider::Provider;
pub use runtime::{RuntimeExecutor, RuntimeExecutorBuilder};
pub use strategy::{JsonModeStrategy, JsonOutputStrategy, JsonSchemaStrategy};
pub use types::*;
