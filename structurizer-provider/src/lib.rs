//! # Structurizer Providers
//!
//! Model provider implementations.

pub mod openai;

// Re-exports
pub use openai::{OpenAiBuilder, OpenAiProvider};

use structurizer_core::error::AiError;

/// Create a DeepSeek provider (OpenAI-compatible)
///
/// DeepSeek speaks the OpenAI protocol on a different endpoint and only
/// supports JSON object mode, so it is registered under its own provider id.
///
/// # Example
///
/// ```ignore
/// use structurizer_provider::deepseek;
///
/// let provider = deepseek("your-api-key")?;
/// ```
pub fn deepseek(api_key: impl Into<String>) -> Result<OpenAiProvider, AiError> {
    OpenAiProvider::builder()
        .api_key(api_key)
        .api_base("https://api.deepseek.com/v1")
        .build_with_id("deepseek", "DeepSeek")
}
