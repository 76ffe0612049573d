//! Errors raised while serving a request.
//!
//! None of these become HTTP errors: handlers render them into the
//! `{"error": ...}` envelope.

use structurizer_core::AiError;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The provider call failed
    #[error(transparent)]
    Model(#[from] AiError),

    /// The provider's reply does not fit the target type
    #[error("{schema} validation failed: {source}")]
    Validation {
        schema: String,
        #[source]
        source: serde_json::Error,
    },
}
