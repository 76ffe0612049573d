//! Error types for model operations.

/// The main error type for model operations.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Provider-specific errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Rate limit errors
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Invalid request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found errors
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// The model declined to produce the requested output
    #[error("Model refused the request: {0}")]
    Refusal(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic errors
    #[error("Error: {0}")]
    Other(String),
}

impl AiError {
    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limit(msg: impl Into<String>) -> Self {
        Self::RateLimit(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a model not found error
    pub fn model_not_found(msg: impl Into<String>) -> Self {
        Self::ModelNotFound(msg.into())
    }

    /// Create a refusal error
    pub fn refusal(msg: impl Into<String>) -> Self {
        Self::Refusal(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<String> for AiError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for AiError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
