//! Logging layer for provider operations.

use async_trait::async_trait;
use structurizer_core::error::AiError;
use structurizer_core::impl_layered_provider;
use structurizer_core::layer::{Layer, LayeredProvider};
use structurizer_core::provider::Provider;
use structurizer_core::types::*;

/// Logging layer that logs provider operations.
#[derive(Debug, Clone)]
pub struct LoggingLayer {
    prefix: String,
}

impl LoggingLayer {
    /// Create a new logging layer
    pub fn new() -> Self {
        Self {
            prefix: "[structurizer]".to_string(),
        }
    }

    /// Create a logging layer with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Provider> Layer<P> for LoggingLayer {
    type LayeredProvider = LoggingProvider<P>;

    fn layer(&self, inner: P) -> Self::LayeredProvider {
        LoggingProvider {
            inner,
            prefix: self.prefix.clone(),
        }
    }
}

/// Provider wrapped with logging
#[derive(Debug)]
pub struct LoggingProvider<P> {
    inner: P,
    prefix: String,
}

#[async_trait]
impl<P: Provider> LayeredProvider for LoggingProvider<P> {
    type Inner = P;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn layered_chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AiError> {
        let provider = self.inner.info().id.clone();
        tracing::debug!(
            provider = %provider,
            model = %req.model,
            messages = req.messages.len(),
            "{} chat_completion request",
            self.prefix
        );

        let start = std::time::Instant::now();
        let result = self.inner.chat_completion(req).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    provider = %provider,
                    id = %response.id,
                    tokens = response.usage.total_tokens,
                    ?elapsed,
                    "{} chat_completion success",
                    self.prefix
                );
            }
            Err(e) => {
                tracing::error!(
                    provider = %provider,
                    error = %e,
                    ?elapsed,
                    "{} chat_completion error",
                    self.prefix
                );
            }
        }

        result
    }
}

impl_layered_provider!(LoggingProvider);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug)]
    struct EchoProvider {
        fail: bool,
    }

    #[async_trait]
    impl Provider for EchoProvider {
        fn info(&self) -> Arc<ProviderInfo> {
            Arc::new(ProviderInfo {
                id: "echo".to_string(),
                name: "Echo".to_string(),
            })
        }

        async fn chat_completion(
            &self,
            req: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, AiError> {
            if self.fail {
                return Err(AiError::provider("boom"));
            }
            let text = req.messages.last().map(Message::text).unwrap_or_default();
            Ok(ChatCompletionResponse {
                id: "echo-1".to_string(),
                model: req.model,
                choices: vec![Choice {
                    index: 0,
                    message: Message::assistant(text),
                    finish_reason: FinishReason::Stop,
                }],
                usage: Usage::default(),
                created: None,
            })
        }
    }

    #[tokio::test]
    async fn test_logging_layer_forwards_response() {
        let provider = LoggingLayer::new().layer(EchoProvider { fail: false });
        assert_eq!(provider.info().id, "echo");

        let req = ChatCompletionRequest::new("m", vec![Message::user("ping")]);
        let response = provider.chat_completion(req).await.unwrap();
        assert_eq!(response.id, "echo-1");
        assert_eq!(response.choices[0].message.text(), "ping");
    }

    #[tokio::test]
    async fn test_logging_layer_forwards_error() {
        let provider = LoggingLayer::with_prefix("[test]").layer(EchoProvider { fail: true });

        let req = ChatCompletionRequest::new("m", vec![Message::user("ping")]);
        let err = provider.chat_completion(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Provider error: boom");
    }
}
