//! Layer trait and abstractions.
//!
//! Layers provide a composable way to wrap providers with cross-cutting
//! concerns like logging.

use crate::error::AiError;
use crate::provider::Provider;
use crate::types::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Layer trait for wrapping providers.
///
/// Each layer wraps an inner provider and returns a new provider with
/// enhanced capabilities.
pub trait Layer<P: Provider> {
    /// The type of the layered provider
    type LayeredProvider: Provider;

    /// Wrap the inner provider with this layer
    fn layer(&self, inner: P) -> Self::LayeredProvider;
}

/// Helper trait for layered providers.
///
/// Provides default forwarding implementations for provider methods.
/// Implementers only need to override the methods they want to intercept.
#[async_trait]
pub trait LayeredProvider: Sized + Provider {
    /// The inner provider type
    type Inner: Provider;

    /// Get a reference to the inner provider
    fn inner(&self) -> &Self::Inner;

    /// Default implementation for info - forwards to inner
    fn layered_info(&self) -> Arc<ProviderInfo> {
        self.inner().info()
    }

    /// Default implementation for chat_completion - forwards to inner
    async fn layered_chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AiError> {
        self.inner().chat_completion(req).await
    }
}

/// Implement `Provider` for a generic layered provider `$type<P>` by
/// forwarding to its `LayeredProvider` methods.
#[macro_export]
macro_rules! impl_layered_provider {
    ($type:ident) => {
        #[async_trait::async_trait]
        impl<P: $crate::provider::Provider> $crate::provider::Provider for $type<P> {
            fn info(&self) -> std::sync::Arc<$crate::types::ProviderInfo> {
                $crate::layer::LayeredProvider::layered_info(self)
            }

            async fn chat_completion(
                &self,
                req: $crate::types::ChatCompletionRequest,
            ) -> Result<$crate::types::ChatCompletionResponse, $crate::error::AiError> {
                $crate::layer::LayeredProvider::layered_chat_completion(self, req).await
            }
        }
    };
}
