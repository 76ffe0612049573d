//! RuntimeExecutor implementation.
//!
//! The RuntimeExecutor provides high-level generate_text() and
//! generate_object() APIs by orchestrating provider chat completion calls
//! with strategy selection.

use crate::error::AiError;
use crate::layer::Layer;
use crate::provider::Provider;
use crate::strategy::{detect_json_strategy, JsonOutputStrategy};
use crate::types::*;
use std::sync::Arc;

/// Type-erased provider that can be shared across threads
type BoxedProvider = Arc<dyn Provider>;

/// Builder for composing a provider with layers.
///
/// Each call to `layer()` wraps the previous provider in a new concrete type;
/// type erasure happens once, in `finish()`.
///
/// # Example
///
/// ```ignore
/// let executor = RuntimeExecutor::builder(openai_provider)
///     .layer(LoggingLayer::new())
///     .finish();
/// ```
pub struct RuntimeExecutorBuilder<P> {
    provider: P,
    json_strategy: Option<Box<dyn JsonOutputStrategy>>,
}

impl<P: Provider> RuntimeExecutorBuilder<P> {
    /// Create a new builder with a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            json_strategy: None,
        }
    }

    /// Add a layer to wrap the provider
    pub fn layer<L>(self, layer: L) -> RuntimeExecutorBuilder<L::LayeredProvider>
    where
        L: Layer<P>,
    {
        RuntimeExecutorBuilder {
            provider: layer.layer(self.provider),
            json_strategy: self.json_strategy,
        }
    }

    /// Set a custom JSON output strategy
    ///
    /// If not set, the strategy will be auto-detected based on the provider ID.
    pub fn json_strategy(mut self, strategy: Box<dyn JsonOutputStrategy>) -> Self {
        self.json_strategy = Some(strategy);
        self
    }

    /// Finish building and create a RuntimeExecutor
    pub fn finish(self) -> RuntimeExecutor {
        let provider = Arc::new(self.provider);
        let provider_id = provider.info().id.clone();

        let json_strategy = self
            .json_strategy
            .unwrap_or_else(|| detect_json_strategy(&provider_id));

        tracing::debug!(
            provider = %provider_id,
            strategy = json_strategy.name(),
            "runtime executor ready"
        );

        RuntimeExecutor {
            provider,
            json_strategy,
        }
    }
}

/// Runtime executor.
///
/// Main entry point for making model requests. Provides generate_text and
/// generate_object on top of the provider's chat_completion API.
pub struct RuntimeExecutor {
    provider: BoxedProvider,
    json_strategy: Box<dyn JsonOutputStrategy>,
}

impl std::fmt::Debug for RuntimeExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeExecutor")
            .field("provider", &self.provider)
            .field("json_strategy", &self.json_strategy.name())
            .finish()
    }
}

impl RuntimeExecutor {
    /// Create a new builder
    pub fn builder<P: Provider>(provider: P) -> RuntimeExecutorBuilder<P> {
        RuntimeExecutorBuilder::new(provider)
    }

    /// Get provider information
    pub fn info(&self) -> Arc<ProviderInfo> {
        self.provider.info()
    }

    /// Name of the active JSON output strategy
    pub fn json_strategy_name(&self) -> &str {
        self.json_strategy.name()
    }

    /// Generate free-form text using chat completion
    pub async fn generate_text(
        &self,
        model: impl Into<String>,
        params: TextParams,
    ) -> Result<TextResult, AiError> {
        let model = model.into();
        let ctx = RequestContext::new(self.provider.info().id.clone(), model.clone());
        tracing::debug!(
            request_id = %ctx.request_id,
            provider = %ctx.provider_id,
            model = %ctx.model,
            "generate_text"
        );

        let chat_req = ChatCompletionRequest {
            model,
            messages: params.messages,
            temperature: params.temperature,
            response_format: Some(ResponseFormat::Text),
        };

        let response = self.provider.chat_completion(chat_req).await?;
        let first_choice = first_choice(&response)?;

        Ok(TextResult {
            content: first_choice.message.text(),
            finish_reason: first_choice.finish_reason.clone(),
            usage: response.usage.clone(),
            model: response.model.clone(),
        })
    }

    /// Generate a JSON object constrained by `params.schema`
    ///
    /// The JSON output strategy decides whether the schema is enforced by the
    /// provider (strict JSON Schema) or only described in the prompt.
    pub async fn generate_object(
        &self,
        model: impl Into<String>,
        params: ObjectParams,
    ) -> Result<ObjectResult, AiError> {
        let model = model.into();
        let ctx = RequestContext::new(self.provider.info().id.clone(), model.clone());
        tracing::debug!(
            request_id = %ctx.request_id,
            provider = %ctx.provider_id,
            model = %ctx.model,
            schema = %params.schema_name,
            "generate_object"
        );

        let mut chat_req = ChatCompletionRequest {
            model,
            messages: params.messages,
            temperature: None,
            response_format: None, // Will be set by strategy
        };

        self.json_strategy
            .apply(&mut chat_req, &params.schema_name, &params.schema)?;

        let response = self.provider.chat_completion(chat_req).await?;
        let first_choice = first_choice(&response)?;

        let object: serde_json::Value = serde_json::from_str(&first_choice.message.text())?;

        Ok(ObjectResult {
            object,
            usage: response.usage.clone(),
            model: response.model.clone(),
        })
    }
}

/// First choice of a response, surfacing refusals as errors
fn first_choice(response: &ChatCompletionResponse) -> Result<&Choice, AiError> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| AiError::provider("No choices in response"))?;

    if let Some(reason) = choice.message.refusal() {
        return Err(AiError::refusal(reason));
    }

    Ok(choice)
}
