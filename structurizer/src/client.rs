//! The model provider seam used by the request handlers.

use async_trait::async_trait;
use structurizer_core::{AiError, Message, ObjectParams, RuntimeExecutor, TextParams};

use crate::config::ModelConfig;
use crate::schema::TargetSchema;

/// Capabilities the handlers need from a model provider.
///
/// Implementations are shared across concurrent requests.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Free-form chat completion: one system instruction, one user message.
    async fn complete(&self, system: &str, user: &str, temperature: f32)
        -> Result<String, AiError>;

    /// Schema-constrained completion returning a JSON value shaped like `target`.
    async fn parse(
        &self,
        system: &str,
        user: &str,
        target: &TargetSchema,
    ) -> Result<serde_json::Value, AiError>;
}

/// `ModelClient` backed by a [`RuntimeExecutor`].
#[derive(Debug)]
pub struct RuntimeClient {
    executor: RuntimeExecutor,
    models: ModelConfig,
}

impl RuntimeClient {
    pub fn new(executor: RuntimeExecutor, models: ModelConfig) -> Self {
        Self { executor, models }
    }
}

#[async_trait]
impl ModelClient for RuntimeClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, AiError> {
        let params = TextParams::new(vec![Message::system(system), Message::user(user)])
            .with_temperature(temperature);

        let result = self
            .executor
            .generate_text(&self.models.structure, params)
            .await?;
        Ok(result.content)
    }

    async fn parse(
        &self,
        system: &str,
        user: &str,
        target: &TargetSchema,
    ) -> Result<serde_json::Value, AiError> {
        let params = ObjectParams::new(
            vec![Message::system(system), Message::user(user)],
            target.name(),
            target.json_schema().clone(),
        );

        let result = self
            .executor
            .generate_object(&self.models.extract, params)
            .await?;
        Ok(result.object)
    }
}
