//! OpenAI provider implementation using async-openai crate.
//!
//! Only chat_completion() is exposed here. Higher-level abstractions like
//! generate_text() and generate_object() are handled by the Runtime layer.

use async_openai::config::OpenAIConfig;
use async_openai::error::{ApiError, OpenAIError};
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    ResponseFormat as OpenAIResponseFormat,
    ResponseFormatJsonSchema as OpenAIResponseFormatJsonSchema,
};
use async_openai::Client;
use async_trait::async_trait;
use std::sync::Arc;
use structurizer_core::error::AiError;
use structurizer_core::provider::Provider;
use structurizer_core::types::*;

/// OpenAI provider using async-openai
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    info: Arc<ProviderInfo>,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("info", &self.info)
            .finish()
    }
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with default configuration
    pub fn new(api_key: impl Into<String>) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self::with_config(config, "openai", "OpenAI")
    }

    /// Create a builder for more configuration options
    pub fn builder() -> OpenAiBuilder {
        OpenAiBuilder::default()
    }

    fn with_config(
        config: OpenAIConfig,
        provider_id: impl Into<String>,
        provider_name: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::with_config(config),
            info: Arc::new(ProviderInfo {
                id: provider_id.into(),
                name: provider_name.into(),
            }),
        }
    }

    /// Convert our Message type to OpenAI's ChatCompletionRequestMessage
    fn convert_message(msg: &Message) -> Result<ChatCompletionRequestMessage, AiError> {
        let content = msg.text();

        match msg.role {
            Role::System => {
                let msg = ChatCompletionRequestSystemMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(|e| {
                        AiError::provider(format!("Failed to build system message: {}", e))
                    })?;
                Ok(ChatCompletionRequestMessage::System(msg))
            }
            Role::User => {
                let msg = ChatCompletionRequestUserMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(|e| {
                        AiError::provider(format!("Failed to build user message: {}", e))
                    })?;
                Ok(ChatCompletionRequestMessage::User(msg))
            }
            Role::Assistant => {
                let msg = ChatCompletionRequestAssistantMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(|e| {
                        AiError::provider(format!("Failed to build assistant message: {}", e))
                    })?;
                Ok(ChatCompletionRequestMessage::Assistant(msg))
            }
        }
    }

    /// Convert our ResponseFormat to OpenAI's ResponseFormat
    fn convert_response_format(format: &ResponseFormat) -> OpenAIResponseFormat {
        match format {
            ResponseFormat::Text => OpenAIResponseFormat::Text,
            ResponseFormat::JsonObject => OpenAIResponseFormat::JsonObject,
            ResponseFormat::JsonSchema {
                name,
                schema,
                strict,
            } => OpenAIResponseFormat::JsonSchema {
                json_schema: OpenAIResponseFormatJsonSchema {
                    name: name.clone(),
                    schema: Some(schema.clone()),
                    strict: Some(*strict),
                    description: None,
                },
            },
        }
    }

    /// Build CreateChatCompletionRequest from our ChatCompletionRequest
    fn build_request(
        &self,
        req: &ChatCompletionRequest,
    ) -> Result<CreateChatCompletionRequest, AiError> {
        let messages: Result<Vec<_>, _> = req.messages.iter().map(Self::convert_message).collect();

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&req.model).messages(messages?);

        if let Some(temperature) = req.temperature {
            builder.temperature(temperature);
        }
        if let Some(response_format) = &req.response_format {
            builder.response_format(Self::convert_response_format(response_format));
        }

        builder
            .build()
            .map_err(|e| AiError::provider(format!("Failed to build request: {}", e)))
    }

    /// Convert OpenAI response to our ChatCompletionResponse
    fn convert_response(response: CreateChatCompletionResponse) -> ChatCompletionResponse {
        let choices = response
            .choices
            .into_iter()
            .map(|choice| {
                let content = match (choice.message.content, choice.message.refusal) {
                    (_, Some(reason)) => vec![ContentPart::Refusal { reason }],
                    (text, None) => vec![ContentPart::Text {
                        text: text.unwrap_or_default(),
                    }],
                };

                let finish_reason = choice
                    .finish_reason
                    .map_or(FinishReason::Stop, |r| match r {
                        async_openai::types::FinishReason::Stop => FinishReason::Stop,
                        async_openai::types::FinishReason::Length => FinishReason::Length,
                        async_openai::types::FinishReason::ContentFilter => {
                            FinishReason::ContentFilter
                        }
                        _ => FinishReason::Other("unknown".to_string()),
                    });

                Choice {
                    index: choice.index,
                    message: Message {
                        role: Role::Assistant,
                        content,
                    },
                    finish_reason,
                }
            })
            .collect();

        let usage = response.usage.map_or_else(Usage::default, |u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
            created: Some(response.created as u64),
        }
    }
}

/// Map an async-openai error onto our error taxonomy
fn convert_error(err: OpenAIError) -> AiError {
    match err {
        OpenAIError::ApiError(api) => convert_api_error(api),
        OpenAIError::Reqwest(e) => AiError::Network(e),
        OpenAIError::InvalidArgument(msg) => AiError::invalid_request(msg),
        other => AiError::provider(format!("OpenAI API error: {}", other)),
    }
}

fn convert_api_error(api: ApiError) -> AiError {
    let code = api.code.as_deref().unwrap_or_default();
    let kind = api.r#type.as_deref().unwrap_or_default();

    match (code, kind) {
        ("invalid_api_key", _) | (_, "authentication_error") => {
            AiError::authentication(api.message)
        }
        ("rate_limit_exceeded", _) | ("insufficient_quota", _) | (_, "insufficient_quota") => {
            AiError::rate_limit(api.message)
        }
        ("model_not_found", _) => AiError::model_not_found(api.message),
        (_, "invalid_request_error") => AiError::invalid_request(api.message),
        _ => AiError::provider(format!("OpenAI API error: {}", api.message)),
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AiError> {
        let openai_req = self.build_request(&req)?;

        let response = self
            .client
            .chat()
            .create(openai_req)
            .await
            .map_err(convert_error)?;

        Ok(Self::convert_response(response))
    }
}

/// Builder for OpenAI provider with custom configuration
#[derive(Default)]
pub struct OpenAiBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    org_id: Option<String>,
}

impl OpenAiBuilder {
    /// Set API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set API base URL (for OpenAI-compatible APIs like DeepSeek)
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set organization ID
    pub fn organization(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<OpenAiProvider, AiError> {
        self.build_with_id("openai", "OpenAI")
    }

    /// Build a provider with a custom provider ID and name
    ///
    /// Useful for OpenAI-compatible APIs like DeepSeek that use the same
    /// protocol but different endpoints. The ID selects the JSON output strategy.
    pub fn build_with_id(
        self,
        provider_id: impl Into<String>,
        provider_name: impl Into<String>,
    ) -> Result<OpenAiProvider, AiError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AiError::configuration("API key is required"))?;

        let mut config = OpenAIConfig::new().with_api_key(api_key);

        if let Some(api_base) = self.api_base {
            config = config.with_api_base(api_base);
        }

        if let Some(org_id) = self.org_id {
            config = config.with_org_id(org_id);
        }

        Ok(OpenAiProvider::with_config(
            config,
            provider_id,
            provider_name,
        ))
    }
}
