//! Process configuration.
//!
//! Every flag can also be supplied through the environment; `main` loads a
//! `.env` file first when one is present.

use clap::{Parser, ValueEnum};
use structurizer_core::AiError;
use structurizer_provider::{deepseek, OpenAiProvider};

pub const DEFAULT_STRUCTURE_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_EXTRACT_MODEL: &str = "gpt-4o-2024-08-06";

#[derive(Debug, Clone, Parser)]
#[command(name = "structurizer")]
#[command(about = "Convert unstructured text into structured JSON", long_about = None)]
#[command(version)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "STRUCTURIZER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "STRUCTURIZER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Which model API to talk to
    #[arg(long, env = "STRUCTURIZER_PROVIDER", value_enum, default_value_t = ProviderKind::OpenAi)]
    pub provider: ProviderKind,

    /// API key for the model provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Override the provider's base URL
    #[arg(long, env = "OPENAI_API_BASE")]
    pub openai_api_base: Option<String>,

    /// OpenAI organization ID
    #[arg(long, env = "OPENAI_ORG_ID")]
    pub openai_org_id: Option<String>,

    /// Model used by `/structure/`
    #[arg(long, env = "STRUCTURIZER_STRUCTURE_MODEL", default_value = DEFAULT_STRUCTURE_MODEL)]
    pub structure_model: String,

    /// Model used by `/extract/`
    #[arg(long, env = "STRUCTURIZER_EXTRACT_MODEL", default_value = DEFAULT_EXTRACT_MODEL)]
    pub extract_model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    #[value(name = "openai")]
    OpenAi,
    #[value(name = "deepseek")]
    DeepSeek,
}

/// Model names per endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub structure: String,
    pub extract: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            structure: DEFAULT_STRUCTURE_MODEL.to_string(),
            extract: DEFAULT_EXTRACT_MODEL.to_string(),
        }
    }
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn models(&self) -> ModelConfig {
        ModelConfig {
            structure: self.structure_model.clone(),
            extract: self.extract_model.clone(),
        }
    }

    /// Build the provider client described by this configuration.
    pub fn build_provider(&self) -> Result<OpenAiProvider, AiError> {
        match (self.provider, &self.openai_api_base) {
            (ProviderKind::DeepSeek, None) => deepseek(self.openai_api_key.clone()),
            (kind, api_base) => {
                let mut builder = OpenAiProvider::builder().api_key(self.openai_api_key.clone());
                if let Some(api_base) = api_base {
                    builder = builder.api_base(api_base.clone());
                }
                if let Some(org_id) = &self.openai_org_id {
                    builder = builder.organization(org_id.clone());
                }
                match kind {
                    ProviderKind::OpenAi => builder.build(),
                    ProviderKind::DeepSeek => builder.build_with_id("deepseek", "DeepSeek"),
                }
            }
        }
    }
}
