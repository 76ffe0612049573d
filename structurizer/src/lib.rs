//! # Structurizer
//!
//! HTTP service that converts unstructured text into structured JSON with a
//! large language model.
//!
//! Endpoints:
//! - `POST /structure/`: the model infers an arbitrary JSON shape for the text
//! - `POST /extract/`: the model fills a fixed schema (`calendar` or `research`)
//!   through the provider's schema-constrained output mode
//!
//! ```ignore
//! use std::sync::Arc;
//! use structurizer::{create_router, AppState, RuntimeClient, ModelConfig};
//! use structurizer_core::RuntimeExecutor;
//! use structurizer_layer::LoggingLayer;
//! use structurizer_provider::OpenAiProvider;
//!
//! let provider = OpenAiProvider::builder().api_key("sk-...").build()?;
//! let executor = RuntimeExecutor::builder(provider)
//!     .layer(LoggingLayer::new())
//!     .finish();
//! let client = RuntimeClient::new(executor, ModelConfig::default());
//! let app = create_router(AppState::new(Arc::new(client)));
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod schema;

pub use client::{ModelClient, RuntimeClient};
pub use config::{Config, ModelConfig, ProviderKind};
pub use error::ExtractError;
pub use handlers::{Envelope, ExtractRequest, StructureRequest};
pub use routes::{create_router, AppState};
pub use schema::{CalendarEvent, ResearchPaperExtraction, SchemaKind, TargetSchema};
