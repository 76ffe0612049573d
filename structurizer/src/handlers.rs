//! Request handlers for `/structure/` and `/extract/`.
//!
//! Every outcome, including failures, is answered with HTTP 200 and either
//! `{"structured_output": ...}` or `{"error": "..."}` in the body.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ModelClient;
use crate::error::ExtractError;
use crate::routes::AppState;
use crate::schema::SchemaKind;

pub const NO_INPUT_TEXT: &str = "No input text provided.";
pub const INVALID_SCHEMA_TYPE: &str = "Invalid schema type. Use 'calendar' or 'research'.";

pub const STRUCTURE_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that converts any given text into a structured JSON object. \
     Always return valid JSON. \
     Infer meaningful keys and values from the input. \
     If data seems incomplete, include null fields.";

/// Body of `POST /structure/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructureRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Body of `POST /extract/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
}

/// Response body shared by both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Output { structured_output: serde_json::Value },
    Error { error: String },
}

impl Envelope {
    pub fn output(structured_output: serde_json::Value) -> Self {
        Self::Output { structured_output }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

fn trimmed(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Turn a free-form completion into JSON, keeping non-JSON replies as raw text.
pub fn parse_completion(completion: &str) -> serde_json::Value {
    let message = completion.trim();
    serde_json::from_str(message).unwrap_or_else(|_| json!({ "raw_text_output": message }))
}

/// Ask the model to infer a JSON structure for arbitrary text.
pub async fn structure_text(client: &dyn ModelClient, req: &StructureRequest) -> Envelope {
    let Some(text) = trimmed(req.text.as_deref()) else {
        return Envelope::error(NO_INPUT_TEXT);
    };

    tracing::info!(bytes = text.len(), "structuring text");

    match client.complete(STRUCTURE_SYSTEM_PROMPT, text, 0.0).await {
        Ok(completion) => Envelope::output(parse_completion(&completion)),
        Err(e) => {
            tracing::warn!(error = %e, "structure request failed");
            Envelope::error(e.to_string())
        }
    }
}

/// Fill one of the fixed extraction schemas from text.
pub async fn extract_text(client: &dyn ModelClient, req: &ExtractRequest) -> Envelope {
    let Some(text) = trimmed(req.text.as_deref()) else {
        return Envelope::error(NO_INPUT_TEXT);
    };
    let Some(kind) = SchemaKind::from_selector(req.schema.as_deref()) else {
        return Envelope::error(INVALID_SCHEMA_TYPE);
    };

    tracing::info!(schema = kind.as_str(), bytes = text.len(), "extracting");

    match run_extraction(client, kind, text).await {
        Ok(value) => Envelope::output(value),
        Err(e) => {
            tracing::warn!(schema = kind.as_str(), error = %e, "extract request failed");
            Envelope::error(e.to_string())
        }
    }
}

async fn run_extraction(
    client: &dyn ModelClient,
    kind: SchemaKind,
    text: &str,
) -> Result<serde_json::Value, ExtractError> {
    let target = kind.target();
    let value = client.parse(kind.system_prompt(), text, &target).await?;
    target.validate(value)
}

pub async fn structure(
    State(state): State<AppState>,
    Json(req): Json<StructureRequest>,
) -> Json<Envelope> {
    Json(structure_text(state.client.as_ref(), &req).await)
}

pub async fn extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Json<Envelope> {
    Json(extract_text(state.client.as_ref(), &req).await)
}
