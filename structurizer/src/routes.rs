//! HTTP router composition.

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::client::ModelClient;
use crate::handlers::{extract, structure};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ModelClient>,
}

impl AppState {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        title: "AI Structurizer",
        description: "Generic API to convert unstructured text into structured JSON \
                      using OpenAI APIs.\n\n\
                      Endpoints:\n\
                      - `/structure/` → Generic JSON output (any text)\n\
                      - `/extract/` → Structured extraction into defined schema \
                      (Calendar or Research Paper)",
        version: "1.0.0",
        endpoints: BTreeMap::from([
            ("/structure/", "Generic JSON output (any text)"),
            (
                "/extract/",
                "Structured extraction into defined schema (Calendar or Research Paper)",
            ),
        ]),
    })
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/structure/", post(structure))
        .route("/structure", post(structure))
        .route("/extract/", post(extract))
        .route("/extract", post(extract))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
