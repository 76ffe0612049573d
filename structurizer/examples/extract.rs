//! Run both extraction paths against a live provider without the HTTP server.
//!
//! ```text
//! OPENAI_API_KEY=sk-... cargo run -p structurizer --example extract -- "Alice and Bob meet Friday"
//! ```

use structurizer::handlers::{extract_text, structure_text};
use structurizer::{ExtractRequest, ModelConfig, RuntimeClient, StructureRequest};
use structurizer_core::RuntimeExecutor;
use structurizer_layer::LoggingLayer;
use structurizer_provider::OpenAiProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("OPENAI_API_KEY")?;
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Alice and Bob are going to a science fair on Friday.".to_string());

    let provider = OpenAiProvider::builder().api_key(api_key).build()?;
    let executor = RuntimeExecutor::builder(provider)
        .layer(LoggingLayer::new())
        .finish();
    let client = RuntimeClient::new(executor, ModelConfig::default());

    println!("=== /structure/ ===");
    let envelope = structure_text(
        &client,
        &StructureRequest {
            text: Some(text.clone()),
        },
    )
    .await;
    println!("{}\n", serde_json::to_string_pretty(&envelope)?);

    println!("=== /extract/ (calendar) ===");
    let envelope = extract_text(
        &client,
        &ExtractRequest {
            text: Some(text),
            schema: Some("calendar".to_string()),
        },
    )
    .await;
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}
