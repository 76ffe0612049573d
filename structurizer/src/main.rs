use std::sync::Arc;

use clap::Parser;
use structurizer::{create_router, AppState, Config, RuntimeClient};
use structurizer_core::RuntimeExecutor;
use structurizer_layer::LoggingLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("structurizer=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();

    let provider = config.build_provider()?;
    let executor = RuntimeExecutor::builder(provider)
        .layer(LoggingLayer::new())
        .finish();
    info!(
        provider = %executor.info().id,
        strategy = executor.json_strategy_name(),
        structure_model = %config.structure_model,
        extract_model = %config.extract_model,
        "model provider ready"
    );

    let client = RuntimeClient::new(executor, config.models());
    let app = create_router(AppState::new(Arc::new(client)));

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
