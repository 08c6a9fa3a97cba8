//! AWS Lambda entry point for the movie cast API.
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//!
//! ## Environment Variables
//!
//! - `CAST_TABLE_NAME`: cast table (default: `MovieCast`)
//! - `TABLE_NAME`: movie table (default: `Movies`)
//! - `REGION`: store region (default: SDK region chain)
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cast_api::handler::{ApiGatewayResponse, handle_event};
use cast_api::models::Config;
use cast_api::storage::DynamoStore;

/// Store client shared by every invocation of this process.
static STORE: OnceCell<DynamoStore> = OnceCell::const_new();

async fn store() -> &'static DynamoStore {
    STORE
        .get_or_init(|| async { DynamoStore::from_config(&Config::from_env()).await })
        .await
}

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Movie cast Lambda starting...");
    lambda_runtime::run(service_fn(handler)).await
}

/// Handler for API Gateway HTTP events.
async fn handler(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, LambdaError> {
    let (payload, _context) = event.into_parts();
    Ok(handle_event(store().await, payload).await)
}
