//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the content REST API on its own.
//!
//! ## Intended use
//! Useful for development and debugging against a local snapshot. The workspace's main
//! `content-api-run` binary additionally loads a `.env` file before starting the same server.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use content_core::{
    config::{content_data_file_from_env_value, max_menu_depth_from_env_value},
    ContentService, CoreConfig,
};

/// Main entry point for the content REST API server
///
/// # Environment Variables
/// - `CONTENT_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CONTENT_DATA_FILE`: JSON content snapshot (default: "content_data/content.json")
/// - `CONTENT_MAX_MENU_DEPTH`: Maximum menu nesting depth (default: 64)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration or content snapshot is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("content_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CONTENT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting content REST API on {}", addr);

    let cfg = Arc::new(CoreConfig::new(
        content_data_file_from_env_value(std::env::var("CONTENT_DATA_FILE").ok()),
        max_menu_depth_from_env_value(std::env::var("CONTENT_MAX_MENU_DEPTH").ok())?,
    )?);
    let service = ContentService::from_config(cfg)?;

    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
