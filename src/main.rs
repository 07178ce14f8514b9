use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use content_core::{
    ContentService, CoreConfig,
    config::{content_data_file_from_env_value, max_menu_depth_from_env_value},
};

/// Main entry point for the content API
///
/// Loads `.env` if present, resolves configuration once, loads the content snapshot and serves
/// the REST endpoints.
///
/// # Environment Variables
/// - `CONTENT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CONTENT_DATA_FILE`: JSON content snapshot (default: "content_data/content.json")
/// - `CONTENT_MAX_MENU_DEPTH`: Maximum menu nesting depth (default: 64)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, snapshot loading, or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("content_api_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("content_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CONTENT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_file = content_data_file_from_env_value(std::env::var("CONTENT_DATA_FILE").ok());
    let max_menu_depth =
        max_menu_depth_from_env_value(std::env::var("CONTENT_MAX_MENU_DEPTH").ok())?;

    if !data_file.is_file() {
        anyhow::bail!("Content data file does not exist: {}", data_file.display());
    }

    tracing::info!("++ Starting content API on {}", rest_addr);

    let cfg = Arc::new(CoreConfig::new(data_file, max_menu_depth)?);
    let service = ContentService::from_config(cfg)?;
    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
