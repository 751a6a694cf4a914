//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `folio-run` binary serves the
//! same router.

use folio_core::CoreConfig;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the Folio REST API server
///
/// # Environment Variables
/// - `FOLIO_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `BLOG_DATA_DIR`: Document directory (default: "data/blog")
/// - `WEBHOOK_SECRET`: Shared secret for webhook signatures (required)
/// - `ADMIN_JWT_SECRET` or `ADMIN_API_KEY`: Admin credential (one required)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is incomplete,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("folio_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("FOLIO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var("BLOG_DATA_DIR").ok(),
        std::env::var("WEBHOOK_SECRET").ok(),
        std::env::var("ADMIN_JWT_SECRET").ok(),
        std::env::var("ADMIN_API_KEY").ok(),
    )?);

    tracing::info!(
        data_dir = %cfg.blog_data_dir().display(),
        "-- Starting Folio REST API on {}",
        addr
    );

    let app = api_rest::router(api_rest::AppState::new(cfg)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
