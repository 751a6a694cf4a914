//! Main entry point for the Folio application.
//!
//! Resolves configuration once, builds the core services, and serves the REST surface (public
//! reads, admin API, signed webhooks, Swagger UI) until interrupted.

use folio_core::CoreConfig;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the Folio application
///
/// # Environment Variables
/// - `FOLIO_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `BLOG_DATA_DIR`: Directory for document storage (default: "data/blog")
/// - `WEBHOOK_SECRET`: Shared secret for webhook signatures
/// - `ADMIN_JWT_SECRET`: HS256 secret for admin bearer tokens, or
/// - `ADMIN_API_KEY`: Static admin key, used when no JWT secret is set
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, startup, or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter()?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("FOLIO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var("BLOG_DATA_DIR").ok(),
        std::env::var("WEBHOOK_SECRET").ok(),
        std::env::var("ADMIN_JWT_SECRET").ok(),
        std::env::var("ADMIN_API_KEY").ok(),
    )?);
    tracing::info!(config = ?cfg, "configuration resolved");

    let app = api_rest::router(api_rest::AppState::new(cfg)?);

    tracing::info!("++ Starting Folio REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Folio stopped");
    Ok(())
}

/// `RUST_LOG` plus `info` for this binary and the crates it serves.
fn log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive(format!("{}=info", env!("CARGO_CRATE_NAME")).parse()?)
        .add_directive("folio_core=info".parse()?)
        .add_directive("api_rest=info".parse()?))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
