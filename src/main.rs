//! BFHL Service - Main Entry Point
//!
//! Token classification and file inspection over HTTP.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bfhl::types::{LogFormat, ServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env();

    // Initialize tracing
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "bfhl=info,tower_http=debug".into()),
    );
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    info!("Starting BFHL Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        max_upload_bytes = config.max_upload_bytes,
        max_body_bytes = config.max_body_bytes,
        "Upload limits"
    );

    let addr = config.socket_addr();
    let app = bfhl::create_router(config);

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
