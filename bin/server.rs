// FinanzApp Export - Web Server
// Serves export_backup and export_hogar as attachment downloads

use anyhow::{Context, Result};
use finanzas_export::{logging, server, CorsHeaders, ExportService, ServerConfig, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;
    logging::init(&config.log_level)?;

    let cors = CorsHeaders::from_config(&config.cors)?;
    let app = server::router(&config, ExportService::new(cors));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!(
        version = VERSION,
        addr = %config.bind_addr,
        backup = %config.route("export_backup"),
        hogar = %config.route("export_hogar"),
        max_body_bytes = config.max_body_bytes,
        "export server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("export server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
