use clap::Parser;
use colored::*;
use tracing::{error, info};

use error_common::{log_error, LedgerAppError, Result};
use supplier_server::{create_app, ServerConfig, SupplierServer};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    telemetry::init_tracing(&["supplier_server", "ledger_store"], config.verbose)
        .map_err(|e| LedgerAppError::ServerError(e.to_string()))?;

    info!("📒 {}", "Starting supplier ledger server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let bind_address = config.bind_address();
    let server = match SupplierServer::new(config).await {
        Ok(server) => server,
        Err(e) => {
            log_error("startup", &e);
            error!("   {}", "Check your .env file and environment variables".bright_yellow());
            return Err(e);
        }
    };
    info!("🗂️  Ledger store: {}", server.backend.bright_white());

    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| {
            LedgerAppError::NetworkError(format!("Failed to bind to {}: {}", bind_address, e))
        })?;

    info!("🚀 {}", format!("Server running on http://{}", bind_address).bright_green());
    info!(
        "📋 {}",
        format!("Health check available at: http://{}/health", bind_address).bright_blue()
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| LedgerAppError::ServerError(format!("HTTP server error: {}", e)))?;

    Ok(())
}
