//! Supplier ledger HTTP server.
//!
//! A thin JSON surface over [`ledger_store::LedgerStoreAdapter`]: list and
//! register suppliers, read the latest or full ledger of one supplier, and
//! append a day's entry.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::*;
pub use server::SupplierServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: SupplierServer) -> Router {
    let cors = middleware::create_cors_layer(&server.config.cors_allowed_origins);

    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(server)
}
