use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{health, suppliers},
    server::SupplierServer,
};

/// Liveness and health routes
pub fn health_routes() -> Router<SupplierServer> {
    Router::new()
        .route("/", get(health::liveness))
        .route("/health", get(health::health_check))
}

/// Supplier registry and ledger routes
pub fn supplier_routes() -> Router<SupplierServer> {
    Router::new()
        .route(
            "/suppliers",
            get(suppliers::list_suppliers).post(suppliers::register_supplier),
        )
        .route("/supplier/:name", post(suppliers::append_row))
        .route("/supplier/:name/latest", get(suppliers::latest_row))
        .route("/supplier/:name/history", get(suppliers::history))
}

pub fn create_routes() -> Router<SupplierServer> {
    Router::new()
        .merge(health_routes())
        .merge(supplier_routes())
}
