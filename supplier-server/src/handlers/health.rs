use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::server::SupplierServer;

pub const LIVENESS_TEXT: &str = "Supplier backend is running!";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Which ledger store backs this process
    pub store: String,
}

/// Plain-text liveness probe
pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// Health check handler. Does not call the store.
pub async fn health_check(State(server): State<SupplierServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: server.started_at.elapsed().as_secs(),
        store: server.backend.to_string(),
    })
}
