use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use error_common::{LedgerAppError, Result};
use ledger_store::{InMemoryTabularStore, LedgerStoreAdapter, TabularStore};

use crate::config::ServerConfig;

/// Shared server state, cloned into every handler.
#[derive(Clone)]
pub struct SupplierServer {
    /// Ledger adapter over the configured store, built once at startup
    pub ledger: Arc<LedgerStoreAdapter>,
    pub config: Arc<ServerConfig>,
    /// Label of the backing store, reported by `/health`
    pub backend: &'static str,
    pub started_at: Instant,
}

impl SupplierServer {
    /// Build the server from its configuration.
    ///
    /// Spreadsheet credentials are loaded here so that a broken setup stops
    /// the process before it starts listening.
    pub async fn new(config: ServerConfig) -> Result<Self> {
        if config.in_memory {
            info!("Using in-memory ledger store");
            return Ok(Self::with_store(
                Arc::new(InMemoryTabularStore::new()),
                config,
                "in-memory",
            ));
        }

        let sheets = config.sheets_config().ok_or_else(|| {
            LedgerAppError::ConfigError(
                "GOOGLE_SHEET_ID is required unless --in-memory is set".to_string(),
            )
        })?;
        let store = sheets
            .connect()
            .await
            .map_err(|e| {
                LedgerAppError::ConfigError(format!("Google Sheets setup failed: {}", e))
            })?;

        Ok(Self::with_store(Arc::new(store), config, "google-sheets"))
    }

    pub fn with_store(
        store: Arc<dyn TabularStore>,
        config: ServerConfig,
        backend: &'static str,
    ) -> Self {
        Self {
            ledger: Arc::new(LedgerStoreAdapter::new(store)),
            config: Arc::new(config),
            backend,
            started_at: Instant::now(),
        }
    }
}
