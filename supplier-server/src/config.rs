use clap::Parser;
use std::time::Duration;

use ledger_store::{CredentialsSource, SheetsConfig, DEFAULT_API_BASE};

/// Supplier ledger HTTP server
#[derive(Parser, Debug, Clone)]
#[command(name = "supplier-server")]
#[command(about = "Supplier ledger HTTP API backed by a Google spreadsheet")]
pub struct ServerConfig {
    /// Server bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Spreadsheet holding one tab per supplier
    #[arg(long = "sheet-id", env = "GOOGLE_SHEET_ID")]
    pub spreadsheet_id: Option<String>,

    /// Sheets API base URL
    #[arg(long, env = "SHEETS_API_BASE", default_value = DEFAULT_API_BASE)]
    pub sheets_api_base: String,

    /// Timeout for each Sheets API call
    #[arg(long, env = "SHEETS_TIMEOUT_SECONDS", default_value_t = 30)]
    pub sheets_timeout_seconds: u64,

    /// Comma-separated browser origins allowed by CORS; empty allows any
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub cors_allowed_origins: Vec<String>,

    /// Keep ledgers in process memory instead of a spreadsheet
    #[arg(long)]
    pub in_memory: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            spreadsheet_id: None,
            sheets_api_base: DEFAULT_API_BASE.to_string(),
            sheets_timeout_seconds: 30,
            cors_allowed_origins: Vec::new(),
            in_memory: false,
            verbose: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Spreadsheet settings, with credentials taken from the environment.
    /// `None` when no spreadsheet id was configured.
    pub fn sheets_config(&self) -> Option<SheetsConfig> {
        let spreadsheet_id = self.spreadsheet_id.as_deref()?.trim();
        if spreadsheet_id.is_empty() {
            return None;
        }

        Some(SheetsConfig {
            spreadsheet_id: spreadsheet_id.to_string(),
            api_base: self.sheets_api_base.clone(),
            credentials: CredentialsSource::from_env(),
            timeout: Duration::from_secs(self.sheets_timeout_seconds),
        })
    }
}
