use clap::Parser;
use colored::*;

use error_common::LedgerAppError;
use ledger_client::cli::{self, Cli};
use ledger_client::HttpLedgerApi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = telemetry::init_cli_tracing(&["ledger_client", "ledger_store"], cli.verbose) {
        eprintln!("{} {}", "warning:".bright_yellow(), e);
    }

    if let Err(e) = execute(cli).await {
        eprintln!("{} {}", "✗".bright_red(), e.to_string().red());
        std::process::exit(1);
    }
}

async fn execute(cli: Cli) -> Result<(), LedgerAppError> {
    let api = HttpLedgerApi::new(cli.api_base.clone())
        .map_err(|e| LedgerAppError::ConfigError(e.to_string()))?;
    cli::run(cli, &api).await
}
