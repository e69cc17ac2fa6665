//! The `ledger` command line.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use tracing::debug;

use error_common::{LedgerAppError, Result};
use ledger_store::balance::check_continuity;
use ledger_store::schema::LEDGER_COLUMNS;
use ledger_store::LedgerRow;

use crate::api::{LedgerApi, DEFAULT_API_BASE};
use crate::error::ClientError;
use crate::form::{today, EntryForm};
use crate::opening::KnownOpeningBalances;
use crate::registry::{AddOutcome, SupplierRegistry};

/// Keep supplier ledgers from the terminal
#[derive(Parser, Debug)]
#[command(name = "ledger")]
#[command(about = "Record and review daily supplier ledger entries")]
pub struct Cli {
    /// Base URL of the supplier ledger API
    #[arg(long, env = "LEDGER_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered suppliers
    Suppliers,

    /// Register a new supplier
    Add { name: String },

    /// Show a supplier's latest entry
    Latest { name: String },

    /// Show every entry and any break in the running balance
    History { name: String },

    /// Record an entry for a supplier
    Entry(EntryArgs),
}

#[derive(clap::Args, Debug)]
pub struct EntryArgs {
    pub name: String,

    /// Opening balance (defaults to the latest closing balance)
    #[arg(long)]
    pub opening: Option<String>,

    #[arg(long)]
    pub purchase: Option<String>,

    #[arg(long)]
    pub payment: Option<String>,

    /// Closing balance (defaults to opening + purchase - payment)
    #[arg(long)]
    pub closing: Option<String>,

    #[arg(long)]
    pub remarks: Option<String>,

    /// Entry date as YYYY-MM-DD (defaults to today, UTC)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Fill the form through prompts
    #[arg(short, long)]
    pub interactive: bool,
}

fn command_error(err: &ClientError) -> LedgerAppError {
    debug!(error = ?err, "Ledger API call failed");
    LedgerAppError::CommandError(err.user_message())
}

fn prompt_error(err: dialoguer::Error) -> LedgerAppError {
    LedgerAppError::Other(anyhow::Error::new(err))
}

/// Run one command against `api`.
pub async fn run(cli: Cli, api: &dyn LedgerApi) -> Result<()> {
    match cli.command {
        Commands::Suppliers => list_suppliers(api).await,
        Commands::Add { name } => add_supplier(api, name).await,
        Commands::Latest { name } => show_latest(api, &name).await,
        Commands::History { name } => show_history(api, &name).await,
        Commands::Entry(args) => record_entry(api, args).await,
    }
}

async fn list_suppliers(api: &dyn LedgerApi) -> Result<()> {
    let mut registry = SupplierRegistry::new();
    registry.refresh(api).await.map_err(|e| command_error(&e))?;

    if registry.suppliers().is_empty() {
        println!("{}", "No suppliers yet".bright_black());
    }
    for supplier in registry.suppliers() {
        println!("{}", supplier);
    }
    Ok(())
}

async fn add_supplier(api: &dyn LedgerApi, name: String) -> Result<()> {
    let mut registry = SupplierRegistry::new();
    registry.toggle_add();
    registry.set_new_name(name);

    match registry.submit_add(api).await {
        AddOutcome::Added(name) => {
            println!("{} {}", "✓ Added".bright_green(), name.bold());
            Ok(())
        }
        AddOutcome::Skipped => Err(LedgerAppError::CommandError(
            "Supplier name required".to_string(),
        )),
        AddOutcome::Failed => Err(LedgerAppError::CommandError(
            registry.add_error().unwrap_or_default().to_string(),
        )),
    }
}

fn print_row(row: &LedgerRow) {
    for column in LEDGER_COLUMNS {
        println!("  {:<16} {}", column.header().bright_cyan(), row.cell(column));
    }
}

async fn show_latest(api: &dyn LedgerApi, name: &str) -> Result<()> {
    match api.latest_row(name).await.map_err(|e| command_error(&e))? {
        Some(row) => print_row(&row),
        None => println!("{}", "No entries yet".bright_black()),
    }
    Ok(())
}

async fn show_history(api: &dyn LedgerApi, name: &str) -> Result<()> {
    let history = api.history(name).await.map_err(|e| command_error(&e))?;
    if history.rows.is_empty() {
        println!("{}", "No entries yet".bright_black());
        return Ok(());
    }

    println!("{}", history.header.join(" | ").bold());
    for row in &history.rows {
        println!("{}", row.to_cells().join(" | "));
    }

    for issue in check_continuity(&history.rows) {
        let line = serde_json::to_string(&issue).unwrap_or_else(|_| format!("{:?}", issue));
        println!("{} {}", "⚠".bright_yellow(), line.yellow());
    }
    Ok(())
}

async fn record_entry(api: &dyn LedgerApi, args: EntryArgs) -> Result<()> {
    let known = KnownOpeningBalances::default();
    let mut form = EntryForm::open(&args.name, &known, api)
        .await
        .map_err(|e| command_error(&e))?;

    if let Some(opening) = args.opening {
        form.set_opening(opening);
    }
    if let Some(purchase) = args.purchase {
        form.set_purchase(purchase);
    }
    if let Some(payment) = args.payment {
        form.set_payment(payment);
    }
    if let Some(closing) = args.closing {
        form.set_closing(closing);
    }
    if let Some(remarks) = args.remarks {
        form.set_remarks(remarks);
    }

    if args.interactive && !fill_interactively(&mut form)? {
        println!("{}", "Entry discarded".bright_black());
        return Ok(());
    }

    if form.closing_overridden() {
        println!(
            "{} closing balance {} differs from opening + purchase - payment",
            "⚠".bright_yellow(),
            form.closing().bold()
        );
    }

    let date = args.date.unwrap_or_else(today);
    form.submit(api, date).await.map_err(|e| command_error(&e))?;
    println!(
        "{} {} {} closing {}",
        "✓ Saved".bright_green(),
        form.supplier().bold(),
        date,
        form.closing()
    );
    Ok(())
}

/// Prompt for each field. Returns `false` if the user declines to save.
fn fill_interactively(form: &mut EntryForm) -> Result<bool> {
    let theme = ColorfulTheme::default();
    println!("{} {}", "Supplier:".bright_cyan(), form.supplier().bold());

    let opening: String = Input::with_theme(&theme)
        .with_prompt("Opening balance")
        .with_initial_text(form.opening())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    form.set_opening(opening);

    let purchase: String = Input::with_theme(&theme)
        .with_prompt("Today's purchases")
        .with_initial_text(form.purchase())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    form.set_purchase(purchase);

    let payment: String = Input::with_theme(&theme)
        .with_prompt("Today's payments")
        .with_initial_text(form.payment())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    form.set_payment(payment);

    let closing: String = Input::with_theme(&theme)
        .with_prompt("Closing balance")
        .with_initial_text(form.closing())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    if closing != form.closing() {
        form.set_closing(closing);
    }

    let remarks: String = Input::with_theme(&theme)
        .with_prompt("Remarks")
        .with_initial_text(form.remarks())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    form.set_remarks(remarks);

    Confirm::with_theme(&theme)
        .with_prompt("Save entry?")
        .default(true)
        .interact()
        .map_err(prompt_error)
}
