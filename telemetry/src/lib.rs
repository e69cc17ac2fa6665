//! Tracing setup for the supplier ledger binaries.
//!
//! - [`init_tracing`]: server logging. Colored, human-oriented lines on a
//!   development terminal; structured JSON everywhere else.
//! - [`init_cli_tracing`]: quiet logging to stderr for terminal tools, so
//!   command output on stdout stays clean.
//!
//! `RUST_LOG` always overrides the default filter.
//!
//! # Example
//!
//! ```rust,no_run
//! telemetry::init_tracing(&["supplier_server", "ledger_store"], false)?;
//! tracing::info!("ready");
//! # Ok::<(), telemetry::TelemetryError>(())
//! ```

pub mod error;
pub mod format;
pub mod logging;

pub use error::*;
pub use logging::*;
