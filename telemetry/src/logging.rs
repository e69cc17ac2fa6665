use std::env;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::{Result, TelemetryError};
use crate::format::{ColoredFieldFormatter, ColoredFormatter};

/// Environment variable selecting `development` or `production` output.
pub const ENV_VAR: &str = "LEDGER_ENV";

/// Filter used when `RUST_LOG` is unset: the given crates at `info`
/// (`debug` when verbose), plus the HTTP trace layer at `info`.
pub fn default_filter(targets: &[&str], verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };

    targets
        .iter()
        .map(|target| format!("{}={}", target, level))
        .chain(std::iter::once("tower_http=info".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_development() -> bool {
    env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string()) == "development"
}

fn use_colors() -> bool {
    env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout)
}

/// Install the global subscriber for a long-running service.
pub fn init_tracing(targets: &[&str], verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(targets, verbose)));

    let installed = if is_development() && use_colors() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .event_format(ColoredFormatter)
                    .fmt_fields(ColoredFieldFormatter),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init()
    };

    installed.map_err(|e| TelemetryError::TracingError(e.to_string()))
}

/// Install a stderr subscriber for a terminal tool. Only warnings and
/// errors are shown unless `verbose` is set.
pub fn init_cli_tracing(targets: &[&str], verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = targets
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .with_ansi(atty::is(atty::Stream::Stderr)),
        )
        .try_init()
        .map_err(|e| TelemetryError::TracingError(e.to_string()))
}
