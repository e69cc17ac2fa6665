use thiserror::Error;

/// Failures that end a process or a CLI command
#[derive(Error, Debug)]
pub enum LedgerAppError {
    /// Missing or invalid settings
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// A command was refused by the ledger API
    #[error("{0}")]
    CommandError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LedgerAppError>;

pub fn log_error(context: &str, error: &LedgerAppError) {
    tracing::error!(
        context = context,
        error = %error,
        "Supplier ledger error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_errors_display_verbatim() {
        let err = LedgerAppError::CommandError("Supplier already exists".to_string());
        assert_eq!(err.to_string(), "Supplier already exists");
    }

    #[test]
    fn anyhow_errors_are_transparent() {
        let err: LedgerAppError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.to_string(), "disk full");
    }
}
