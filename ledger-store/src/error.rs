use thiserror::Error;

/// Failures surfaced by the ledger store adapter.
///
/// The taxonomy is deliberately coarse: callers only need to tell bad input
/// (`NameRequired`, `AlreadyExists`) apart from backend trouble.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Supplier name required")]
    NameRequired,

    #[error("Supplier already exists")]
    AlreadyExists(String),

    #[error("{0}")]
    StoreUnavailable(String),
}

impl LedgerError {
    /// True for errors caused by the caller's input rather than the store.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, LedgerError::NameRequired | LedgerError::AlreadyExists(_))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Error reported by a tabular store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    /// HTTP status reported by the backend, when there was a response at all.
    pub status: Option<u16>,
    pub message: String,
}

impl BackendError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    /// Whether the store rejected a table creation because the name is taken.
    pub fn is_name_collision(&self) -> bool {
        self.message.contains("already exists")
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::new(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        BackendError::transport(err.to_string())
    }
}

impl From<BackendError> for LedgerError {
    fn from(err: BackendError) -> Self {
        LedgerError::StoreUnavailable(err.message)
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Credential and token exchange failures.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Credentials not found: {0}")]
    MissingCredentials(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;
