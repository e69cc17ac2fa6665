use thiserror::Error;

/// Shown instead of transport details when the server cannot be reached.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Failures seen by a ledger API client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The server answered with an error body; `message` is its `error` text.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable answer.
    #[error("Network error: {0}")]
    Network(String),
}

impl ClientError {
    /// Text to show the user: the server's message verbatim, or a fixed
    /// notice for transport failures.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
