//! Spreadsheet connection settings.

use std::time::Duration;
use tracing::info;

use crate::auth::{ServiceAccountAuth, ServiceAccountKey, TokenSource};
use crate::error::AuthResult;
use crate::sheets::GoogleSheetsStore;

const DEFAULT_CREDENTIALS_FILE: &str = "service-account.json";

/// How the service authenticates against Google.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsSource {
    /// Service-account key JSON held in an environment variable.
    Inline(String),
    /// Path to a service-account key file.
    File(String),
    /// A pre-issued OAuth access token.
    AccessToken(String),
}

impl CredentialsSource {
    /// `GOOGLE_CREDENTIALS` wins over `GOOGLE_ACCESS_TOKEN`, which wins over
    /// the key file named by `GOOGLE_CREDENTIALS_FILE`.
    pub fn from_env() -> Self {
        if let Ok(json) = std::env::var("GOOGLE_CREDENTIALS") {
            CredentialsSource::Inline(json)
        } else if let Ok(token) = std::env::var("GOOGLE_ACCESS_TOKEN") {
            CredentialsSource::AccessToken(token)
        } else {
            CredentialsSource::File(
                std::env::var("GOOGLE_CREDENTIALS_FILE")
                    .unwrap_or_else(|_| DEFAULT_CREDENTIALS_FILE.to_string()),
            )
        }
    }
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub api_base: String,
    pub credentials: CredentialsSource,
    pub timeout: Duration,
}

impl SheetsConfig {
    /// Build the authenticated Sheets client. Credentials are loaded and
    /// parsed here, so a broken setup fails before the server starts.
    pub async fn connect(&self) -> AuthResult<GoogleSheetsStore> {
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;

        let tokens = match &self.credentials {
            CredentialsSource::AccessToken(token) => TokenSource::Static(token.clone()),
            CredentialsSource::Inline(json) => {
                let key = ServiceAccountKey::from_json(json)?;
                TokenSource::ServiceAccount(ServiceAccountAuth::new(key, http.clone())?)
            }
            CredentialsSource::File(path) => {
                let key = ServiceAccountKey::from_file(path).await?;
                TokenSource::ServiceAccount(ServiceAccountAuth::new(key, http.clone())?)
            }
        };

        info!(
            spreadsheet_id = %self.spreadsheet_id,
            api_base = %self.api_base,
            "Google Sheets store configured"
        );

        Ok(GoogleSheetsStore::new(
            http,
            self.api_base.clone(),
            self.spreadsheet_id.clone(),
            tokens,
        ))
    }
}
