//! Calls to the supplier ledger HTTP API.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use ledger_store::names::url_segment;
use ledger_store::{AppendRowRequest, LedgerHistory, LedgerRow};

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// The server operations the client side relies on.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    async fn list_suppliers(&self) -> ClientResult<Vec<String>>;

    async fn register_supplier(&self, name: &str) -> ClientResult<()>;

    /// `None` while the supplier has no entries.
    async fn latest_row(&self, supplier: &str) -> ClientResult<Option<LedgerRow>>;

    async fn history(&self, supplier: &str) -> ClientResult<LedgerHistory>;

    async fn append_row(&self, supplier: &str, row: &AppendRowRequest) -> ClientResult<()>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`LedgerApi`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpLedgerApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLedgerApi {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn supplier_url(&self, supplier: &str, suffix: &str) -> String {
        format!("{}/supplier/{}{}", self.base_url, url_segment(supplier), suffix)
    }

    /// Send and map any non-2xx answer to `ClientError::Api` with the
    /// server's `error` text.
    async fn send(builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("Request failed with status {}", status.as_u16()));

        debug!(status = status.as_u16(), error = %message, "Ledger API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Network(format!("Malformed response: {}", e)))
    }
}

#[async_trait]
impl LedgerApi for HttpLedgerApi {
    async fn list_suppliers(&self) -> ClientResult<Vec<String>> {
        let url = format!("{}/suppliers", self.base_url);
        Self::decode(Self::send(self.http.get(url)).await?).await
    }

    async fn register_supplier(&self, name: &str) -> ClientResult<()> {
        let url = format!("{}/suppliers", self.base_url);
        Self::send(self.http.post(url).json(&json!({ "name": name }))).await?;
        Ok(())
    }

    async fn latest_row(&self, supplier: &str) -> ClientResult<Option<LedgerRow>> {
        let url = self.supplier_url(supplier, "/latest");
        Self::decode(Self::send(self.http.get(url)).await?).await
    }

    async fn history(&self, supplier: &str) -> ClientResult<LedgerHistory> {
        let url = self.supplier_url(supplier, "/history");
        Self::decode(Self::send(self.http.get(url)).await?).await
    }

    async fn append_row(&self, supplier: &str, row: &AppendRowRequest) -> ClientResult<()> {
        let url = self.supplier_url(supplier, "");
        Self::send(self.http.post(url).json(row)).await?;
        Ok(())
    }
}
