//! Google Sheets v4 backend. One tab per supplier.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::TokenSource;
use crate::error::{BackendError, BackendResult};
use crate::model::cell_text;
use crate::names::{encode_range, SupplierName};
use crate::store::TabularStore;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

pub struct GoogleSheetsStore {
    http: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    tokens: TokenSource,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GoogleSheetsStore {
    pub fn new(
        http: reqwest::Client,
        api_base: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        tokens: TokenSource,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            tokens,
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn spreadsheet_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_id)
        )
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/values/{}", self.spreadsheet_url(), encode_range(range))
    }

    async fn request(&self, method: Method, url: String) -> BackendResult<RequestBuilder> {
        let token = self.tokens.bearer().await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send and turn any non-2xx answer into a `BackendError` carrying
    /// Google's own error message.
    async fn send(builder: RequestBuilder) -> BackendResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| format!("Sheets API returned {}: {}", status, body));

        warn!(status = status.as_u16(), error = %message, "Sheets API request failed");
        Err(BackendError::new(Some(status.as_u16()), message))
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> BackendResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::transport(format!("Malformed Sheets API response: {}", e)))
    }
}

/// A random non-negative sheet id for a new tab.
fn new_sheet_id() -> i32 {
    i32::try_from(Uuid::new_v4().as_fields().0 >> 1).unwrap_or(1)
}

#[async_trait]
impl TabularStore for GoogleSheetsStore {
    async fn list_tables(&self) -> BackendResult<Vec<String>> {
        let builder = self
            .request(Method::GET, self.spreadsheet_url())
            .await?
            .query(&[("fields", "sheets.properties.title")]);
        let meta: SpreadsheetMeta = Self::decode(Self::send(builder).await?).await?;

        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    async fn read_rows(&self, table: &SupplierName) -> BackendResult<Vec<Vec<String>>> {
        debug!(supplier = %table, "Reading rows");
        let builder = self
            .request(Method::GET, self.values_url(&table.a1_range()))
            .await?;
        let range: ValueRange = Self::decode(Self::send(builder).await?).await?;

        Ok(range
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    /// One `batchUpdate`: `addSheet` with a chosen `sheetId`, then
    /// `updateCells` on row 1 of that sheet. Sheets applies the batch as a
    /// whole or not at all.
    async fn create_table_with_header(
        &self,
        table: &SupplierName,
        header: Vec<String>,
    ) -> BackendResult<()> {
        let sheet_id = new_sheet_id();
        let url = format!("{}:batchUpdate", self.spreadsheet_url());
        let cells: Vec<_> = header
            .iter()
            .map(|text| json!({ "userEnteredValue": { "stringValue": text } }))
            .collect();
        let body = json!({
            "requests": [
                {
                    "addSheet": {
                        "properties": { "sheetId": sheet_id, "title": table.as_str() }
                    }
                },
                {
                    "updateCells": {
                        "start": { "sheetId": sheet_id, "rowIndex": 0, "columnIndex": 0 },
                        "rows": [{ "values": cells }],
                        "fields": "userEnteredValue"
                    }
                }
            ]
        });

        debug!(supplier = %table, sheet_id, "Creating sheet");
        let builder = self.request(Method::POST, url).await?.json(&body);
        Self::send(builder).await?;
        Ok(())
    }

    async fn append_row(&self, table: &SupplierName, cells: Vec<String>) -> BackendResult<()> {
        let url = format!("{}:append", self.values_url(&table.a1_range()));
        let builder = self
            .request(Method::POST, url)
            .await?
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [cells] }));
        Self::send(builder).await?;
        Ok(())
    }
}
