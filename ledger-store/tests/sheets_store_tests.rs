//! Google Sheets backend against a mock Sheets API.

use ledger_store::auth::TokenSource;
use ledger_store::*;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::sync::Arc;

const SHEET_ID: &str = "sheet-123";

fn sheets_store(server: &ServerGuard) -> GoogleSheetsStore {
    GoogleSheetsStore::new(
        reqwest::Client::new(),
        server.url(),
        SHEET_ID,
        TokenSource::Static("test-token".to_string()),
    )
}

fn acme() -> SupplierName {
    SupplierName::parse("Acme").unwrap()
}

#[tokio::test]
async fn test_list_tables_reads_sheet_titles() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v4/spreadsheets/sheet-123")
        .match_query(Matcher::UrlEncoded(
            "fields".into(),
            "sheets.properties.title".into(),
        ))
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "sheets": [
                    { "properties": { "title": "Supplier A" } },
                    { "properties": { "title": "Acme" } }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tables = sheets_store(&server).list_tables().await.unwrap();

    assert_eq!(tables, vec!["Supplier A", "Acme"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_read_rows_stringifies_cells() {
    let mut server = Server::new_async().await;
    server
        .mock(
            "GET",
            Matcher::Regex(r"^/v4/spreadsheets/sheet-123/values/.*Acme.*$".to_string()),
        )
        .with_status(200)
        .with_body(
            json!({
                "range": "Acme!A1:F3",
                "majorDimension": "ROWS",
                "values": [
                    ["Date", "Opening Balance", "Purchases", "Payments", "Closing Balance", "Remarks"],
                    ["2024-01-01", 1000, 200, 50, 1150]
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let ledger = LedgerStoreAdapter::new(Arc::new(sheets_store(&server)));
    let latest = ledger.latest_row(&acme()).await.unwrap().unwrap();

    assert_eq!(latest.opening_balance, "1000");
    assert_eq!(latest.closing_balance, "1150");
    assert_eq!(latest.remarks, "");
}

#[tokio::test]
async fn test_header_only_sheet_has_no_latest_row() {
    let mut server = Server::new_async().await;
    server
        .mock(
            "GET",
            Matcher::Regex(r"^/v4/spreadsheets/sheet-123/values/.*Acme.*$".to_string()),
        )
        .with_status(200)
        .with_body(
            json!({
                "values": [["Date", "Opening Balance", "Purchases", "Payments", "Closing Balance", "Remarks"]]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let ledger = LedgerStoreAdapter::new(Arc::new(sheets_store(&server)));
    assert_eq!(ledger.latest_row(&acme()).await.unwrap(), None);
}

#[tokio::test]
async fn test_register_adds_sheet_and_header_in_one_batch() {
    let mut server = Server::new_async().await;
    let batch = server
        .mock("POST", "/v4/spreadsheets/sheet-123:batchUpdate")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(
                r#""addSheet":\{"properties":\{"sheetId":\d+,"title":"Acme"\}\}"#.to_string(),
            ),
            Matcher::Regex(r#""updateCells":\{"#.to_string()),
            Matcher::Regex(r#""rowIndex":0"#.to_string()),
            Matcher::Regex(r#""fields":"userEnteredValue""#.to_string()),
            Matcher::Regex(r#""stringValue":"Opening Balance""#.to_string()),
            Matcher::Regex(r#""stringValue":"Remarks""#.to_string()),
        ]))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;
    let stray_put = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let ledger = LedgerStoreAdapter::new(Arc::new(sheets_store(&server)));
    ledger.register_supplier("Acme").await.unwrap();

    batch.assert_async().await;
    stray_put.assert_async().await;
}

#[tokio::test]
async fn test_failed_register_batch_can_be_retried() {
    let mut server = Server::new_async().await;
    let failed = server
        .mock("POST", "/v4/spreadsheets/sheet-123:batchUpdate")
        .with_status(503)
        .with_body(
            json!({ "error": { "code": 503, "message": "The service is currently unavailable." } })
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let ledger = LedgerStoreAdapter::new(Arc::new(sheets_store(&server)));
    let first = ledger.register_supplier("Acme").await;
    assert_eq!(
        first,
        Err(LedgerError::StoreUnavailable(
            "The service is currently unavailable.".to_string()
        ))
    );
    failed.assert_async().await;
    failed.remove_async().await;

    let retried = server
        .mock("POST", "/v4/spreadsheets/sheet-123:batchUpdate")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    assert!(ledger.register_supplier("Acme").await.is_ok());
    retried.assert_async().await;
}

#[tokio::test]
async fn test_register_maps_duplicate_sheet_to_already_exists() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v4/spreadsheets/sheet-123:batchUpdate")
        .with_status(400)
        .with_body(
            json!({
                "error": {
                    "code": 400,
                    "message": "Invalid requests[0].addSheet: A sheet with the name \"Acme\" already exists. Please enter another name.",
                    "status": "INVALID_ARGUMENT"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let ledger = LedgerStoreAdapter::new(Arc::new(sheets_store(&server)));
    let result = ledger.register_supplier("Acme").await;

    assert_eq!(result, Err(LedgerError::AlreadyExists("Acme".to_string())));
}

#[tokio::test]
async fn test_append_uses_user_entered_insert_rows() {
    let mut server = Server::new_async().await;
    let append = server
        .mock(
            "POST",
            Matcher::Regex(r"^/v4/spreadsheets/sheet-123/values/.*Acme.*:append$".to_string()),
        )
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("valueInputOption".into(), "USER_ENTERED".into()),
            Matcher::UrlEncoded("insertDataOption".into(), "INSERT_ROWS".into()),
        ]))
        .match_body(Matcher::Json(json!({
            "values": [["2024-01-01", "1000", "200", "50", "1150", ""]]
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let ledger = LedgerStoreAdapter::new(Arc::new(sheets_store(&server)));
    let row = AppendRowRequest {
        date: "2024-01-01".to_string(),
        opening_balance: "1000".to_string(),
        purchase: "200".to_string(),
        payment: "50".to_string(),
        closing_balance: "1150".to_string(),
        remarks: String::new(),
    }
    .into_row();
    ledger.append_row(&acme(), row).await.unwrap();

    append.assert_async().await;
}

#[tokio::test]
async fn test_api_failures_surface_google_message() {
    let mut server = Server::new_async().await;
    server
        .mock(
            "POST",
            Matcher::Regex(r"^/v4/spreadsheets/sheet-123/values/.*:append$".to_string()),
        )
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(
            json!({
                "error": { "code": 400, "message": "Unable to parse range: 'Ghost'", "status": "INVALID_ARGUMENT" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let ledger = LedgerStoreAdapter::new(Arc::new(sheets_store(&server)));
    let ghost = SupplierName::parse("Ghost").unwrap();
    let result = ledger.append_row(&ghost, LedgerRow::default()).await;

    assert_eq!(
        result,
        Err(LedgerError::StoreUnavailable(
            "Unable to parse range: 'Ghost'".to_string()
        ))
    );
}

#[tokio::test]
async fn test_malformed_responses_are_store_failures() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v4/spreadsheets/sheet-123")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let ledger = LedgerStoreAdapter::new(Arc::new(sheets_store(&server)));
    assert!(matches!(
        ledger.list_suppliers().await,
        Err(LedgerError::StoreUnavailable(_))
    ));
}
