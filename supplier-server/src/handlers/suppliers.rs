use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use ledger_store::{AppendRowRequest, LedgerHistory, LedgerRow, SupplierName};

use crate::{error::ApiResult, server::SupplierServer};

/// Body of `POST /suppliers`.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterSupplierRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// `GET /suppliers`: tab names in spreadsheet order.
pub async fn list_suppliers(State(server): State<SupplierServer>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(server.ledger.list_suppliers().await?))
}

/// `POST /suppliers`: create the tab and its header row.
pub async fn register_supplier(
    State(server): State<SupplierServer>,
    payload: Result<Json<RegisterSupplierRequest>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Json(request) = payload?;
    server
        .ledger
        .register_supplier(request.name.as_deref().unwrap_or_default())
        .await?;
    Ok(SuccessResponse::ok())
}

/// `GET /supplier/:name/latest`: the last row, or `null` before the first entry.
pub async fn latest_row(
    State(server): State<SupplierServer>,
    Path(name): Path<String>,
) -> ApiResult<Json<Option<LedgerRow>>> {
    let supplier = SupplierName::from_route(&name)?;
    Ok(Json(server.ledger.latest_row(&supplier).await?))
}

/// `GET /supplier/:name/history`
pub async fn history(
    State(server): State<SupplierServer>,
    Path(name): Path<String>,
) -> ApiResult<Json<LedgerHistory>> {
    let supplier = SupplierName::from_route(&name)?;
    Ok(Json(server.ledger.history(&supplier).await?))
}

/// `POST /supplier/:name`: append one entry as sent.
pub async fn append_row(
    State(server): State<SupplierServer>,
    Path(name): Path<String>,
    payload: Result<Json<AppendRowRequest>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let supplier = SupplierName::from_route(&name)?;
    let Json(request) = payload?;
    server.ledger.append_row(&supplier, request.into_row()).await?;
    Ok(SuccessResponse::ok())
}
