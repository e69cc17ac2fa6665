use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::schema::{LedgerColumn, LEDGER_COLUMNS};

/// One day's entry in a supplier ledger, exactly as stored.
///
/// Amounts stay text: the store keeps whatever the caller sent. In JSON the
/// row is an object keyed by the header names (`"Opening Balance"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRow {
    pub date: String,
    pub opening_balance: String,
    pub purchases: String,
    pub payments: String,
    pub closing_balance: String,
    pub remarks: String,
}

impl LedgerRow {
    pub fn cell(&self, column: LedgerColumn) -> &str {
        match column {
            LedgerColumn::Date => &self.date,
            LedgerColumn::OpeningBalance => &self.opening_balance,
            LedgerColumn::Purchases => &self.purchases,
            LedgerColumn::Payments => &self.payments,
            LedgerColumn::ClosingBalance => &self.closing_balance,
            LedgerColumn::Remarks => &self.remarks,
        }
    }

    fn cell_mut(&mut self, column: LedgerColumn) -> &mut String {
        match column {
            LedgerColumn::Date => &mut self.date,
            LedgerColumn::OpeningBalance => &mut self.opening_balance,
            LedgerColumn::Purchases => &mut self.purchases,
            LedgerColumn::Payments => &mut self.payments,
            LedgerColumn::ClosingBalance => &mut self.closing_balance,
            LedgerColumn::Remarks => &mut self.remarks,
        }
    }

    /// Encode into storage order.
    pub fn to_cells(&self) -> Vec<String> {
        LEDGER_COLUMNS
            .iter()
            .map(|col| self.cell(*col).to_string())
            .collect()
    }

    /// Decode a stored row. Cells the store trimmed off the end read as `""`.
    pub fn from_cells(cells: &[String]) -> Self {
        let mut row = Self::default();
        for col in LEDGER_COLUMNS {
            if let Some(value) = cells.get(col.index()) {
                *row.cell_mut(col) = value.clone();
            }
        }
        row
    }

    /// Decode an object keyed by header names.
    pub fn from_named(named: &HashMap<String, serde_json::Value>) -> Self {
        let mut row = Self::default();
        for col in LEDGER_COLUMNS {
            if let Some(value) = named.get(col.header()) {
                *row.cell_mut(col) = cell_text(value);
            }
        }
        row
    }
}

impl Serialize for LedgerRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LEDGER_COLUMNS.len()))?;
        for col in LEDGER_COLUMNS {
            map.serialize_entry(col.header(), self.cell(col))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LedgerRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let named = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self::from_named(&named))
    }
}

/// Body of `POST /supplier/:name`.
///
/// Field names are the form's (`purchase`, `payment`), not the column
/// headers; they map onto the `Purchases`/`Payments` columns by position.
/// Each field accepts a string, a number or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendRowRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub opening_balance: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub purchase: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub payment: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub closing_balance: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub remarks: String,
}

impl AppendRowRequest {
    pub fn into_row(self) -> LedgerRow {
        LedgerRow {
            date: self.date,
            opening_balance: self.opening_balance,
            purchases: self.purchase,
            payments: self.payment,
            closing_balance: self.closing_balance,
            remarks: self.remarks,
        }
    }
}

/// Every data row of a supplier tab, in append order, with the stored header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerHistory {
    pub header: Vec<String>,
    pub rows: Vec<LedgerRow>,
}

impl LedgerHistory {
    pub fn latest(&self) -> Option<&LedgerRow> {
        self.rows.last()
    }
}

/// Text form of a JSON cell value. Numbers keep their JSON spelling.
pub fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(cell_text(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> LedgerRow {
        LedgerRow {
            date: "2024-01-01".to_string(),
            opening_balance: "1000".to_string(),
            purchases: "200".to_string(),
            payments: "50".to_string(),
            closing_balance: "1150".to_string(),
            remarks: String::new(),
        }
    }

    #[test]
    fn serializes_with_header_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "Date": "2024-01-01",
                "Opening Balance": "1000",
                "Purchases": "200",
                "Payments": "50",
                "Closing Balance": "1150",
                "Remarks": ""
            })
        );
    }

    #[test]
    fn short_rows_decode_with_empty_trailing_cells() {
        let cells: Vec<String> = ["2024-01-01", "1000", "200", "50", "1150"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(LedgerRow::from_cells(&cells), sample());
        assert_eq!(sample().to_cells().len(), 6);
    }

    #[test]
    fn append_request_accepts_numbers_and_missing_fields() {
        let request: AppendRowRequest = serde_json::from_value(json!({
            "date": "2024-01-01",
            "openingBalance": 1000,
            "purchase": "200",
            "payment": 50.5,
            "closingBalance": "1149.5"
        }))
        .unwrap();

        let row = request.into_row();
        assert_eq!(row.opening_balance, "1000");
        assert_eq!(row.purchases, "200");
        assert_eq!(row.payments, "50.5");
        assert_eq!(row.remarks, "");
    }

    #[test]
    fn append_request_stores_garbage_as_given() {
        let request: AppendRowRequest = serde_json::from_value(json!({
            "date": "2024-01-02",
            "openingBalance": "12abc",
            "purchase": null,
            "payment": "",
            "closingBalance": "n/a",
            "remarks": "check later"
        }))
        .unwrap();

        let row = request.into_row();
        assert_eq!(row.opening_balance, "12abc");
        assert_eq!(row.purchases, "");
        assert_eq!(row.closing_balance, "n/a");
    }

    #[test]
    fn rows_read_back_from_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: LedgerRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
