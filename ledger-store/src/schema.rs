//! Column layout of a supplier ledger tab.
//!
//! `LEDGER_COLUMNS` is the only place the column order is written down. The
//! header row, the row encoder and the row decoder are all derived from it.

/// One column of the ledger table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerColumn {
    Date,
    OpeningBalance,
    Purchases,
    Payments,
    ClosingBalance,
    Remarks,
}

/// Columns in storage order.
pub const LEDGER_COLUMNS: [LedgerColumn; 6] = [
    LedgerColumn::Date,
    LedgerColumn::OpeningBalance,
    LedgerColumn::Purchases,
    LedgerColumn::Payments,
    LedgerColumn::ClosingBalance,
    LedgerColumn::Remarks,
];

impl LedgerColumn {
    /// Header text written in the first row of every supplier tab.
    pub const fn header(self) -> &'static str {
        match self {
            LedgerColumn::Date => "Date",
            LedgerColumn::OpeningBalance => "Opening Balance",
            LedgerColumn::Purchases => "Purchases",
            LedgerColumn::Payments => "Payments",
            LedgerColumn::ClosingBalance => "Closing Balance",
            LedgerColumn::Remarks => "Remarks",
        }
    }

    /// Zero-based position of the column in a stored row.
    pub fn index(self) -> usize {
        LEDGER_COLUMNS
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }
}

/// The header row as stored.
pub fn header_row() -> Vec<String> {
    LEDGER_COLUMNS.iter().map(|c| c.header().to_string()).collect()
}

/// Columns whose stored header text differs from the schema.
///
/// Returns `(column, stored_text)` pairs; a missing cell is reported as `""`.
pub fn header_mismatches(stored: &[String]) -> Vec<(LedgerColumn, String)> {
    LEDGER_COLUMNS
        .iter()
        .filter_map(|col| {
            let found = stored.get(col.index()).map(String::as_str).unwrap_or("");
            (found != col.header()).then(|| (*col, found.to_string()))
        })
        .collect()
}
