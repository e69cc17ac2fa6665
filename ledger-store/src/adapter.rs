//! Ledger store adapter: supplier tabs as append-only ledgers.

use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::balance::row_amounts;
use crate::error::{BackendError, LedgerError, LedgerResult};
use crate::model::{LedgerHistory, LedgerRow};
use crate::names::SupplierName;
use crate::schema::{header_mismatches, header_row};
use crate::store::TabularStore;

/// Maps supplier names onto tables of a [`TabularStore`].
///
/// No state is kept between calls: every read goes to the store, and every
/// failure is reported once, without retrying.
#[derive(Clone)]
pub struct LedgerStoreAdapter {
    store: Arc<dyn TabularStore>,
}

impl LedgerStoreAdapter {
    pub fn new(store: Arc<dyn TabularStore>) -> Self {
        Self { store }
    }

    /// Names of all supplier tables, in the store's own order.
    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> LedgerResult<Vec<String>> {
        self.store.list_tables().await.map_err(unavailable)
    }

    /// The most recently appended row, or `None` while the table holds only
    /// its header (or nothing at all).
    #[instrument(skip(self, supplier), fields(supplier = %supplier))]
    pub async fn latest_row(&self, supplier: &SupplierName) -> LedgerResult<Option<LedgerRow>> {
        let rows = self.store.read_rows(supplier).await.map_err(unavailable)?;
        let Some((header, data)) = rows.split_first() else {
            return Ok(None);
        };
        warn_on_header_drift(supplier, header);

        Ok(data.last().map(|cells| LedgerRow::from_cells(cells)))
    }

    /// Every data row in append order, with the stored header.
    #[instrument(skip(self, supplier), fields(supplier = %supplier))]
    pub async fn history(&self, supplier: &SupplierName) -> LedgerResult<LedgerHistory> {
        let rows = self.store.read_rows(supplier).await.map_err(unavailable)?;
        let Some((header, data)) = rows.split_first() else {
            return Ok(LedgerHistory::default());
        };
        warn_on_header_drift(supplier, header);

        Ok(LedgerHistory {
            header: header.clone(),
            rows: data.iter().map(|cells| LedgerRow::from_cells(cells)).collect(),
        })
    }

    /// Create a supplier table together with its header row.
    ///
    /// The table and header are created in one store call, so a failed
    /// registration leaves nothing behind and can be retried. Uniqueness is
    /// enforced by the store: a name collision becomes `AlreadyExists`. Two
    /// concurrent registrations of the same name race, and at most one wins.
    #[instrument(skip(self))]
    pub async fn register_supplier(&self, raw_name: &str) -> LedgerResult<SupplierName> {
        let name = SupplierName::parse(raw_name)?;

        if let Err(err) = self.store.create_table_with_header(&name, header_row()).await {
            if err.is_name_collision() {
                info!(supplier = %name, "Supplier already registered");
                return Err(LedgerError::AlreadyExists(name.to_string()));
            }
            return Err(unavailable(err));
        }

        info!(supplier = %name, "Supplier registered");
        Ok(name)
    }

    /// Append one entry to a supplier's table, as given.
    ///
    /// The closing balance is not recomputed. A row whose closing differs
    /// from opening + purchases - payments is logged and still stored, as is
    /// one whose amounts are too large to check.
    #[instrument(skip(self, supplier, row), fields(supplier = %supplier, date = %row.date))]
    pub async fn append_row(&self, supplier: &SupplierName, row: LedgerRow) -> LedgerResult<()> {
        if let Some(amounts) = row_amounts(&row) {
            if amounts.is_balanced() == Some(false) {
                warn!(
                    opening = %row.opening_balance,
                    purchases = %row.purchases,
                    payments = %row.payments,
                    closing = %row.closing_balance,
                    "Closing balance does not match opening + purchases - payments"
                );
            }
        }

        self.store
            .append_row(supplier, row.to_cells())
            .await
            .map_err(unavailable)
    }
}

fn unavailable(err: BackendError) -> LedgerError {
    error!(status = ?err.status, error = %err, "Ledger store call failed");
    err.into()
}

fn warn_on_header_drift(supplier: &SupplierName, header: &[String]) {
    for (column, found) in header_mismatches(header) {
        warn!(
            supplier = %supplier,
            expected = column.header(),
            found = %found,
            "Stored header differs from ledger schema"
        );
    }
}
