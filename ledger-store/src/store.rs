use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{BackendError, BackendResult};
use crate::names::SupplierName;

/// A spreadsheet-like store: named tables of text rows, appended at the end.
///
/// Implementations do no locking of their own beyond what the backing store
/// provides; two appends to the same table land in whatever order the store
/// serialises them.
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// Table names in the store's native order.
    async fn list_tables(&self) -> BackendResult<Vec<String>>;

    /// Every row of a table, header included, in append order.
    async fn read_rows(&self, table: &SupplierName) -> BackendResult<Vec<Vec<String>>>;

    /// Create a table whose first row is `header`, in one step: either the
    /// table exists with its header afterwards or nothing changed. Fails with
    /// a name-collision error if the name is taken.
    async fn create_table_with_header(
        &self,
        table: &SupplierName,
        header: Vec<String>,
    ) -> BackendResult<()>;

    /// Append one row after the last row of a table.
    async fn append_row(&self, table: &SupplierName, cells: Vec<String>) -> BackendResult<()>;
}

struct Table {
    name: String,
    rows: Vec<Vec<String>>,
}

/// In-memory tabular store for testing and development
pub struct InMemoryTabularStore {
    tables: Arc<RwLock<Vec<Table>>>,
    calls: AtomicUsize,
}

impl InMemoryTabularStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Vec::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of store operations attempted so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn missing(table: &SupplierName) -> BackendError {
        BackendError::new(Some(400), format!("Unable to parse range: {}", table.a1_range()))
    }

    fn with_table<T>(
        &self,
        table: &SupplierName,
        f: impl FnOnce(&mut Table) -> T,
    ) -> BackendResult<T> {
        let mut tables = self.tables.write();
        tables
            .iter_mut()
            .find(|t| t.name == table.as_str())
            .map(f)
            .ok_or_else(|| Self::missing(table))
    }
}

impl Default for InMemoryTabularStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabularStore for InMemoryTabularStore {
    async fn list_tables(&self) -> BackendResult<Vec<String>> {
        self.record_call();
        Ok(self.tables.read().iter().map(|t| t.name.clone()).collect())
    }

    async fn read_rows(&self, table: &SupplierName) -> BackendResult<Vec<Vec<String>>> {
        self.record_call();
        self.with_table(table, |t| t.rows.clone())
    }

    async fn create_table_with_header(
        &self,
        table: &SupplierName,
        header: Vec<String>,
    ) -> BackendResult<()> {
        self.record_call();
        let mut tables = self.tables.write();
        if tables.iter().any(|t| t.name == table.as_str()) {
            return Err(BackendError::new(
                Some(400),
                format!(
                    "Invalid requests[0].addSheet: A sheet with the name \"{}\" already exists. \
                     Please enter another name.",
                    table
                ),
            ));
        }
        tables.push(Table {
            name: table.as_str().to_string(),
            rows: vec![header],
        });
        Ok(())
    }

    async fn append_row(&self, table: &SupplierName, cells: Vec<String>) -> BackendResult<()> {
        self.record_call();
        self.with_table(table, |t| t.rows.push(cells))
    }
}
