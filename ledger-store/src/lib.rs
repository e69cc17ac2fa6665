//! Supplier ledgers kept in a spreadsheet.
//!
//! Each supplier owns one tab. The first row of a tab is the fixed header
//! (`Date, Opening Balance, Purchases, Payments, Closing Balance, Remarks`);
//! every later row is one day's entry, in append order. Rows are never
//! updated, reordered or removed.
//!
//! - [`LedgerStoreAdapter`]: list suppliers, read the latest row or full
//!   history, register a supplier, append a row
//! - [`TabularStore`]: the storage seam, with [`GoogleSheetsStore`] and
//!   [`InMemoryTabularStore`] implementations
//! - [`balance`]: closing-balance arithmetic and continuity checks
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ledger_store::{InMemoryTabularStore, LedgerStoreAdapter, AppendRowRequest};
//!
//! # tokio_test::block_on(async {
//! let ledger = LedgerStoreAdapter::new(Arc::new(InMemoryTabularStore::new()));
//! let acme = ledger.register_supplier("Acme").await?;
//! assert!(ledger.latest_row(&acme).await?.is_none());
//!
//! let request = AppendRowRequest {
//!     date: "2024-01-01".into(),
//!     opening_balance: "1000".into(),
//!     purchase: "200".into(),
//!     payment: "50".into(),
//!     closing_balance: "1150".into(),
//!     remarks: String::new(),
//! };
//! ledger.append_row(&acme, request.into_row()).await?;
//! assert_eq!(ledger.latest_row(&acme).await?.unwrap().closing_balance, "1150");
//! # Ok::<(), ledger_store::LedgerError>(())
//! # }).unwrap();
//! ```

pub mod adapter;
pub mod auth;
pub mod balance;
pub mod config;
pub mod error;
pub mod model;
pub mod names;
pub mod schema;
pub mod sheets;
pub mod store;

pub use adapter::*;
pub use config::*;
pub use error::*;
pub use model::*;
pub use names::SupplierName;
pub use sheets::{GoogleSheetsStore, DEFAULT_API_BASE};
pub use store::*;
