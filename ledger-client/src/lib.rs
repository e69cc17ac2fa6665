//! Client side of the supplier ledger.
//!
//! - [`EntryForm`]: the day's entry for one supplier, with the closing
//!   balance derived from opening, purchase and payment
//! - [`SupplierRegistry`]: the supplier list and its add form
//! - [`LedgerApi`]: the server calls both rely on, with [`HttpLedgerApi`]
//!   as the HTTP implementation
//! - [`cli`]: the `ledger` terminal front-end

pub mod api;
pub mod cli;
pub mod error;
pub mod form;
pub mod opening;
pub mod registry;

pub use api::{HttpLedgerApi, LedgerApi, DEFAULT_API_BASE};
pub use error::*;
pub use form::{today, EntryForm};
pub use opening::KnownOpeningBalances;
pub use registry::{AddOutcome, SupplierRegistry};
