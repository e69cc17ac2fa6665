//! Error type for the edges of the supplier ledger binaries.
//!
//! Library crates keep their own `thiserror` enums. What reaches `main`
//! (bad configuration, a port that cannot be bound, a failed command) is
//! folded into [`LedgerAppError`] and logged once with [`log_error`].

pub mod types;

pub use types::*;
