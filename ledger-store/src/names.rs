//! Supplier names double as display label, route segment and tab title.
//! All escaping for those uses lives here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

/// Validated supplier name, also the storage key of the supplier's tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierName(String);

impl SupplierName {
    /// Parse a name supplied for registration. Surrounding whitespace is
    /// dropped; a blank name is rejected.
    pub fn parse(raw: &str) -> LedgerResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::NameRequired);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Accept a name taken from a route segment. The segment is used as-is so
    /// that tabs created outside this system stay addressable.
    pub fn from_route(raw: &str) -> LedgerResult<Self> {
        if raw.trim().is_empty() {
            return Err(LedgerError::NameRequired);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tab title quoted for A1 notation: `'Acme'`, `'Bob''s'`.
    pub fn a1_range(&self) -> String {
        format!("'{}'", self.0.replace('\'', "''"))
    }
}

impl fmt::Display for SupplierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SupplierName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Percent-encode a raw supplier name for a route such as `/supplier/:name`.
pub fn url_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Percent-encode an A1 range for the Sheets REST path.
pub fn encode_range(range: &str) -> String {
    urlencoding::encode(range).into_owned()
}
