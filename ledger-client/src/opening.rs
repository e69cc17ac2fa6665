use rust_decimal::Decimal;
use std::collections::HashMap;

/// Starting balances for suppliers whose ledgers predate this system.
///
/// Only used when a supplier has no entries yet; any other name starts at zero.
#[derive(Debug, Clone)]
pub struct KnownOpeningBalances {
    balances: HashMap<String, Decimal>,
}

impl KnownOpeningBalances {
    pub fn empty() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    pub fn with(mut self, supplier: impl Into<String>, balance: Decimal) -> Self {
        self.balances.insert(supplier.into(), balance);
        self
    }

    pub fn get(&self, supplier: &str) -> Decimal {
        self.balances.get(supplier).copied().unwrap_or(Decimal::ZERO)
    }
}

impl Default for KnownOpeningBalances {
    fn default() -> Self {
        Self::empty()
            .with("Supplier A", Decimal::from(1200))
            .with("Supplier B", Decimal::from(1800))
            .with("Supplier C", Decimal::from(1700))
    }
}
