//! Running-balance arithmetic shared by the store and the entry form.

use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use crate::model::LedgerRow;

/// `opening + purchases - payments`, exact to the inputs' precision.
///
/// `None` when the result falls outside the range `Decimal` can hold.
pub fn derive_closing(
    opening: Decimal,
    purchases: Decimal,
    payments: Decimal,
) -> Option<Decimal> {
    opening.checked_add(purchases)?.checked_sub(payments)
}

/// Lenient amount parsing: blank or unreadable text counts as zero.
pub fn parse_amount(text: &str) -> Decimal {
    parse_amount_strict(text).unwrap_or(Decimal::ZERO)
}

/// Blank text is zero; anything else must be a plain decimal number.
pub fn parse_amount_strict(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(text).ok()
}

/// Render an amount without trailing zeros (`1150.00` becomes `1150`).
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Parsed amounts of a stored row, or `None` if any of them is unreadable.
pub fn row_amounts(row: &LedgerRow) -> Option<RowAmounts> {
    Some(RowAmounts {
        opening: parse_amount_strict(&row.opening_balance)?,
        purchases: parse_amount_strict(&row.purchases)?,
        payments: parse_amount_strict(&row.payments)?,
        closing: parse_amount_strict(&row.closing_balance)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAmounts {
    pub opening: Decimal,
    pub purchases: Decimal,
    pub payments: Decimal,
    pub closing: Decimal,
}

impl RowAmounts {
    pub fn derived_closing(&self) -> Option<Decimal> {
        derive_closing(self.opening, self.purchases, self.payments)
    }

    /// `None` when the derived closing overflows and cannot be compared.
    pub fn is_balanced(&self) -> Option<bool> {
        self.derived_closing().map(|derived| derived == self.closing)
    }
}

/// A break in a supplier's running balance. `row` is the zero-based position
/// among data rows (the header is not counted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContinuityIssue {
    /// Opening balance differs from the previous row's closing balance.
    OpeningMismatch {
        row: usize,
        expected: String,
        found: String,
    },
    /// Closing balance differs from opening + purchases - payments.
    ClosingMismatch {
        row: usize,
        expected: String,
        found: String,
    },
    /// One of the amounts could not be read as a number, or the derived
    /// closing is out of range.
    Unparsable { row: usize },
}

/// Walk a ledger in append order and report every continuity break.
pub fn check_continuity(rows: &[LedgerRow]) -> Vec<ContinuityIssue> {
    let mut issues = Vec::new();
    let mut previous_closing: Option<Decimal> = None;

    for (row, entry) in rows.iter().enumerate() {
        let Some((amounts, derived)) =
            row_amounts(entry).and_then(|a| a.derived_closing().map(|d| (a, d)))
        else {
            issues.push(ContinuityIssue::Unparsable { row });
            previous_closing = None;
            continue;
        };

        if let Some(expected) = previous_closing {
            if expected != amounts.opening {
                issues.push(ContinuityIssue::OpeningMismatch {
                    row,
                    expected: format_amount(expected),
                    found: entry.opening_balance.clone(),
                });
            }
        }

        if derived != amounts.closing {
            issues.push(ContinuityIssue::ClosingMismatch {
                row,
                expected: format_amount(derived),
                found: entry.closing_balance.clone(),
            });
        }

        previous_closing = Some(amounts.closing);
    }

    issues
}
