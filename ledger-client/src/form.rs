//! State of the daily entry form for one supplier.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use ledger_store::balance::{derive_closing, format_amount, parse_amount, parse_amount_strict};
use ledger_store::AppendRowRequest;

use crate::api::LedgerApi;
use crate::error::ClientResult;
use crate::opening::KnownOpeningBalances;

/// Text fields of a new ledger entry.
///
/// Closing balance follows `opening + purchase - payment` whenever one of
/// those three changes, but may be overwritten by hand afterwards. Unreadable
/// amounts count as zero in that sum. A sum too large to represent leaves the
/// closing balance blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    supplier: String,
    opening: String,
    purchase: String,
    payment: String,
    closing: String,
    remarks: String,
}

impl EntryForm {
    /// A blank form whose opening balance is the supplier's known starting value.
    pub fn new(supplier: impl Into<String>, known: &KnownOpeningBalances) -> Self {
        let supplier = supplier.into();
        let mut form = Self {
            opening: format_amount(known.get(&supplier)),
            supplier,
            purchase: String::new(),
            payment: String::new(),
            closing: String::new(),
            remarks: String::new(),
        };
        form.recompute();
        form
    }

    /// Load the form for `supplier`: today's opening is the closing balance
    /// of the latest entry when there is one.
    pub async fn open(
        supplier: &str,
        known: &KnownOpeningBalances,
        api: &dyn LedgerApi,
    ) -> ClientResult<Self> {
        let mut form = Self::new(supplier, known);
        if let Some(latest) = api.latest_row(supplier).await? {
            form.set_opening(latest.closing_balance);
        }
        Ok(form)
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn opening(&self) -> &str {
        &self.opening
    }

    pub fn purchase(&self) -> &str {
        &self.purchase
    }

    pub fn payment(&self) -> &str {
        &self.payment
    }

    pub fn closing(&self) -> &str {
        &self.closing
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    pub fn set_opening(&mut self, text: impl Into<String>) {
        self.opening = text.into();
        self.recompute();
    }

    pub fn set_purchase(&mut self, text: impl Into<String>) {
        self.purchase = text.into();
        self.recompute();
    }

    pub fn set_payment(&mut self, text: impl Into<String>) {
        self.payment = text.into();
        self.recompute();
    }

    /// Overwrite the closing balance. Kept until one of the three inputs changes.
    pub fn set_closing(&mut self, text: impl Into<String>) {
        self.closing = text.into();
    }

    pub fn set_remarks(&mut self, text: impl Into<String>) {
        self.remarks = text.into();
    }

    /// `opening + purchase - payment` for the current inputs, `None` on overflow.
    pub fn derived_closing(&self) -> Option<Decimal> {
        derive_closing(
            parse_amount(&self.opening),
            parse_amount(&self.purchase),
            parse_amount(&self.payment),
        )
    }

    /// Whether the closing balance no longer matches the derived value.
    pub fn closing_overridden(&self) -> bool {
        match self.derived_closing() {
            Some(derived) => parse_amount_strict(&self.closing) != Some(derived),
            None => !self.closing.trim().is_empty(),
        }
    }

    fn recompute(&mut self) {
        self.closing = self.derived_closing().map(format_amount).unwrap_or_default();
    }

    /// The append body for this form, dated `date`. Text is sent as typed.
    pub fn to_request(&self, date: NaiveDate) -> AppendRowRequest {
        AppendRowRequest {
            date: date.format("%Y-%m-%d").to_string(),
            opening_balance: self.opening.clone(),
            purchase: self.purchase.clone(),
            payment: self.payment.clone(),
            closing_balance: self.closing.clone(),
            remarks: self.remarks.clone(),
        }
    }

    /// Append this entry. The form is left untouched whatever the outcome.
    pub async fn submit(
        &self,
        api: &dyn LedgerApi,
        date: NaiveDate,
    ) -> ClientResult<AppendRowRequest> {
        let request = self.to_request(date);
        api.append_row(&self.supplier, &request).await?;
        Ok(request)
    }
}

/// Today's date in UTC, the date stamped on new entries.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
