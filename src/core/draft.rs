use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculation;
use super::error::{InvoiceError, ValidationError, join_errors};
use super::types::*;
use super::validation;

/// Upper bound on line items per invoice.
pub const MAX_ITEMS: usize = 10_000;

/// Editable state of one invoice: everything the totals depend on.
///
/// This is the explicit state object an editing form owns and passes into
/// the engine; it is serialised to the invoice record on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// ISO 4217 code. Only used for validation, never for arithmetic.
    pub currency_code: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub items: Vec<LineItem>,
    /// Applied in order to the discounted subtotal.
    pub document_taxes: Vec<DocumentTax>,
    pub discount: Discount,
    pub deposit: Option<Deposit>,
}

impl InvoiceDraft {
    /// An empty draft in the given currency.
    pub fn new(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            issue_date: None,
            due_date: None,
            items: Vec::new(),
            document_taxes: Vec::new(),
            discount: Discount::none(),
            deposit: None,
        }
    }

    pub fn totals(&self) -> Totals {
        calculation::calculate_totals(&self.items, &self.document_taxes, &self.discount)
    }

    pub fn deposit_summary(&self, total: Decimal) -> DepositSummary {
        calculation::calculate_deposit_amount(total, self.deposit.as_ref())
    }

    /// Totals and deposit split in one pass.
    pub fn summarize(&self) -> InvoiceSummary {
        let totals = self.totals();
        let deposit = self.deposit_summary(totals.total);
        InvoiceSummary { totals, deposit }
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validation::validate_draft(self)
    }

    /// Bring stale item tax amounts back in line, then validate.
    ///
    /// Returns the number of corrected item taxes, or every validation
    /// failure joined into one error.
    pub fn prepare_for_save(&mut self) -> Result<usize, InvoiceError> {
        let corrected = calculation::reconcile_item_taxes(&mut self.items);
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(join_errors(&errors));
        }
        Ok(corrected)
    }
}

/// Builder for [`InvoiceDraft`].
///
/// ```
/// use invoice_engine::core::*;
/// use rust_decimal_macros::dec;
///
/// let draft = InvoiceDraftBuilder::new("USD")
///     .add_item(LineItem::new("Design", dec!(10), dec!(85)))
///     .document_tax(DocumentTax::new("Sales tax", dec!(8.25)))
///     .discount(Discount::percentage(dec!(5)))
///     .deposit(Deposit::percentage(dec!(50)))
///     .build()
///     .unwrap();
///
/// let summary = draft.summarize();
/// assert_eq!(summary.totals.subtotal_after_discount, dec!(807.50));
/// ```
pub struct InvoiceDraftBuilder {
    currency_code: String,
    issue_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    items: Vec<LineItem>,
    document_taxes: Vec<DocumentTax>,
    discount: Discount,
    deposit: Option<Deposit>,
}

impl InvoiceDraftBuilder {
    pub fn new(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            issue_date: None,
            due_date: None,
            items: Vec::new(),
            document_taxes: Vec::new(),
            discount: Discount::none(),
            deposit: None,
        }
    }

    pub fn issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn document_tax(mut self, tax: DocumentTax) -> Self {
        self.document_taxes.push(tax);
        self
    }

    pub fn discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    pub fn deposit(mut self, deposit: Deposit) -> Self {
        self.deposit = Some(deposit);
        self
    }

    /// Build the draft and run the input contracts.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<InvoiceDraft, InvoiceError> {
        let draft = self.build_unchecked()?;

        let errors = draft.validate();
        if !errors.is_empty() {
            return Err(join_errors(&errors));
        }

        Ok(draft)
    }

    /// Build without validation, e.g. when loading stored records.
    pub fn build_unchecked(self) -> Result<InvoiceDraft, InvoiceError> {
        if self.items.len() > MAX_ITEMS {
            return Err(InvoiceError::Builder(format!(
                "invoice cannot have more than {MAX_ITEMS} line items"
            )));
        }

        Ok(InvoiceDraft {
            currency_code: self.currency_code,
            issue_date: self.issue_date,
            due_date: self.due_date,
            items: self.items,
            document_taxes: self.document_taxes,
            discount: self.discount,
            deposit: self.deposit,
        })
    }
}
