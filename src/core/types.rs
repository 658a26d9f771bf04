use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single invoice line.
///
/// `amount` is derived from `quantity * unit_price` by the line-item editor
/// but is authoritative once stored: the totals engine sums it as-is so that
/// manual overrides survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-text item description.
    pub description: String,
    /// Invoiced quantity (non-negative).
    pub quantity: Decimal,
    /// Price per unit, at currency minor-unit precision.
    pub unit_price: Decimal,
    /// Line amount, normally `round(quantity * unit_price, 2)`.
    pub amount: Decimal,
    /// Item-level taxes, applied to this line's amount only.
    pub taxes: Vec<ItemTax>,
}

/// Tax applied to one line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTax {
    pub tax_name: String,
    /// Rate in percent (0–100).
    pub tax_rate: Decimal,
    /// `round(item.amount * tax_rate / 100, 2)` at the time it was derived.
    pub tax_amount: Decimal,
}

/// Tax applied once to the whole invoice's post-discount subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTax {
    pub tax_name: String,
    /// Rate in percent (0–100).
    pub tax_rate: Decimal,
}

impl DocumentTax {
    pub fn new(tax_name: impl Into<String>, tax_rate: Decimal) -> Self {
        Self {
            tax_name: tax_name.into(),
            tax_rate,
        }
    }
}

/// Named tax from the company tax catalog.
///
/// Presets carry no behaviour of their own: once selected they become an
/// ordinary [`DocumentTax`] or [`ItemTax`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxPreset {
    pub tax_name: String,
    pub tax_rate: Decimal,
}

impl TaxPreset {
    pub fn new(tax_name: impl Into<String>, tax_rate: Decimal) -> Self {
        Self {
            tax_name: tax_name.into(),
            tax_rate,
        }
    }

    pub fn to_document_tax(&self) -> DocumentTax {
        DocumentTax::new(self.tax_name.clone(), self.tax_rate)
    }
}

/// How a discount or deposit value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Value is a percentage (0–100) of the base.
    Percentage,
    /// Value is an absolute amount.
    Fixed,
}

/// Deposit values are interpreted the same way as discounts.
pub type DepositType = DiscountType;

/// Discount on the pre-tax subtotal. Never applied to tax amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountType,
    pub value: Decimal,
}

impl Discount {
    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountType::Percentage,
            value,
        }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self {
            kind: DiscountType::Fixed,
            value,
        }
    }

    /// A zero fixed discount.
    pub fn none() -> Self {
        Self::fixed(Decimal::ZERO)
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::none()
    }
}

/// Upfront portion of the final (post-discount, post-tax) total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    #[serde(rename = "type")]
    pub kind: DepositType,
    pub value: Decimal,
}

impl Deposit {
    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountType::Percentage,
            value,
        }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self {
            kind: DiscountType::Fixed,
            value,
        }
    }
}

/// Item-level tax aggregated across all lines for one `(tax_name, tax_rate)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub tax_name: String,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
}

/// One computed document-level tax line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTaxLine {
    pub tax_name: String,
    pub tax_rate: Decimal,
    /// `round(subtotal_after_discount * tax_rate / 100, 2)`.
    pub tax_amount: Decimal,
}

/// Result of [`calculate_totals`](super::calculate_totals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of stored line amounts.
    pub subtotal: Decimal,
    /// Discount actually applied, clamped to `[0, subtotal]`.
    pub discount: Decimal,
    /// `subtotal - discount`.
    pub subtotal_after_discount: Decimal,
    /// Sum of stored item tax amounts.
    pub item_level_tax: Decimal,
    /// Sum of the document tax lines.
    pub document_tax: Decimal,
    /// Item taxes grouped by name and rate, in order of first appearance.
    pub tax_breakdown: Vec<TaxBreakdown>,
    /// Document taxes in input order.
    pub document_tax_breakdown: Vec<DocumentTaxLine>,
    /// `subtotal_after_discount + item_level_tax + document_tax`.
    pub total: Decimal,
}

/// Result of [`calculate_deposit_amount`](super::calculate_deposit_amount).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepositSummary {
    pub deposit_amount: Decimal,
    /// `max(0, total - deposit_amount)`.
    pub balance_due: Decimal,
}

/// Totals together with the deposit split, as shown on the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub totals: Totals,
    pub deposit: DepositSummary,
}
