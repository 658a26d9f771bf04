use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient::{self, MAX_MAGNITUDE};
use crate::core::*;

/// Invoice as stored and returned by the invoice record API.
///
/// Older records carry a single `tax_rate`/`tax_label` pair instead of
/// `document_taxes`; both shapes are accepted on read, only the list is
/// written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceRecord {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub currency_code: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub items: Vec<LineItemRecord>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub document_taxes: Vec<DocumentTaxRecord>,
    #[serde(with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_label: Option<String>,
    #[serde(deserialize_with = "adjustment_type")]
    pub discount_type: Option<DiscountType>,
    #[serde(with = "lenient")]
    pub discount_value: Decimal,
    #[serde(deserialize_with = "adjustment_type")]
    pub deposit_type: Option<DepositType>,
    #[serde(with = "lenient")]
    pub deposit_value: Decimal,
}

/// Line item as sent over the wire. `price` is accepted for `unit_price`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItemRecord {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub description: String,
    #[serde(with = "lenient")]
    pub quantity: Decimal,
    #[serde(with = "lenient", alias = "price")]
    pub unit_price: Decimal,
    /// Stored line amount; derived from quantity and price when absent.
    #[serde(with = "lenient::option")]
    pub amount: Option<Decimal>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub taxes: Vec<ItemTaxRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTaxRecord {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub tax_name: String,
    #[serde(with = "lenient")]
    pub tax_rate: Decimal,
    #[serde(with = "lenient")]
    pub tax_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTaxRecord {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub tax_name: String,
    #[serde(with = "lenient")]
    pub tax_rate: Decimal,
}

/// `"percentage"`, `"fixed"`, or `null`/`""` for none.
fn adjustment_type<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DiscountType>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("percentage") => Ok(Some(DiscountType::Percentage)),
        Some("fixed") => Ok(Some(DiscountType::Fixed)),
        Some(other) => Err(serde::de::Error::unknown_variant(
            other,
            &["percentage", "fixed"],
        )),
    }
}

impl InvoiceRecord {
    /// Reject lines whose `quantity * unit_price` exceeds [`MAX_MAGNITUDE`].
    ///
    /// Each numeric field is bounded on its own when parsed; this applies
    /// the same bound to the amount a line derives from them.
    pub fn check_magnitudes(&self) -> Result<(), InvoiceError> {
        for (index, item) in self.items.iter().enumerate() {
            let within = match item.quantity.checked_mul(item.unit_price) {
                Some(derived) => derived.abs() <= MAX_MAGNITUDE,
                None => false,
            };
            if !within {
                return Err(InvoiceError::Record(format!(
                    "items[{index}]: quantity * unit_price exceeds {MAX_MAGNITUDE}"
                )));
            }
        }
        Ok(())
    }

    /// Rehydrate the editable draft.
    ///
    /// A missing `discount_type` reads as a percentage discount; a missing
    /// `deposit_type` means no deposit, whatever `deposit_value` says.
    pub fn into_draft(self) -> InvoiceDraft {
        let document_taxes = self
            .document_taxes
            .into_iter()
            .map(|t| DocumentTax::new(t.tax_name, t.tax_rate))
            .collect();

        InvoiceDraft {
            document_taxes: normalize_document_taxes(
                document_taxes,
                self.tax_rate,
                self.tax_label.as_deref(),
            ),
            currency_code: self.currency_code,
            issue_date: self.issue_date,
            due_date: self.due_date,
            items: self.items.into_iter().map(LineItemRecord::into_item).collect(),
            discount: Discount {
                kind: self.discount_type.unwrap_or(DiscountType::Percentage),
                value: self.discount_value,
            },
            deposit: self.deposit_type.map(|kind| Deposit {
                kind,
                value: self.deposit_value,
            }),
        }
    }
}

impl From<&InvoiceDraft> for InvoiceRecord {
    fn from(draft: &InvoiceDraft) -> Self {
        Self {
            currency_code: draft.currency_code.clone(),
            issue_date: draft.issue_date,
            due_date: draft.due_date,
            items: draft.items.iter().map(LineItemRecord::from).collect(),
            document_taxes: draft
                .document_taxes
                .iter()
                .map(|t| DocumentTaxRecord {
                    tax_name: t.tax_name.clone(),
                    tax_rate: t.tax_rate,
                })
                .collect(),
            tax_rate: None,
            tax_label: None,
            discount_type: Some(draft.discount.kind),
            discount_value: draft.discount.value,
            deposit_type: draft.deposit.map(|d| d.kind),
            deposit_value: draft.deposit.map_or(Decimal::ZERO, |d| d.value),
        }
    }
}

impl LineItemRecord {
    fn into_item(self) -> LineItem {
        let mut item = LineItem::new(self.description, self.quantity, self.unit_price);
        if let Some(amount) = self.amount {
            item.amount = amount;
        }
        item.taxes = self
            .taxes
            .into_iter()
            .map(|t| ItemTax {
                tax_name: t.tax_name,
                tax_rate: t.tax_rate,
                tax_amount: t.tax_amount,
            })
            .collect();
        item
    }
}

impl From<&LineItem> for LineItemRecord {
    fn from(item: &LineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            amount: Some(item.amount),
            taxes: item
                .taxes
                .iter()
                .map(|t| ItemTaxRecord {
                    tax_name: t.tax_name.clone(),
                    tax_rate: t.tax_rate,
                    tax_amount: t.tax_amount,
                })
                .collect(),
        }
    }
}
