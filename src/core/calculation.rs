//! Invoice totals engine.
//!
//! Every function here is pure and total over its numeric domain: inputs
//! are never rejected, out-of-range values are clamped, and nothing panics.
//! Products and sums saturate at `Decimal::MAX` / `Decimal::MIN` instead of
//! overflowing. Input validation is the caller's job (see
//! [`super::validation`]).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::*;

/// Label used when a legacy single tax rate has no label.
pub const DEFAULT_TAX_LABEL: &str = "Tax";

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `round(base * rate / 100, 2)`, saturating on overflow.
pub(crate) fn percent_of(base: Decimal, rate: Decimal) -> Decimal {
    round_half_up(base.saturating_mul(rate) / dec!(100), 2)
}

/// Sum that saturates instead of panicking.
fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Derive invoice totals from line items, document taxes and a discount.
///
/// The steps run in a fixed order:
///
/// 1. subtotal is the sum of stored line amounts
/// 2. item-level tax is the sum of stored item tax amounts
/// 3. item taxes are grouped by `(tax_name, tax_rate)` for display
/// 4. the discount is applied to the subtotal, clamped to `[0, subtotal]`
/// 5. document taxes are applied, in order, to the discounted subtotal
/// 6. total = discounted subtotal + item-level tax + document tax
///
/// Each discount and tax line is rounded to two places on its own, so the
/// sum of several lines can differ by a cent from rounding their sum.
///
/// ```
/// use invoice_engine::core::*;
/// use rust_decimal_macros::dec;
///
/// let items = vec![LineItem::new("Consulting", dec!(1), dec!(100))];
/// let taxes = vec![DocumentTax::new("VAT", dec!(20))];
/// let totals = calculate_totals(&items, &taxes, &Discount::percentage(dec!(10)));
///
/// assert_eq!(totals.subtotal_after_discount, dec!(90.00));
/// assert_eq!(totals.document_tax, dec!(18.00));
/// assert_eq!(totals.total, dec!(108.00));
/// ```
pub fn calculate_totals(
    items: &[LineItem],
    document_taxes: &[DocumentTax],
    discount: &Discount,
) -> Totals {
    let subtotal = saturating_sum(items.iter().map(|item| item.amount));

    let item_level_tax = saturating_sum(
        items
            .iter()
            .flat_map(|item| item.taxes.iter())
            .map(|tax| tax.tax_amount),
    );

    let tax_breakdown = group_item_taxes(items);

    let discount_amount = discount_amount(subtotal, discount);
    let subtotal_after_discount = subtotal.saturating_sub(discount_amount);

    let document_tax_breakdown: Vec<DocumentTaxLine> = document_taxes
        .iter()
        .map(|tax| DocumentTaxLine {
            tax_name: tax.tax_name.clone(),
            tax_rate: tax.tax_rate,
            tax_amount: percent_of(subtotal_after_discount, tax.tax_rate),
        })
        .collect();
    let document_tax = saturating_sum(document_tax_breakdown.iter().map(|t| t.tax_amount));

    let total = saturating_sum([subtotal_after_discount, item_level_tax, document_tax]);

    tracing::trace!(
        items = items.len(),
        %subtotal,
        discount = %discount_amount,
        %item_level_tax,
        %document_tax,
        %total,
        "calculated invoice totals"
    );

    Totals {
        subtotal,
        discount: discount_amount,
        subtotal_after_discount,
        item_level_tax,
        document_tax,
        tax_breakdown,
        document_tax_breakdown,
        total,
    }
}

fn discount_amount(subtotal: Decimal, discount: &Discount) -> Decimal {
    let raw = match discount.kind {
        DiscountType::Percentage => percent_of(subtotal, discount.value),
        DiscountType::Fixed => discount.value,
    };
    let clamped = raw.min(subtotal).max(Decimal::ZERO);
    if clamped != raw {
        tracing::debug!(requested = %raw, applied = %clamped, %subtotal, "discount clamped");
    }
    clamped
}

/// Group item taxes by `(tax_name, tax_rate)`, keeping first-appearance order.
fn group_item_taxes(items: &[LineItem]) -> Vec<TaxBreakdown> {
    let mut groups: Vec<TaxBreakdown> = Vec::new();

    for tax in items.iter().flat_map(|item| item.taxes.iter()) {
        match groups
            .iter_mut()
            .find(|g| g.tax_name == tax.tax_name && g.tax_rate == tax.tax_rate)
        {
            Some(group) => group.tax_amount = group.tax_amount.saturating_add(tax.tax_amount),
            None => groups.push(TaxBreakdown {
                tax_name: tax.tax_name.clone(),
                tax_rate: tax.tax_rate,
                tax_amount: tax.tax_amount,
            }),
        }
    }

    groups
}

/// Split a total into deposit and balance due.
///
/// A percentage deposit is `round(total * value / 100, 2)`; a fixed deposit
/// is clamped to `[0, total]`. Without a deposit the whole total is due.
///
/// ```
/// use invoice_engine::core::*;
/// use rust_decimal_macros::dec;
///
/// let split = calculate_deposit_amount(dec!(108), Some(&Deposit::percentage(dec!(25))));
/// assert_eq!(split.deposit_amount, dec!(27.00));
/// assert_eq!(split.balance_due, dec!(81.00));
/// ```
pub fn calculate_deposit_amount(total: Decimal, deposit: Option<&Deposit>) -> DepositSummary {
    let deposit_amount = match deposit {
        None => Decimal::ZERO,
        Some(deposit) => {
            let raw = match deposit.kind {
                DiscountType::Percentage => percent_of(total, deposit.value),
                DiscountType::Fixed => deposit.value,
            };
            let clamped = raw.min(total).max(Decimal::ZERO);
            if clamped != raw {
                tracing::debug!(requested = %raw, applied = %clamped, %total, "deposit clamped");
            }
            clamped
        }
    };

    DepositSummary {
        deposit_amount,
        balance_due: total.saturating_sub(deposit_amount).max(Decimal::ZERO),
    }
}

/// Resolve the document taxes to apply.
///
/// Older records carry a single `tax_rate`/`tax_label` pair instead of a
/// list. The pair is used only when the list is empty and the rate is
/// positive.
pub fn normalize_document_taxes(
    document_taxes: Vec<DocumentTax>,
    legacy_rate: Option<Decimal>,
    legacy_label: Option<&str>,
) -> Vec<DocumentTax> {
    if !document_taxes.is_empty() {
        return document_taxes;
    }

    match legacy_rate {
        Some(rate) if rate > Decimal::ZERO => {
            let label = legacy_label
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or(DEFAULT_TAX_LABEL);
            vec![DocumentTax::new(label, rate)]
        }
        _ => Vec::new(),
    }
}

/// Re-derive every item tax amount from the item's current amount.
///
/// Item tax amounts are trusted by [`calculate_totals`]; when an amount was
/// changed without going through the line-item editor they go stale. Call
/// this before saving. Returns the number of tax amounts that changed.
pub fn reconcile_item_taxes(items: &mut [LineItem]) -> usize {
    let mut corrected = 0;

    for (index, item) in items.iter_mut().enumerate() {
        for tax in &mut item.taxes {
            let expected = percent_of(item.amount, tax.tax_rate);
            if tax.tax_amount != expected {
                tracing::warn!(
                    item = index,
                    tax = %tax.tax_name,
                    stored = %tax.tax_amount,
                    %expected,
                    "item tax amount out of date"
                );
                tax.tax_amount = expected;
                corrected += 1;
            }
        }
    }

    corrected
}
