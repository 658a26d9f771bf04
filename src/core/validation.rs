use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::currencies;
use super::draft::InvoiceDraft;
use super::error::{ValidationError, ValidationKind};
use super::types::*;

/// Validate a complete draft before it is saved.
/// Returns all validation errors found (not just the first).
pub fn validate_draft(draft: &InvoiceDraft) -> Vec<ValidationError> {
    let mut errors = validate_currency(&draft.currency_code);

    errors.extend(validate_dates(draft.issue_date, draft.due_date));
    errors.extend(validate_line_items(&draft.items));
    errors.extend(validate_document_taxes(&draft.document_taxes));

    let totals = draft.totals();
    errors.extend(validate_discount(&draft.discount, totals.subtotal));
    errors.extend(validate_deposit(draft.deposit.as_ref(), totals.total));

    if let Some(digits) = currencies::minor_units(&draft.currency_code) {
        for (i, item) in draft.items.iter().enumerate() {
            check_precision(
                item.unit_price,
                digits,
                format!("items[{i}].unit_price"),
                &mut errors,
            );
        }
        if draft.discount.kind == DiscountType::Fixed {
            check_precision(draft.discount.value, digits, "discount.value", &mut errors);
        }
        if let Some(deposit) = draft.deposit.filter(|d| d.kind == DiscountType::Fixed) {
            check_precision(deposit.value, digits, "deposit.value", &mut errors);
        }
    }

    errors
}

/// Check that the currency code is a known ISO 4217 code.
pub fn validate_currency(code: &str) -> Vec<ValidationError> {
    if currencies::is_known_currency_code(code) {
        Vec::new()
    } else {
        vec![ValidationError::new(
            "currency_code",
            format!("currency code '{code}' is not a known ISO 4217 code"),
            ValidationKind::UnknownCurrency,
        )]
    }
}

/// The due date may not fall before the issue date. Either may be unset.
pub fn validate_dates(
    issue_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
) -> Vec<ValidationError> {
    match (issue_date, due_date) {
        (Some(issued), Some(due)) if due < issued => vec![ValidationError::new(
            "due_date",
            format!("due date {due} is before issue date {issued}"),
            ValidationKind::OutOfRange,
        )],
        _ => Vec::new(),
    }
}

/// Discount must be non-negative; percentages at most 100, fixed amounts at
/// most the subtotal.
pub fn validate_discount(discount: &Discount, subtotal: Decimal) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_adjustment(
        discount.kind,
        discount.value,
        subtotal,
        "discount.value",
        "subtotal",
        &mut errors,
    );
    errors
}

/// Deposit must be non-negative; percentages at most 100, fixed amounts at
/// most the invoice total.
pub fn validate_deposit(deposit: Option<&Deposit>, total: Decimal) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(deposit) = deposit {
        check_adjustment(
            deposit.kind,
            deposit.value,
            total,
            "deposit.value",
            "total",
            &mut errors,
        );
    }
    errors
}

/// Document tax rates must lie in 0–100.
pub fn validate_document_taxes(taxes: &[DocumentTax]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, tax) in taxes.iter().enumerate() {
        check_rate(
            tax.tax_rate,
            format!("document_taxes[{i}].tax_rate"),
            &mut errors,
        );
    }
    errors
}

/// Quantities, prices and amounts must be non-negative; item tax rates in 0–100.
pub fn validate_line_items(items: &[LineItem]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let prefix = format!("items[{i}]");

        if item.quantity < Decimal::ZERO {
            errors.push(ValidationError::negative(format!("{prefix}.quantity")));
        }
        if item.unit_price < Decimal::ZERO {
            errors.push(ValidationError::negative(format!("{prefix}.unit_price")));
        }
        if item.amount < Decimal::ZERO {
            errors.push(ValidationError::negative(format!("{prefix}.amount")));
        }

        for (j, tax) in item.taxes.iter().enumerate() {
            check_rate(
                tax.tax_rate,
                format!("{prefix}.taxes[{j}].tax_rate"),
                &mut errors,
            );
        }
    }

    errors
}

fn check_adjustment(
    kind: DiscountType,
    value: Decimal,
    base: Decimal,
    field: &str,
    base_name: &str,
    errors: &mut Vec<ValidationError>,
) {
    if value < Decimal::ZERO {
        errors.push(ValidationError::negative(field));
        return;
    }

    match kind {
        DiscountType::Percentage => {
            if value > dec!(100) {
                errors.push(ValidationError::out_of_range(field));
            }
        }
        DiscountType::Fixed => {
            if value > base {
                errors.push(ValidationError::new(
                    field,
                    format!("fixed amount {value} exceeds {base_name} {base}"),
                    ValidationKind::ExceedsBase,
                ));
            }
        }
    }
}

fn check_rate(rate: Decimal, field: String, errors: &mut Vec<ValidationError>) {
    if rate < Decimal::ZERO {
        errors.push(ValidationError::negative(field));
    } else if rate > dec!(100) {
        errors.push(ValidationError::out_of_range(field));
    }
}

fn check_precision(
    value: Decimal,
    digits: u32,
    field: impl Into<String>,
    errors: &mut Vec<ValidationError>,
) {
    if value.normalize().scale() > digits {
        errors.push(ValidationError::new(
            field,
            format!("{value} has more than {digits} decimal places"),
            ValidationKind::Precision,
        ));
    }
}
