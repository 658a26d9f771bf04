use invoice_engine::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(amount: Decimal) -> LineItem {
    LineItem::new("Item", dec!(1), amount)
}

fn taxed_item(amount: Decimal, name: &str, rate: Decimal, tax_amount: Decimal) -> LineItem {
    let mut line = item(amount);
    line.taxes.push(ItemTax {
        tax_name: name.into(),
        tax_rate: rate,
        tax_amount,
    });
    line
}

// --- Subtotal & empty invoices ---

#[test]
fn zero_items_yield_zero_totals() {
    let totals = calculate_totals(&[], &[], &Discount::none());

    assert_eq!(totals.subtotal, dec!(0));
    assert_eq!(totals.discount, dec!(0));
    assert_eq!(totals.item_level_tax, dec!(0));
    assert_eq!(totals.document_tax, dec!(0));
    assert_eq!(totals.total, dec!(0));
    assert!(totals.tax_breakdown.is_empty());
    assert!(totals.document_tax_breakdown.is_empty());
}

#[test]
fn zero_items_with_document_tax_still_zero() {
    let taxes = vec![DocumentTax::new("VAT", dec!(20))];
    let totals = calculate_totals(&[], &taxes, &Discount::percentage(dec!(10)));

    assert_eq!(totals.total, dec!(0));
    assert_eq!(totals.document_tax_breakdown.len(), 1);
    assert_eq!(totals.document_tax_breakdown[0].tax_amount, dec!(0));
}

#[test]
fn subtotal_uses_stored_amount_not_quantity_times_price() {
    let mut line = LineItem::new("Retainer", dec!(10), dec!(100));
    line.amount = dec!(750);

    let totals = calculate_totals(&[line], &[], &Discount::none());
    assert_eq!(totals.subtotal, dec!(750));
    assert_eq!(totals.total, dec!(750));
}

// --- Discount ---

#[test]
fn percentage_discount_exact() {
    let totals = calculate_totals(&[item(dec!(100))], &[], &Discount::percentage(dec!(10)));

    assert_eq!(totals.discount, dec!(10.00));
    assert_eq!(totals.subtotal_after_discount, dec!(90.00));
}

#[test]
fn percentage_discount_rounds_half_up() {
    // 33.33 * 15% = 4.9995
    let totals = calculate_totals(&[item(dec!(33.33))], &[], &Discount::percentage(dec!(15)));
    assert_eq!(totals.discount, dec!(5.00));
    assert_eq!(totals.subtotal_after_discount, dec!(28.33));
}

#[test]
fn fixed_discount_clamped_to_subtotal() {
    let totals = calculate_totals(&[item(dec!(40))], &[], &Discount::fixed(dec!(55)));

    assert_eq!(totals.discount, dec!(40));
    assert_eq!(totals.subtotal_after_discount, dec!(0));
    assert_eq!(totals.total, dec!(0));
}

#[test]
fn percentage_over_hundred_clamped_to_subtotal() {
    let totals = calculate_totals(&[item(dec!(80))], &[], &Discount::percentage(dec!(150)));
    assert_eq!(totals.discount, dec!(80));
    assert_eq!(totals.subtotal_after_discount, dec!(0));
}

#[test]
fn discount_never_reduces_item_tax() {
    let items = vec![taxed_item(dec!(100), "VAT", dec!(20), dec!(20))];
    let totals = calculate_totals(&items, &[], &Discount::fixed(dec!(100)));

    assert_eq!(totals.subtotal_after_discount, dec!(0));
    assert_eq!(totals.item_level_tax, dec!(20));
    assert_eq!(totals.total, dec!(20));
}

// --- Document taxes ---

#[test]
fn document_tax_applies_after_discount() {
    let taxes = vec![DocumentTax::new("VAT", dec!(20))];
    let totals = calculate_totals(&[item(dec!(100))], &taxes, &Discount::percentage(dec!(10)));

    assert_eq!(totals.document_tax, dec!(18.00));
    assert_eq!(totals.total, dec!(108.00));
}

#[test]
fn item_and_document_tax_are_additive() {
    let items = vec![
        taxed_item(dec!(50), "VAT", dec!(10), dec!(5)),
        item(dec!(50)),
    ];
    let taxes = vec![DocumentTax::new("Sales tax", dec!(10))];
    let totals = calculate_totals(&items, &taxes, &Discount::fixed(dec!(0)));

    assert_eq!(totals.item_level_tax, dec!(5.00));
    assert_eq!(totals.document_tax, dec!(10.00));
    assert_eq!(totals.total, dec!(115.00));
}

#[test]
fn document_taxes_keep_input_order() {
    let taxes = vec![
        DocumentTax::new("State", dec!(6)),
        DocumentTax::new("County", dec!(1.5)),
        DocumentTax::new("City", dec!(0.5)),
    ];
    let totals = calculate_totals(&[item(dec!(200))], &taxes, &Discount::none());

    let names: Vec<&str> = totals
        .document_tax_breakdown
        .iter()
        .map(|t| t.tax_name.as_str())
        .collect();
    assert_eq!(names, ["State", "County", "City"]);
    assert_eq!(totals.document_tax_breakdown[0].tax_amount, dec!(12.00));
    assert_eq!(totals.document_tax_breakdown[1].tax_amount, dec!(3.00));
    assert_eq!(totals.document_tax_breakdown[2].tax_amount, dec!(1.00));
    assert_eq!(totals.document_tax, dec!(16.00));
}

#[test]
fn each_document_tax_line_rounded_independently() {
    // 10.10 * 2.5% = 0.2525 → 0.25 per line, but 10.10 * 5% = 0.505 → 0.51
    let taxes = vec![
        DocumentTax::new("A", dec!(2.5)),
        DocumentTax::new("B", dec!(2.5)),
    ];
    let totals = calculate_totals(&[item(dec!(10.10))], &taxes, &Discount::none());

    assert_eq!(totals.document_tax_breakdown[0].tax_amount, dec!(0.25));
    assert_eq!(totals.document_tax_breakdown[1].tax_amount, dec!(0.25));
    assert_eq!(totals.document_tax, dec!(0.50));
    assert_ne!(totals.document_tax, round_half_up(dec!(10.10) * dec!(5) / dec!(100), 2));
    assert_eq!(totals.total, dec!(10.60));
}

#[test]
fn zero_rate_document_tax_is_listed() {
    let taxes = vec![DocumentTax::new("Exempt", dec!(0))];
    let totals = calculate_totals(&[item(dec!(100))], &taxes, &Discount::none());

    assert_eq!(totals.document_tax_breakdown.len(), 1);
    assert_eq!(totals.document_tax, dec!(0));
}

// --- Item tax breakdown ---

#[test]
fn item_taxes_grouped_by_name_and_rate() {
    let items = vec![
        taxed_item(dec!(25), "VAT", dec!(20), dec!(5)),
        taxed_item(dec!(35), "VAT", dec!(20), dec!(7)),
    ];
    let totals = calculate_totals(&items, &[], &Discount::none());

    assert_eq!(
        totals.tax_breakdown,
        vec![TaxBreakdown {
            tax_name: "VAT".into(),
            tax_rate: dec!(20),
            tax_amount: dec!(12.00),
        }]
    );
}

#[test]
fn stored_item_tax_amounts_are_trusted() {
    // Stale amount: 10% of 100 would be 10, but 4 is stored.
    let items = vec![taxed_item(dec!(100), "VAT", dec!(10), dec!(4))];
    let totals = calculate_totals(&items, &[], &Discount::none());

    assert_eq!(totals.item_level_tax, dec!(4));
    assert_eq!(totals.total, dec!(104));
}

#[test]
fn reconcile_fixes_stale_item_taxes() {
    let mut items = vec![
        taxed_item(dec!(100), "VAT", dec!(10), dec!(4)),
        taxed_item(dec!(50), "VAT", dec!(10), dec!(5)),
    ];

    assert_eq!(reconcile_item_taxes(&mut items), 1);
    assert_eq!(items[0].taxes[0].tax_amount, dec!(10.00));

    let totals = calculate_totals(&items, &[], &Discount::none());
    assert_eq!(totals.item_level_tax, dec!(15.00));
    assert_eq!(reconcile_item_taxes(&mut items), 0);
}

// --- Deposit ---

#[test]
fn percentage_deposit_on_total() {
    let split = calculate_deposit_amount(dec!(108), Some(&Deposit::percentage(dec!(25))));
    assert_eq!(split.deposit_amount, dec!(27.00));
    assert_eq!(split.balance_due, dec!(81.00));
}

#[test]
fn fixed_deposit_clamped_to_total() {
    let split = calculate_deposit_amount(dec!(50), Some(&Deposit::fixed(dec!(75))));
    assert_eq!(split.deposit_amount, dec!(50.00));
    assert_eq!(split.balance_due, dec!(0.00));
}

#[test]
fn negative_fixed_deposit_clamped_to_zero() {
    let split = calculate_deposit_amount(dec!(50), Some(&Deposit::fixed(dec!(-10))));
    assert_eq!(split.deposit_amount, dec!(0));
    assert_eq!(split.balance_due, dec!(50));
}

#[test]
fn no_deposit_leaves_full_balance() {
    let split = calculate_deposit_amount(dec!(99.99), None);
    assert_eq!(split.deposit_amount, dec!(0));
    assert_eq!(split.balance_due, dec!(99.99));
}

#[test]
fn deposit_uses_post_tax_total() {
    let draft = InvoiceDraftBuilder::new("EUR")
        .add_item(item(dec!(100)))
        .document_tax(DocumentTax::new("VAT", dec!(20)))
        .discount(Discount::percentage(dec!(10)))
        .deposit(Deposit::percentage(dec!(25)))
        .build()
        .unwrap();

    let summary = draft.summarize();
    assert_eq!(summary.totals.total, dec!(108.00));
    assert_eq!(summary.deposit.deposit_amount, dec!(27.00));
    assert_eq!(summary.deposit.balance_due, dec!(81.00));
}

// --- Purity ---

#[test]
fn identical_inputs_give_identical_output() {
    let items = vec![
        taxed_item(dec!(19.99), "VAT", dec!(20), dec!(4.00)),
        taxed_item(dec!(5.01), "GST", dec!(5), dec!(0.25)),
    ];
    let taxes = vec![DocumentTax::new("City", dec!(1.25))];
    let discount = Discount::percentage(dec!(7.5));

    let first = calculate_totals(&items, &taxes, &discount);
    let second = calculate_totals(&items, &taxes, &discount);
    assert_eq!(first, second);
}

// --- Rendered summary ---

#[test]
fn full_invoice_summary() {
    let vat = TaxPreset::new("VAT", dec!(20));
    let eco = TaxPreset::new("Eco", dec!(2));

    let mut a = LineItem::new("Widget", dec!(3), dec!(19.99));
    a.apply_tax(&vat);
    let mut b = LineItem::new("Gadget", dec!(2), dec!(12.50));
    b.apply_tax(&vat);
    b.apply_tax(&eco);
    let c = LineItem::new("Shipping", dec!(1), dec!(15.03));

    let draft = InvoiceDraftBuilder::new("USD")
        .add_item(a)
        .add_item(b)
        .add_item(c)
        .document_tax(TaxPreset::new("State", dec!(6.25)).to_document_tax())
        .document_tax(DocumentTax::new("City", dec!(1.5)))
        .discount(Discount::percentage(dec!(10)))
        .deposit(Deposit::percentage(dec!(30)))
        .build()
        .unwrap();

    let summary = draft.summarize();
    let totals = &summary.totals;

    let mut lines = vec![
        format!("subtotal {:.2}", totals.subtotal),
        format!("discount {:.2}", totals.discount),
        format!("after discount {:.2}", totals.subtotal_after_discount),
    ];
    for tax in &totals.tax_breakdown {
        lines.push(format!("{} ({}%) {:.2}", tax.tax_name, tax.tax_rate, tax.tax_amount));
    }
    for tax in &totals.document_tax_breakdown {
        lines.push(format!("{} ({}%) {:.2}", tax.tax_name, tax.tax_rate, tax.tax_amount));
    }
    lines.push(format!("total {:.2}", totals.total));
    lines.push(format!("deposit {:.2}", summary.deposit.deposit_amount));
    lines.push(format!("balance due {:.2}", summary.deposit.balance_due));

    insta::assert_snapshot!(lines.join("\n"), @r"
    subtotal 100.00
    discount 10.00
    after discount 90.00
    VAT (20%) 16.99
    Eco (2%) 0.50
    State (6.25%) 5.63
    City (1.5%) 1.35
    total 114.47
    deposit 34.34
    balance due 80.13
    ");
}

// --- Overflow ---

#[test]
fn oversized_inputs_saturate_instead_of_panicking() {
    let trillion = dec!(1_000_000_000_000);
    let mut line = LineItem::new("Bulk", trillion, trillion);
    line.apply_tax(&TaxPreset::new("Duty", trillion));
    let items = vec![line.clone(), line];
    let taxes = vec![DocumentTax::new("Levy", trillion)];

    let totals = calculate_totals(&items, &taxes, &Discount::none());
    let capped_tax = round_half_up(Decimal::MAX / dec!(100), 2);
    assert_eq!(totals.subtotal, dec!(2_000_000_000_000_000_000_000_000));
    assert_eq!(totals.document_tax_breakdown[0].tax_amount, capped_tax);
    assert!(totals.total > totals.subtotal);

    let discounted = calculate_totals(&items, &taxes, &Discount::percentage(trillion));
    assert_eq!(discounted.discount, discounted.subtotal);
    assert_eq!(discounted.subtotal_after_discount, dec!(0));

    let split = calculate_deposit_amount(totals.total, Some(&Deposit::percentage(trillion)));
    assert_eq!(split.deposit_amount, capped_tax);
    assert!(split.balance_due > dec!(0));
}

#[test]
fn subtotal_saturates_at_decimal_max() {
    let mut line = item(dec!(0));
    line.amount = Decimal::MAX;

    let totals = calculate_totals(&[line.clone(), line], &[], &Discount::none());
    assert_eq!(totals.subtotal, Decimal::MAX);
    assert_eq!(totals.total, Decimal::MAX);
}
