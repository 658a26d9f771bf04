use chrono::NaiveDate;
use invoice_engine::core::*;
use rust_decimal_macros::dec;

fn main() {
    let vat = TaxPreset::new("VAT", dec!(20));

    let mut design = LineItem::new("Logo design", dec!(12), dec!(85));
    design.apply_tax(&vat);
    let mut hosting = LineItem::new("Hosting (monthly)", dec!(3), dec!(19.99));
    hosting.apply_tax(&vat);
    let mut retainer = LineItem::new("Support retainer", dec!(10), dec!(100));
    retainer.override_amount(dec!(900));

    let draft = InvoiceDraftBuilder::new("USD")
        .issue_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        .add_item(design)
        .add_item(hosting)
        .add_item(retainer)
        .document_tax(DocumentTax::new("State", dec!(6.25)))
        .document_tax(DocumentTax::new("City", dec!(1.5)))
        .discount(Discount::percentage(dec!(10)))
        .deposit(Deposit::fixed(dec!(500)))
        .build()
        .expect("draft should be valid");

    let summary = draft.summarize();
    let totals = &summary.totals;
    let currency = &draft.currency_code;

    if let Some(issued) = draft.issue_date {
        println!("Issued:   {issued}");
    }
    if let Some(due) = draft.due_date {
        println!("Due:      {due}");
    }
    println!("---");
    for item in &draft.items {
        let marker = if item.is_amount_overridden() { " (manual)" } else { "" };
        println!(
            "  {} x {} @ {} = {}{}",
            item.quantity, item.description, item.unit_price, item.amount, marker
        );
    }
    println!("---");
    println!("Subtotal: {} {currency}", totals.subtotal);
    println!("Discount: -{} {currency}", totals.discount);
    println!("After:    {} {currency}", totals.subtotal_after_discount);
    for group in &totals.tax_breakdown {
        println!("  {} ({}%): {} {currency}", group.tax_name, group.tax_rate, group.tax_amount);
    }
    for line in &totals.document_tax_breakdown {
        println!("  {} ({}%): {} {currency}", line.tax_name, line.tax_rate, line.tax_amount);
    }
    println!("Total:    {} {currency}", totals.total);
    println!("Deposit:  {} {currency}", summary.deposit.deposit_amount);
    println!("Balance:  {} {currency}", summary.deposit.balance_due);
}
