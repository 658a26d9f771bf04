//! Line-item editing.
//!
//! All mutations that touch a line's amount re-derive its item taxes, so a
//! line edited through these methods never carries stale tax amounts.

use rust_decimal::Decimal;

use super::calculation::{percent_of, round_half_up};
use super::types::*;

impl LineItem {
    /// Create a line with `amount = round(quantity * unit_price, 2)` and no taxes.
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            amount: round_half_up(quantity.saturating_mul(unit_price), 2),
            taxes: Vec::new(),
        }
    }

    /// Line amount as derived from quantity and unit price.
    pub fn derived_amount(&self) -> Decimal {
        round_half_up(self.quantity.saturating_mul(self.unit_price), 2)
    }

    /// True when the stored amount differs from `quantity * unit_price`.
    pub fn is_amount_overridden(&self) -> bool {
        self.amount != self.derived_amount()
    }

    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = quantity;
        self.amount = self.derived_amount();
        self.recalculate_taxes();
    }

    pub fn set_unit_price(&mut self, unit_price: Decimal) {
        self.unit_price = unit_price;
        self.amount = self.derived_amount();
        self.recalculate_taxes();
    }

    /// Store a manual line amount. Quantity and unit price are left alone.
    pub fn override_amount(&mut self, amount: Decimal) {
        self.amount = amount;
        self.recalculate_taxes();
    }

    /// Add a tax to this line, replacing any existing tax with the same name.
    pub fn apply_tax(&mut self, preset: &TaxPreset) {
        let tax = ItemTax::for_amount(preset.tax_name.clone(), preset.tax_rate, self.amount);
        match self.taxes.iter_mut().find(|t| t.tax_name == preset.tax_name) {
            Some(existing) => *existing = tax,
            None => self.taxes.push(tax),
        }
    }

    /// Remove the tax with the given name. Returns whether one was removed.
    pub fn remove_tax(&mut self, tax_name: &str) -> bool {
        let before = self.taxes.len();
        self.taxes.retain(|t| t.tax_name != tax_name);
        self.taxes.len() != before
    }

    /// Re-derive every item tax amount from the stored line amount.
    pub fn recalculate_taxes(&mut self) {
        for tax in &mut self.taxes {
            tax.tax_amount = percent_of(self.amount, tax.tax_rate);
        }
    }
}

impl ItemTax {
    /// Tax of `tax_rate` percent on `amount`, rounded half-up to two places.
    pub fn for_amount(tax_name: impl Into<String>, tax_rate: Decimal, amount: Decimal) -> Self {
        Self {
            tax_name: tax_name.into(),
            tax_rate,
            tax_amount: percent_of(amount, tax_rate),
        }
    }
}

impl TaxPreset {
    pub fn to_item_tax(&self, amount: Decimal) -> ItemTax {
        ItemTax::for_amount(self.tax_name.clone(), self.tax_rate, amount)
    }
}
