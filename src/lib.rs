//! # invoice-engine
//!
//! Invoice financial calculations: subtotal, item-level and document-level
//! tax, discount, deposit and balance due.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every tax and discount line is rounded half-up to two decimal places at
//! the point it is computed.
//!
//! ## Quick Start
//!
//! ```rust
//! use invoice_engine::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut item = LineItem::new("Consulting", dec!(2), dec!(25));
//! item.apply_tax(&TaxPreset::new("VAT", dec!(10)));
//!
//! let items = vec![item, LineItem::new("Hosting", dec!(1), dec!(50))];
//! let taxes = vec![DocumentTax::new("City tax", dec!(10))];
//! let totals = calculate_totals(&items, &taxes, &Discount::none());
//!
//! assert_eq!(totals.item_level_tax, dec!(5.00));
//! assert_eq!(totals.document_tax, dec!(10.00));
//! assert_eq!(totals.total, dec!(115.00));
//!
//! let split = calculate_deposit_amount(totals.total, Some(&Deposit::fixed(dec!(15))));
//! assert_eq!(split.balance_due, dec!(100.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, totals engine, line-item editing, validation |
//! | `json` | Invoice record API payloads (lenient JSON, legacy tax fields) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "json")]
pub mod record;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
