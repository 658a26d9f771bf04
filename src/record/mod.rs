//! Invoice record API payloads.
//!
//! Reads and writes the JSON shape the invoice API stores, and converts it
//! to and from [`InvoiceDraft`](crate::core::InvoiceDraft).
//!
//! # Example
//!
//! ```
//! use invoice_engine::record;
//! use rust_decimal_macros::dec;
//!
//! let json = r#"{
//!     "currency_code": "USD",
//!     "items": [{ "description": "Logo", "quantity": "1", "price": "100" }],
//!     "tax_rate": 20,
//!     "tax_label": "VAT",
//!     "discount_type": "percentage",
//!     "discount_value": "10"
//! }"#;
//!
//! let draft = record::from_json(json).unwrap().into_draft();
//! assert_eq!(draft.totals().total, dec!(108.00));
//! ```

mod lenient;
mod wire;

pub use lenient::MAX_MAGNITUDE;
pub use wire::{DocumentTaxRecord, InvoiceRecord, ItemTaxRecord, LineItemRecord};

use crate::core::{InvoiceDraft, InvoiceError};

/// Parse an invoice record from JSON.
///
/// Fails on malformed JSON, non-numeric strings in numeric fields, and
/// values (or derived line amounts) beyond [`MAX_MAGNITUDE`].
pub fn from_json(json: &str) -> Result<InvoiceRecord, InvoiceError> {
    let record: InvoiceRecord =
        serde_json::from_str(json).map_err(|e| InvoiceError::Record(e.to_string()))?;
    record.check_magnitudes()?;
    Ok(record)
}

/// Serialize an invoice record to JSON.
pub fn to_json(record: &InvoiceRecord) -> Result<String, InvoiceError> {
    serde_json::to_string(record).map_err(|e| InvoiceError::Record(e.to_string()))
}

/// Load a draft straight from a JSON record.
pub fn draft_from_json(json: &str) -> Result<InvoiceDraft, InvoiceError> {
    Ok(from_json(json)?.into_draft())
}

/// Save a draft as a JSON record.
pub fn draft_to_json(draft: &InvoiceDraft) -> Result<String, InvoiceError> {
    to_json(&InvoiceRecord::from(draft))
}
