//! Core invoice types, the totals engine, and input validation.
//!
//! All monetary values are [`rust_decimal::Decimal`]. The engine is
//! currency-agnostic and side-effect free; validation is a separate step
//! the caller runs at its own boundary.

mod calculation;
pub mod currencies;
mod draft;
mod error;
mod line_item;
mod types;
mod validation;

pub use calculation::*;
pub use draft::*;
pub use error::*;
pub use types::*;
pub use validation::*;
