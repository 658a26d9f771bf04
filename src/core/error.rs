use thiserror::Error;

/// Errors that can occur while assembling or loading an invoice draft.
///
/// The calculation functions themselves never fail; these errors only come
/// from the boundaries around them (builders, validation, record parsing).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// One or more input validation contracts failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Invoice record could not be read or written.
    #[error("record error: {0}")]
    Record(String),
}

/// Category of a failed input contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Value must not be negative.
    Negative,
    /// Percentage or rate outside 0–100.
    OutOfRange,
    /// Fixed amount larger than the base it applies to.
    ExceedsBase,
    /// Currency code is not a known ISO 4217 code.
    UnknownCurrency,
    /// More decimal places than the currency's minor unit allows.
    Precision,
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[2].taxes[0].tax_rate").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Which contract was violated.
    pub kind: ValidationKind,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, kind: ValidationKind) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }

    pub(crate) fn negative(field: impl Into<String>) -> Self {
        Self::new(field, "must not be negative", ValidationKind::Negative)
    }

    pub(crate) fn out_of_range(field: impl Into<String>) -> Self {
        Self::new(
            field,
            "percentage must be between 0 and 100",
            ValidationKind::OutOfRange,
        )
    }
}

/// Join a list of validation errors into one [`InvoiceError::Validation`].
pub(crate) fn join_errors(errors: &[ValidationError]) -> InvoiceError {
    let msg = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    InvoiceError::Validation(msg)
}
