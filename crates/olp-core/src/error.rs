//! Error types for prescription building.
//!
//! The derivation functions themselves never fail. Errors only come from
//! turning loose user input (format labels, free text) into a
//! [`BakeOptions`](crate::BakeOptions) record.

use thiserror::Error;

/// Result type for prescription operations.
pub type PrescriptionResult<T> = Result<T, PrescriptionError>;

/// Errors raised while assembling bake options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrescriptionError {
    /// Format label does not look like `name (.ext)`.
    #[error("malformed LUT format selection: '{label}' (expected 'name (.ext)')")]
    MalformedFormatSelection {
        /// The label that failed to parse.
        label: String,
    },

    /// Format name is not part of the catalogue.
    #[error("unknown LUT format: {name}")]
    UnknownFormat {
        /// Requested format name.
        name: String,
    },

    /// A required option is empty.
    #[error("missing required option: {field}")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },
}
