//! Error types for attribute value coercion.

use thiserror::Error;

/// Errors from coercing an attribute payload to a concrete type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Text payload does not parse as a number.
    #[error("cannot read '{text}' as a number")]
    NotNumeric { text: String },

    /// Text payload does not parse as a boolean.
    #[error("cannot read '{text}' as a boolean")]
    NotBoolean { text: String },
}
