//! Per-resource decode errors
//!
//! These are the recoverable error class: a failed decode of one resource
//! never prevents callers from decoding its siblings. Fatal configuration
//! errors live with the shapes crate instead.

use thiserror::Error;

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Recoverable per-resource decode errors
///
/// Each variant names the resource and predicate involved so diagnostics
/// can point at the offending statement. Enumerated/fixed-value mismatches
/// are deliberately *not* represented here: those decode to an absent
/// field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A term of the wrong shape was found where a specific kind was required
    #[error("mistyped value on {subject} / {predicate}: expected {expected}, got {actual}")]
    MistypedValue {
        subject: String,
        predicate: String,
        expected: &'static str,
        actual: String,
    },

    /// A required predicate had no (acceptable) value
    #[error("missing required value on {subject} / {predicate}")]
    MissingRequiredValue { subject: String, predicate: String },

    /// The resource does not carry the RDF type the decoder recognizes
    #[error("unexpected type on {subject}: expected {expected}")]
    UnexpectedType { subject: String, expected: String },
}
