//! Configuration-time shape errors
//!
//! These are fatal: they indicate a programmer error in the schema and
//! abort the whole compilation. Per-instance decode errors are the
//! recoverable [`shapegen_graph_ir::DecodeError`] class instead; a decode
//! failure while reading the *shapes graph itself* is a schema defect and
//! is wrapped into this type.

use shapegen_graph_ir::DecodeError;
use thiserror::Error;

/// Result type for shape compilation
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Fatal shape configuration errors
#[derive(Debug, Error)]
pub enum ShapeError {
    /// Cycle in the inheritance graph
    #[error("inheritance cycle detected involving shape {shape}: {cycle}")]
    CircularInheritance { shape: String, cycle: String },

    /// A shape declares node kinds outside an ancestor's set
    #[error(
        "shape {shape} declares node kinds {declared} not allowed by ancestor {ancestor} ({allowed})"
    )]
    ConflictingNodeKinds {
        shape: String,
        declared: String,
        ancestor: String,
        allowed: String,
    },

    /// An extension-vocabulary value is not one of the recognized IRIs
    #[error("shape {shape}: unrecognized value {value} for {predicate}")]
    InvalidVocabularyValue {
        shape: String,
        predicate: String,
        value: String,
    },

    /// Two union members resolved to the same discriminator tag
    #[error("duplicate discriminator tag '{tag}' among members of union {union}")]
    DuplicateDiscriminator { union: String, tag: String },

    /// A shape references an identifier with no shape behind it
    #[error("shape {referrer} references unknown shape {referenced}")]
    UnknownShapeReference { referrer: String, referenced: String },

    /// The shapes graph itself failed to decode
    #[error("malformed shapes graph: {0}")]
    MalformedShape(#[from] DecodeError),
}
