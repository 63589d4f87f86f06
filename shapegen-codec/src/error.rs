//! Runtime codec errors
//!
//! These are the recoverable per-instance class: a bad input value, a
//! JSON document that fails schema validation, a graph resource missing a
//! required statement. Shape configuration problems never surface here;
//! they are fatal [`shapegen_shapes::ShapeError`]s raised long before any
//! instance exists.

use shapegen_graph_ir::DecodeError;
use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// One structured JSON validation failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON pointer to the offending value
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Recoverable per-instance codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    /// The model has no object type under the requested name or tag
    #[error("unknown object type '{name}'")]
    UnknownObjectType { name: String },

    /// An input named a field the object type does not declare
    #[error("object '{object}' has no field '{field}'")]
    UnknownField { object: String, field: String },

    /// An input value could not be coerced to the declared field type
    #[error("field '{object}.{field}': cannot coerce {actual} to {expected}")]
    CoercionFailed {
        object: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// A required field had no value at construction
    #[error("field '{object}.{field}' is required")]
    MissingField { object: String, field: String },

    /// The object type's minting strategy cannot produce an identifier
    /// and none was supplied
    #[error("object '{object}' requires an explicit identifier")]
    IdentifierRequired { object: String },

    /// A JSON document failed validation against the generated schema
    #[error("JSON validation failed for '{object}': {}", issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    JsonValidation {
        object: String,
        issues: Vec<ValidationIssue>,
    },

    /// The capability is excluded by the shape's resolved feature set
    #[error("object '{object}' does not enable the {feature:?} capability")]
    FeatureDisabled {
        object: String,
        feature: shapegen_shapes::Feature,
    },

    /// No union member accepted the input; carries the last member's error
    #[error("no member of union '{union}' matched: {last}")]
    NoUnionMatch {
        union: String,
        #[source]
        last: Box<CodecError>,
    },

    /// Graph-level decode failure
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
