//! Intermediate object model for shapegen
//!
//! Takes the resolved shape semantics from `shapegen-shapes` and
//! assembles the object model the codecs run against: concrete
//! [`ObjectType`]s with fully flattened inheritance, closed
//! [`UnionType`]s surfaced from top-level or/xone composites, everything
//! in dependency order.
//!
//! Assembly errors are the fatal [`shapegen_shapes::ShapeError`] class;
//! this crate introduces no error type of its own.

mod assemble;
mod object;

pub use assemble::{ObjectModel, DEFAULT_DISCRIMINATOR_KEY, DEFAULT_IDENTIFIER_KEY};
pub use object::{IdentifierKind, ObjectProperty, ObjectType, UnionType, UnionTypeMember};
