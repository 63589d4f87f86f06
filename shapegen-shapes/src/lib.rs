//! Shape graph compilation for shapegen
//!
//! This crate turns a SHACL-flavored shapes graph into resolved,
//! inheritance-aware shape semantics:
//!
//! 1. The **loader** decodes shape resources into immutable typed records
//!    (ontology, property group, node shape, property shape).
//! 2. The **index** builds the graph-wide lookup table and the class
//!    hierarchy closure (parents/children/ancestors/descendants), with
//!    cycle detection.
//! 3. **Semantic views** decorate records with derived semantics: node
//!    kinds, identifier minting, abstract/extern/mutable flags, from/to
//!    RDF types, feature selection.
//! 4. The **property type resolver** maps raw constraints to a canonical
//!    cardinality-wrapped value type.
//!
//! Everything here is configuration-time: failures are fatal
//! [`ShapeError`]s naming the offending shape, never recoverable
//! per-instance conditions.

mod error;
mod index;
mod loader;
mod semantics;
mod types;

pub use error::{Result, ShapeError};
pub use index::ShapeIndex;
pub use loader::{
    ConstraintBag, DeclarationStyle, ExtensionFields, Feature, MintingStrategy, NodeShapeRecord,
    OntologyRecord, PropertyGroupRecord, PropertyPath, PropertyShapeRecord, TermKind, Visibility,
};
pub use semantics::{local_name, FeatureSet, NodeKindSet, NodeShapeView, PropertyShapeView};
pub use types::{
    resolve_property_type, Cardinality, PrimitiveKind, PropertyType, PropertyTypeKind, UnionMember,
};
