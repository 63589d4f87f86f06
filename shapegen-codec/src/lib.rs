//! Canonical runtime contract for shapegen object models
//!
//! Everything a generated object would do, executed dynamically against
//! the assembled [`shapegen_model::ObjectModel`]:
//!
//! - **construct**: coercing construction with lazy identifier minting
//! - **equals**: structural equality with path-tagged reports
//! - **hash**: canonical incremental digest feeding
//! - **JSON codec**: encode/decode with schema validation first
//! - **graph codec**: decode from and encode into an RDF graph
//! - **query patterns**: per-field SPARQL WHERE fragments
//! - **JSON Schema / UI schema**: document builders
//!
//! Every capability is independently toggleable through the shape's
//! resolved feature set; a call against a disabled capability fails with
//! [`CodecError::FeatureDisabled`].
//!
//! All orderings observable here are fixed by shape declaration order;
//! the only randomness is identifier minting.

mod construct;
mod equals;
mod error;
mod graph;
mod hash;
mod json;
mod mint;
mod query;
mod schema;
mod value;

pub use construct::construct;
pub use equals::{equals, Inequality};
pub use error::{CodecError, Result, ValidationIssue};
pub use graph::{from_graph, to_graph, union_from_graph};
pub use hash::hash_instance;
pub use json::{from_json, to_json, union_from_json};
pub use mint::{identifier_of, mint_identifier};
pub use query::{query_patterns, where_clause, QueryPattern};
pub use schema::{json_schema, ui_schema, validate};
pub use value::{FieldValue, Instance, Value};

use shapegen_model::ObjectType;
use shapegen_shapes::Feature;

/// Fail unless the shape's resolved feature set enables the capability
pub(crate) fn ensure_feature(ty: &ObjectType, feature: Feature) -> Result<()> {
    if ty.features.contains(feature) {
        Ok(())
    } else {
        Err(CodecError::FeatureDisabled {
            object: ty.name.clone(),
            feature,
        })
    }
}
