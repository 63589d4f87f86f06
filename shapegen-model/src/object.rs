//! Intermediate object model types
//!
//! Plain data produced by assembly and consumed by the codecs. Fields are
//! flattened through the class hierarchy, so consumers never walk parents;
//! the parent reference survives for documentation only.

use shapegen_graph_ir::Term;
use shapegen_shapes::{
    DeclarationStyle, FeatureSet, MintingStrategy, NodeKindSet, PropertyPath, PropertyType,
    Visibility,
};

/// Identifier space of an object type's instances
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Always an IRI
    Iri,
    /// Blank label or IRI
    BlankOrIri,
}

impl IdentifierKind {
    /// Collapse a resolved node-kind set
    pub fn from_node_kinds(kinds: NodeKindSet) -> Self {
        if kinds.named && !kinds.blank {
            IdentifierKind::Iri
        } else {
            IdentifierKind::BlankOrIri
        }
    }
}

/// One field of an object type
#[derive(Clone, Debug)]
pub struct ObjectProperty {
    /// Canonical field name
    pub name: String,
    /// Predicate path in the data graph
    pub path: PropertyPath,
    /// Resolved value type
    pub ty: PropertyType,
    pub visibility: Visibility,
    pub mutable: bool,
    /// sh:name display label
    pub label: Option<String>,
    /// sh:description display text
    pub description: Option<String>,
    /// sh:order display position
    pub display_order: Option<i64>,
    /// sh:group reference
    pub group: Option<Term>,
}

impl ObjectProperty {
    /// Whether a statically known fallback value exists
    pub fn has_default(&self) -> bool {
        self.ty.default_value.is_some()
    }
}

/// One concrete object type of the model
#[derive(Clone, Debug)]
pub struct ObjectType {
    /// Canonical object name
    pub name: String,
    /// The node shape this type was assembled from
    pub shape_id: Term,
    /// Discriminator tag value written under the model's discriminator key
    pub discriminator: String,
    /// Nearest parent shape, for documentation; fields are already
    /// flattened below
    pub parent: Option<Term>,
    /// Fields in canonical order: parent fields first, own fields after,
    /// declaration order within each level
    pub properties: Vec<ObjectProperty>,
    pub identifier_kind: IdentifierKind,
    pub minting: MintingStrategy,
    /// Type IRI recognized on decode, absent for structural shapes
    pub from_rdf_type: Option<String>,
    /// Type IRIs emitted on encode, in order
    pub to_rdf_types: Vec<String>,
    /// Selected codec capabilities
    pub features: FeatureSet,
    /// Ontology-level class/interface hint, passed through to emitters
    pub declaration_style: DeclarationStyle,
    pub mutable: bool,
    pub labels: Vec<String>,
    pub comments: Vec<String>,
}

impl ObjectType {
    /// Field lookup by canonical name
    pub fn property(&self, name: &str) -> Option<&ObjectProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Field lookup by plain predicate IRI
    pub fn property_for_predicate(&self, iri: &str) -> Option<&ObjectProperty> {
        self.properties
            .iter()
            .find(|p| p.path.as_predicate() == Some(iri))
    }
}

/// One alternative of a closed union
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionTypeMember {
    /// Discriminator tag value selecting this member
    pub tag: String,
    /// The member object type's shape
    pub shape_id: Term,
}

/// A closed tagged union surfaced from a top-level or/xone composite
///
/// Member order is declaration order and is the decode and equality
/// priority.
#[derive(Clone, Debug)]
pub struct UnionType {
    pub name: String,
    pub shape_id: Term,
    /// JSON key carrying the member tag
    pub discriminator_key: String,
    pub members: Vec<UnionTypeMember>,
}

impl UnionType {
    /// Member lookup by discriminator tag
    pub fn member(&self, tag: &str) -> Option<&UnionTypeMember> {
        self.members.iter().find(|m| m.tag == tag)
    }
}
