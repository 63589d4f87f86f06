//! Property type resolver
//!
//! Maps a property shape's raw constraint bag into a canonical
//! cardinality-wrapped value type. Resolution precedence, most specific
//! first: sh:hasValue, sh:in, object references (sh:node / sh:class),
//! sh:datatype, sh:nodeKind term unions, sh:or / sh:xone logical unions.
//! A reference to an ordered first/rest list shape resolves to a
//! positional `List` instead of a set.

use crate::loader::{ConstraintBag, PropertyShapeRecord, TermKind};
use crate::{Result, ShapeError, ShapeIndex};
use shapegen_graph_ir::Term;
use shapegen_vocab::{rdf, xsd};

/// Nesting bound for recursive kind resolution (unions of unions, lists
/// of lists); deeper nesting is assumed to be a schema cycle.
const MAX_RESOLVE_DEPTH: usize = 32;

/// Cardinality wrapper for a resolved value type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one (minCount 1, maxCount 1)
    Required,
    /// Zero or one (maxCount 1)
    Optional,
    /// Zero or more
    Set,
    /// One or more (minCount >= 1)
    NonEmptySet,
}

impl Cardinality {
    /// Map raw count bounds; absent minCount is 0, absent maxCount is
    /// unbounded
    pub fn from_counts(min_count: Option<i64>, max_count: Option<i64>) -> Self {
        let min = min_count.unwrap_or(0);
        match max_count {
            Some(1) => {
                if min >= 1 {
                    Cardinality::Required
                } else {
                    Cardinality::Optional
                }
            }
            _ => {
                if min >= 1 {
                    Cardinality::NonEmptySet
                } else {
                    Cardinality::Set
                }
            }
        }
    }

    /// Whether the field holds multiple values
    pub fn is_collection(&self) -> bool {
        matches!(self, Cardinality::Set | Cardinality::NonEmptySet)
    }

    /// Whether decode must fail on an absent value
    pub fn requires_value(&self) -> bool {
        matches!(self, Cardinality::Required | Cardinality::NonEmptySet)
    }
}

/// Literal primitive kinds, mapped from sh:datatype
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    Double,
    String,
    DateTime,
    /// A literal with a datatype this compiler has no dedicated
    /// representation for; carried as a typed string
    Other(String),
}

impl PrimitiveKind {
    /// Map an XSD datatype IRI
    pub fn from_datatype(iri: &str) -> Self {
        match iri {
            xsd::BOOLEAN => PrimitiveKind::Boolean,
            xsd::INTEGER | xsd::LONG | xsd::INT => PrimitiveKind::Integer,
            xsd::DOUBLE | xsd::FLOAT | xsd::DECIMAL => PrimitiveKind::Double,
            xsd::STRING | xsd::ANY_URI => PrimitiveKind::String,
            xsd::DATE | xsd::DATE_TIME => PrimitiveKind::DateTime,
            other => PrimitiveKind::Other(other.to_string()),
        }
    }

    /// JSON Schema type keyword for this kind
    pub fn json_type(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Double => "number",
            PrimitiveKind::String | PrimitiveKind::DateTime | PrimitiveKind::Other(_) => "string",
        }
    }
}

/// One member of a logical union type
#[derive(Clone, Debug, PartialEq)]
pub struct UnionMember {
    /// Synthetic tag, ordered by declaration
    pub tag: String,
    pub kind: PropertyTypeKind,
}

/// Resolved base value type of a property
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyTypeKind {
    /// A literal of a known primitive kind
    Primitive(PrimitiveKind),
    /// Any literal term
    LiteralTerm,
    /// An IRI (or blank) term, optionally restricted to an enumerated set
    IriTerm { enumerated: Option<Vec<Term>> },
    /// A reference to a node shape: inline composition unless extern, in
    /// which case the value decodes to a bare identifier
    ObjectReference { target: Term, is_extern: bool },
    /// A closed enumerated set of literal values (sh:in)
    EnumValue { allowed: Vec<Term> },
    /// A tagged union of unrelated member types (sh:or / sh:xone)
    Union { members: Vec<UnionMember> },
    /// An ordered list with a single element type
    List(Box<PropertyType>),
}

/// A fully resolved property value type
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyType {
    pub cardinality: Cardinality,
    pub kind: PropertyTypeKind,
    /// sh:hasValue - the only permitted value; anything else decodes to
    /// absent
    pub fixed_value: Option<Term>,
    /// sh:defaultValue - statically known fallback; values equal to it
    /// are omitted on encode
    pub default_value: Option<Term>,
}

impl PropertyType {
    /// The enumerated value filter in effect during decode, if any
    pub fn allowed_values(&self) -> Option<Vec<Term>> {
        if let Some(fixed) = &self.fixed_value {
            return Some(vec![fixed.clone()]);
        }
        match &self.kind {
            PropertyTypeKind::IriTerm {
                enumerated: Some(values),
            } => Some(values.clone()),
            PropertyTypeKind::EnumValue { allowed } => Some(allowed.clone()),
            _ => None,
        }
    }
}

/// Resolve a property shape's raw constraints into a canonical type
pub fn resolve_property_type(
    ps: &PropertyShapeRecord,
    index: &ShapeIndex,
) -> Result<PropertyType> {
    let cardinality =
        Cardinality::from_counts(ps.constraints.min_count, ps.constraints.max_count);
    let kind = resolve_kind(&ps.identifier, &ps.constraints, index, 0)?;

    // A list-valued property has a single well-defined order; the
    // wrapper cardinality collapses to the declared optionality of the
    // list itself.
    let cardinality = match (&kind, cardinality) {
        (PropertyTypeKind::List(_), Cardinality::Set) => Cardinality::Optional,
        (PropertyTypeKind::List(_), Cardinality::NonEmptySet) => Cardinality::Required,
        (_, c) => c,
    };

    Ok(PropertyType {
        cardinality,
        kind,
        fixed_value: ps.constraints.has_value.clone(),
        default_value: ps.constraints.default_value.clone(),
    })
}

fn resolve_kind(
    owner: &Term,
    bag: &ConstraintBag,
    index: &ShapeIndex,
    depth: usize,
) -> Result<PropertyTypeKind> {
    if depth > MAX_RESOLVE_DEPTH {
        return Err(ShapeError::InvalidVocabularyValue {
            shape: owner.to_string(),
            predicate: "value type".to_string(),
            value: "cyclic type nesting".to_string(),
        });
    }

    // sh:hasValue - the type is whatever the fixed term is
    if let Some(term) = &bag.has_value {
        return Ok(match term {
            Term::Literal { datatype, .. } => {
                PropertyTypeKind::Primitive(PrimitiveKind::from_datatype(datatype.as_iri()))
            }
            _ => PropertyTypeKind::IriTerm {
                enumerated: Some(vec![term.clone()]),
            },
        });
    }

    // sh:in - closed enumerated set
    if let Some(values) = &bag.in_values {
        if values.iter().all(Term::is_identifier) {
            return Ok(PropertyTypeKind::IriTerm {
                enumerated: Some(values.clone()),
            });
        }
        return Ok(PropertyTypeKind::EnumValue {
            allowed: values.clone(),
        });
    }

    // sh:node / sh:class - object reference, inline when the target
    // shape is loaded and not extern
    if let Some(target) = reference_target(bag, index) {
        if let Some(view) = index.view(&target) {
            if view.is_list() {
                let element = resolve_list_element(&target, index, depth + 1)?;
                return Ok(PropertyTypeKind::List(Box::new(element)));
            }
            return Ok(PropertyTypeKind::ObjectReference {
                is_extern: view.is_extern(),
                target,
            });
        }
        // No shape behind the identifier: externally defined, decode to
        // a bare identifier
        return Ok(PropertyTypeKind::ObjectReference {
            target,
            is_extern: true,
        });
    }

    // sh:datatype - primitive literal
    if let Some(dt) = &bag.datatype {
        return Ok(PropertyTypeKind::Primitive(PrimitiveKind::from_datatype(dt)));
    }

    // sh:nodeKind - term union
    if !bag.node_kinds.is_empty() {
        let has_identifier = bag
            .node_kinds
            .iter()
            .any(|k| matches!(k, TermKind::BlankNode | TermKind::NamedNode));
        let has_literal = bag.node_kinds.contains(&TermKind::Literal);
        return Ok(match (has_identifier, has_literal) {
            (true, false) => PropertyTypeKind::IriTerm { enumerated: None },
            (false, true) => PropertyTypeKind::LiteralTerm,
            _ => PropertyTypeKind::Union {
                members: vec![
                    UnionMember {
                        tag: "identifier".to_string(),
                        kind: PropertyTypeKind::IriTerm { enumerated: None },
                    },
                    UnionMember {
                        tag: "literal".to_string(),
                        kind: PropertyTypeKind::LiteralTerm,
                    },
                ],
            },
        });
    }

    // sh:or / sh:xone - tagged union with members in declaration order
    let member_ids = if !bag.or.is_empty() {
        &bag.or
    } else {
        &bag.xone
    };
    if !member_ids.is_empty() {
        let mut members = Vec::with_capacity(member_ids.len());
        for (i, id) in member_ids.iter().enumerate() {
            let member_bag =
                index
                    .constraint_bag(id)
                    .ok_or_else(|| ShapeError::UnknownShapeReference {
                        referrer: owner.to_string(),
                        referenced: id.to_string(),
                    })?;
            let kind = resolve_kind(owner, member_bag, index, depth + 1)?;
            let tag = index
                .view(id)
                .map(|v| v.name())
                .unwrap_or_else(|| format!("member{}", i));
            members.push(UnionMember { tag, kind });
        }
        return Ok(PropertyTypeKind::Union { members });
    }

    // Nothing declared: any literal term
    Ok(PropertyTypeKind::LiteralTerm)
}

/// First declared reference target (sh:node wins over sh:class)
fn reference_target(bag: &ConstraintBag, index: &ShapeIndex) -> Option<Term> {
    for node_ref in &bag.node {
        if index.node_shape(node_ref).is_some() {
            return Some(node_ref.clone());
        }
    }
    for class_iri in &bag.classes {
        return Some(Term::iri(class_iri));
    }
    bag.node.first().cloned()
}

/// Element type of an ordered list shape: the type of its rdf:first
/// property
fn resolve_list_element(
    list_shape: &Term,
    index: &ShapeIndex,
    depth: usize,
) -> Result<PropertyType> {
    let record =
        index
            .node_shape(list_shape)
            .ok_or_else(|| ShapeError::UnknownShapeReference {
                referrer: list_shape.to_string(),
                referenced: list_shape.to_string(),
            })?;
    for ps_id in &record.property_shape_ids {
        if let Some(ps) = index.property_shape(ps_id) {
            if ps.path.as_predicate() == Some(rdf::FIRST) {
                let kind = resolve_kind(ps_id, &ps.constraints, index, depth)?;
                return Ok(PropertyType {
                    cardinality: Cardinality::Required,
                    kind,
                    fixed_value: ps.constraints.has_value.clone(),
                    default_value: None,
                });
            }
        }
    }
    Err(ShapeError::InvalidVocabularyValue {
        shape: list_shape.to_string(),
        predicate: shapegen_vocab::gen::LIST.to_string(),
        value: "list shape has no rdf:first property".to_string(),
    })
}
