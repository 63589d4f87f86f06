//! Graph codec
//!
//! `from_graph` reads one instance off a data graph: type recognition
//! unless skipped, per-field extraction along the declared path, value
//! conversion per the resolved field type. Values outside an enumerated
//! or fixed constraint are skipped, never an error; a required field with
//! nothing left raises `MissingRequiredValue`.
//!
//! `to_graph` writes one statement per present value, rdf:first/rest
//! cells for lists, fresh sub-resources for nested objects, and omits
//! values equal to the declared default. Only plain and inverse predicate
//! paths are writable; sequence and alternative paths are read-only.

use crate::error::{CodecError, Result};
use crate::mint::identifier_of;
use crate::value::{FieldValue, Instance, Value};
use shapegen_graph_ir::{DecodeError, Graph, Term};
use shapegen_model::{ObjectModel, ObjectProperty, ObjectType, UnionType};
use shapegen_shapes::{PropertyPath, PropertyType, PropertyTypeKind};
use shapegen_vocab::rdf;
use uuid::Uuid;

/// Decode one instance from a graph resource
///
/// With `check_type` set, a type recognized via `gen:fromRdfType` (or the
/// shape's own IRI) must be declared on the subject.
pub fn from_graph(
    model: &ObjectModel,
    ty: &ObjectType,
    graph: &Graph,
    subject: &Term,
    check_type: bool,
) -> Result<Instance> {
    crate::ensure_feature(ty, shapegen_shapes::Feature::Graph)?;
    if check_type {
        if let Some(expected) = &ty.from_rdf_type {
            let declared = graph
                .objects_of(subject, rdf::TYPE)
                .any(|t| t.as_iri() == Some(expected.as_str()));
            if !declared {
                return Err(CodecError::Decode(DecodeError::UnexpectedType {
                    subject: subject.to_string(),
                    expected: expected.clone(),
                }));
            }
        }
    }

    let mut instance = Instance::with_id(&ty.name, subject.clone());
    for prop in &ty.properties {
        let field = decode_field(model, graph, subject, prop)?;
        match field {
            FieldValue::Absent => {
                if prop.ty.cardinality.requires_value() {
                    return Err(CodecError::Decode(DecodeError::MissingRequiredValue {
                        subject: subject.to_string(),
                        predicate: prop.path.to_sparql(),
                    }));
                }
            }
            FieldValue::One(v) => instance.set(prop.name.clone(), v),
            FieldValue::Many(vs) => instance.set_many(prop.name.clone(), vs),
        }
    }
    Ok(instance)
}

/// Decode a union subject by trying members in declaration order
///
/// The first member that accepts wins; when none does, the last member's
/// error propagates inside the report.
pub fn union_from_graph(
    model: &ObjectModel,
    union: &UnionType,
    graph: &Graph,
    subject: &Term,
) -> Result<Instance> {
    let mut last: Option<CodecError> = None;
    for member in &union.members {
        let Some(ty) = model.object_type_for_shape(&member.shape_id) else {
            last = Some(CodecError::UnknownObjectType {
                name: member.tag.clone(),
            });
            continue;
        };
        match from_graph(model, ty, graph, subject, true) {
            Ok(instance) => return Ok(instance),
            Err(e) => {
                tracing::debug!(member = %member.tag, error = %e, "union member rejected");
                last = Some(e);
            }
        }
    }
    Err(CodecError::NoUnionMatch {
        union: union.name.clone(),
        last: Box::new(last.unwrap_or_else(|| CodecError::UnknownObjectType {
            name: union.name.clone(),
        })),
    })
}

fn decode_field(
    model: &ObjectModel,
    graph: &Graph,
    subject: &Term,
    prop: &ObjectProperty,
) -> Result<FieldValue> {
    let terms = terms_for_path(graph, subject, &prop.path);

    let mut values = Vec::new();
    for term in &terms {
        if let Some(v) = decode_value(model, graph, &prop.ty, term)? {
            values.push(v);
        }
        // Single-valued fields take the first acceptable statement
        if !prop.ty.cardinality.is_collection() && !values.is_empty() {
            break;
        }
    }

    if values.is_empty() {
        if let Some(default) = &prop.ty.default_value {
            values.push(Value::from_term(default));
        }
    }

    Ok(if values.is_empty() {
        FieldValue::Absent
    } else if prop.ty.cardinality.is_collection() {
        FieldValue::Many(values)
    } else {
        FieldValue::One(values.remove(0))
    })
}

/// Convert one graph term per the field type; `None` means the statement
/// is not acceptable and the next one should be tried
fn decode_value(
    model: &ObjectModel,
    graph: &Graph,
    ty: &PropertyType,
    term: &Term,
) -> Result<Option<Value>> {
    if let Some(fixed) = &ty.fixed_value {
        if term != fixed {
            return Ok(None);
        }
    }
    decode_kind(model, graph, &ty.kind, term)
}

fn decode_kind(
    model: &ObjectModel,
    graph: &Graph,
    kind: &PropertyTypeKind,
    term: &Term,
) -> Result<Option<Value>> {
    match kind {
        PropertyTypeKind::Primitive(p) => {
            if !term.is_literal() {
                return Ok(None);
            }
            let raw = Value::from_term(term);
            // A mismatched datatype skips the statement
            Ok(crate::construct::coerce_primitive_lenient(p, raw))
        }
        PropertyTypeKind::LiteralTerm => {
            if term.is_literal() {
                Ok(Some(Value::from_term(term)))
            } else {
                Ok(None)
            }
        }
        PropertyTypeKind::IriTerm { enumerated } => {
            if !term.is_identifier() {
                return Ok(None);
            }
            if let Some(allowed) = enumerated {
                if !allowed.contains(term) {
                    return Ok(None);
                }
            }
            Ok(Some(Value::from_term(term)))
        }
        PropertyTypeKind::EnumValue { allowed } => {
            if allowed.contains(term) {
                Ok(Some(Value::from_term(term)))
            } else {
                Ok(None)
            }
        }
        PropertyTypeKind::ObjectReference { target, is_extern } => {
            if !term.is_identifier() {
                return Ok(None);
            }
            if *is_extern {
                return Ok(Some(Value::from_term(term)));
            }
            let nested_ty = match model.object_type_for_shape(target) {
                Some(t) => t,
                // Abstract target: recognize the concrete type from the
                // node's declared rdf:type
                None => match recognize(model, graph, term) {
                    Some(t) => t,
                    None => return Ok(Some(Value::from_term(term))),
                },
            };
            let nested = from_graph(model, nested_ty, graph, term, false)?;
            Ok(Some(Value::Object(nested)))
        }
        PropertyTypeKind::Union { members } => {
            for member in members {
                if let Some(v) = decode_kind(model, graph, &member.kind, term)? {
                    return Ok(Some(v));
                }
            }
            Ok(None)
        }
        PropertyTypeKind::List(element) => {
            let mut items = Vec::new();
            let mut cursor = term.clone();
            // Bounded walk mirrors the graph reader's list guard
            for _ in 0..10_000 {
                if cursor.as_iri() == Some(rdf::NIL) {
                    return Ok(Some(Value::List(items)));
                }
                let first = graph.objects_of(&cursor, rdf::FIRST).next().cloned();
                if let Some(first) = first {
                    if let Some(v) = decode_value(model, graph, element, &first)? {
                        items.push(v);
                    }
                }
                let rest = graph.objects_of(&cursor, rdf::REST).next().cloned();
                match rest {
                    Some(rest) => cursor = rest,
                    None => return Ok(Some(Value::List(items))),
                }
            }
            Ok(Some(Value::List(items)))
        }
    }
}

/// Find the object type declared on a node via rdf:type
fn recognize<'m>(model: &'m ObjectModel, graph: &Graph, subject: &Term) -> Option<&'m ObjectType> {
    graph
        .objects_of(subject, rdf::TYPE)
        .filter_map(Term::as_iri)
        .find_map(|iri| model.object_type_for_rdf_type(iri))
}

/// Collect candidate value terms along a property path, graph order
fn terms_for_path(graph: &Graph, subject: &Term, path: &PropertyPath) -> Vec<Term> {
    match path {
        PropertyPath::Predicate(p) => graph.objects_of(subject, p).cloned().collect(),
        PropertyPath::Inverse(inner) => match inner.as_ref() {
            PropertyPath::Predicate(p) => graph
                .iter()
                .filter(|t| t.p.as_iri() == Some(p.as_str()) && &t.o == subject)
                .map(|t| t.s.clone())
                .collect(),
            _ => Vec::new(),
        },
        PropertyPath::Sequence(steps) => {
            let mut frontier = vec![subject.clone()];
            for step in steps {
                let mut next = Vec::new();
                for node in &frontier {
                    next.extend(terms_for_path(graph, node, step));
                }
                frontier = next;
            }
            frontier
        }
        PropertyPath::Alternative(alts) => alts
            .iter()
            .flat_map(|alt| terms_for_path(graph, subject, alt))
            .collect(),
    }
}

/// Encode one instance into the graph, returning its subject term
///
/// Declared type statements are written unless `emit_types` is false.
pub fn to_graph(
    model: &ObjectModel,
    ty: &ObjectType,
    instance: &mut Instance,
    graph: &mut Graph,
    emit_types: bool,
) -> Result<Term> {
    crate::ensure_feature(ty, shapegen_shapes::Feature::Graph)?;
    let id = identifier_of(model, ty, instance)?;

    if emit_types {
        for type_iri in &ty.to_rdf_types {
            graph.add_triple(id.clone(), Term::iri(rdf::TYPE), Term::iri(type_iri));
        }
    }

    for prop in &ty.properties {
        let field = instance.get(&prop.name).clone();
        let values = field.as_slice();
        if values.is_empty() {
            continue;
        }
        // Values equal to the declared default are not written
        let default = prop.ty.default_value.as_ref().map(Value::from_term);
        let (forward, predicate) = match &prop.path {
            PropertyPath::Predicate(p) => (true, p.clone()),
            PropertyPath::Inverse(inner) => match inner.as_ref() {
                PropertyPath::Predicate(p) => (false, p.clone()),
                _ => continue,
            },
            _ => continue,
        };
        for value in values {
            if default.as_ref() == Some(value) {
                continue;
            }
            let object = encode_value(model, value, graph)?;
            if forward {
                graph.add_triple(id.clone(), Term::iri(&predicate), object);
            } else {
                graph.add_triple(object, Term::iri(&predicate), id.clone());
            }
        }
    }
    Ok(id)
}

fn encode_value(model: &ObjectModel, value: &Value, graph: &mut Graph) -> Result<Term> {
    match value {
        Value::Object(nested) => {
            let nested_ty = model.object_type(nested.type_name()).ok_or_else(|| {
                CodecError::UnknownObjectType {
                    name: nested.type_name().to_string(),
                }
            })?;
            let mut nested = nested.clone();
            to_graph(model, nested_ty, &mut nested, graph, true)
        }
        Value::List(items) => {
            if items.is_empty() {
                return Ok(Term::iri(rdf::NIL));
            }
            let head = fresh_cell();
            let mut cursor = head.clone();
            for (i, item) in items.iter().enumerate() {
                let object = encode_value(model, item, graph)?;
                graph.add_triple(cursor.clone(), Term::iri(rdf::FIRST), object);
                let rest = if i + 1 == items.len() {
                    Term::iri(rdf::NIL)
                } else {
                    fresh_cell()
                };
                graph.add_triple(cursor.clone(), Term::iri(rdf::REST), rest.clone());
                cursor = rest;
            }
            Ok(head)
        }
        other => other.to_term().ok_or_else(|| CodecError::CoercionFailed {
            object: String::new(),
            field: String::new(),
            expected: "term".to_string(),
            actual: other.to_string(),
        }),
    }
}

fn fresh_cell() -> Term {
    Term::blank(format!("gen-{}", Uuid::new_v4().simple()))
}
