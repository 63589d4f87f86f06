//! Instance construction
//!
//! Builds an instance from named inputs, coercing convertible values to
//! the declared field types: numeric widening, lexical parses into
//! primitives, strings into IRI references, single values into
//! collections. Absent fields fall back to their declared default;
//! required fields without a value or default fail.
//!
//! Identifiers are not minted here; minting is lazy, on first identifier
//! read.

use crate::error::{CodecError, Result};
use crate::value::{Instance, Value};
use chrono::{DateTime, Utc};
use shapegen_graph_ir::Term;
use shapegen_model::{ObjectModel, ObjectProperty, ObjectType};
use shapegen_shapes::{PrimitiveKind, PropertyTypeKind};

/// Construct an instance of a named object type from labeled inputs
///
/// An input under the model's identifier key becomes the explicit
/// identifier instead of a field.
pub fn construct(
    model: &ObjectModel,
    type_name: &str,
    inputs: Vec<(String, Value)>,
) -> Result<Instance> {
    let ty = model
        .object_type(type_name)
        .ok_or_else(|| CodecError::UnknownObjectType {
            name: type_name.to_string(),
        })?;
    crate::ensure_feature(ty, shapegen_shapes::Feature::Construct)?;

    let mut instance = Instance::new(&ty.name);
    for (name, value) in inputs {
        if name == model.identifier_key() {
            instance.set_id(identifier_term(ty, &name, value)?);
            continue;
        }
        let prop = ty
            .property(&name)
            .ok_or_else(|| CodecError::UnknownField {
                object: ty.name.clone(),
                field: name.clone(),
            })?;
        set_coerced(model, ty, prop, &mut instance, value)?;
    }

    // Defaults, then required-field enforcement, in canonical order
    for prop in &ty.properties {
        if !instance.get(&prop.name).is_absent() {
            continue;
        }
        if let Some(default) = &prop.ty.default_value {
            instance.set(prop.name.clone(), Value::from_term(default));
            continue;
        }
        if prop.ty.cardinality.requires_value() {
            return Err(CodecError::MissingField {
                object: ty.name.clone(),
                field: prop.name.clone(),
            });
        }
    }

    Ok(instance)
}

/// Coerce one input and store it under the field's declared arity
pub(crate) fn set_coerced(
    model: &ObjectModel,
    ty: &ObjectType,
    prop: &ObjectProperty,
    instance: &mut Instance,
    value: Value,
) -> Result<Value> {
    let is_collection = prop.ty.cardinality.is_collection();
    let coerced = match (value, is_collection) {
        (Value::List(items), true) if !matches!(prop.ty.kind, PropertyTypeKind::List(_)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(coerce_value(model, ty, prop, item)?);
            }
            instance.set_many(prop.name.clone(), out.clone());
            return Ok(Value::List(out));
        }
        (value, true) => {
            let coerced = coerce_value(model, ty, prop, value)?;
            instance.set_many(prop.name.clone(), vec![coerced.clone()]);
            return Ok(coerced);
        }
        (value, false) => coerce_value(model, ty, prop, value)?,
    };
    instance.set(prop.name.clone(), coerced.clone());
    Ok(coerced)
}

fn coerce_value(
    model: &ObjectModel,
    ty: &ObjectType,
    prop: &ObjectProperty,
    value: Value,
) -> Result<Value> {
    let coerced = coerce_kind(model, &ty.name, &prop.name, &prop.ty.kind, value)?;
    if let Some(fixed) = &prop.ty.fixed_value {
        let matches_fixed = coerced.to_term().as_ref() == Some(fixed);
        if !matches_fixed {
            return Err(CodecError::CoercionFailed {
                object: ty.name.clone(),
                field: prop.name.clone(),
                expected: format!("fixed value {fixed}"),
                actual: coerced.to_string(),
            });
        }
    }
    Ok(coerced)
}

fn coerce_kind(
    model: &ObjectModel,
    object: &str,
    field: &str,
    kind: &PropertyTypeKind,
    value: Value,
) -> Result<Value> {
    let fail = |expected: &str, actual: &Value| CodecError::CoercionFailed {
        object: object.to_string(),
        field: field.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    };

    match kind {
        PropertyTypeKind::Primitive(p) => coerce_primitive(p, value, object, field),
        PropertyTypeKind::LiteralTerm => match value {
            Value::Boolean(_)
            | Value::Integer(_)
            | Value::Double(_)
            | Value::String(_)
            | Value::DateTime(_) => Ok(value),
            other => Err(fail("literal", &other)),
        },
        PropertyTypeKind::IriTerm { enumerated } => {
            let coerced = match value {
                Value::Iri(_) | Value::Blank(_) => value,
                Value::String(s) => Value::Iri(s),
                other => return Err(fail("iri", &other)),
            };
            if let Some(allowed) = enumerated {
                let term = coerced.to_term();
                if !allowed.iter().any(|t| term.as_ref() == Some(t)) {
                    return Err(fail("one of the enumerated IRIs", &coerced));
                }
            }
            Ok(coerced)
        }
        PropertyTypeKind::ObjectReference { target, is_extern } => match value {
            Value::Iri(_) | Value::Blank(_) => Ok(value),
            Value::String(s) => Ok(Value::Iri(s)),
            Value::Object(nested) if !is_extern => {
                if model.object_type(nested.type_name()).is_none() {
                    return Err(CodecError::UnknownObjectType {
                        name: nested.type_name().to_string(),
                    });
                }
                Ok(Value::Object(nested))
            }
            other => Err(fail(&format!("reference to {target}"), &other)),
        },
        PropertyTypeKind::EnumValue { allowed } => {
            let term = value.to_term();
            if allowed.iter().any(|t| term.as_ref() == Some(t)) {
                Ok(value)
            } else {
                Err(fail("one of the enumerated values", &value))
            }
        }
        PropertyTypeKind::Union { members } => {
            let mut last = None;
            for member in members {
                match coerce_kind(model, object, field, &member.kind, value.clone()) {
                    Ok(coerced) => return Ok(coerced),
                    Err(e) => last = Some(e),
                }
            }
            Err(last.unwrap_or_else(|| fail("union member", &value)))
        }
        PropertyTypeKind::List(element) => {
            let items = match value {
                Value::List(items) => items,
                single => vec![single],
            };
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(coerce_kind(model, object, field, &element.kind, item)?);
            }
            Ok(Value::List(out))
        }
    }
}

fn coerce_primitive(
    kind: &PrimitiveKind,
    value: Value,
    object: &str,
    field: &str,
) -> Result<Value> {
    let fail = |expected: &str, actual: &Value| CodecError::CoercionFailed {
        object: object.to_string(),
        field: field.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    };

    match kind {
        PrimitiveKind::Boolean => match value {
            Value::Boolean(_) => Ok(value),
            Value::String(ref s) => match s.parse::<bool>() {
                Ok(b) => Ok(Value::Boolean(b)),
                Err(_) => Err(fail("boolean", &value)),
            },
            other => Err(fail("boolean", &other)),
        },
        PrimitiveKind::Integer => match value {
            Value::Integer(_) => Ok(value),
            Value::Double(d) if d.fract() == 0.0 && d.abs() < (i64::MAX as f64) => {
                Ok(Value::Integer(d as i64))
            }
            Value::String(ref s) => match s.parse::<i64>() {
                Ok(i) => Ok(Value::Integer(i)),
                Err(_) => Err(fail("integer", &value)),
            },
            other => Err(fail("integer", &other)),
        },
        PrimitiveKind::Double => match value {
            Value::Double(_) => Ok(value),
            Value::Integer(i) => Ok(Value::Double(i as f64)),
            Value::String(ref s) => match s.parse::<f64>() {
                Ok(d) => Ok(Value::Double(d)),
                Err(_) => Err(fail("double", &value)),
            },
            other => Err(fail("double", &other)),
        },
        PrimitiveKind::String | PrimitiveKind::Other(_) => match value {
            Value::String(_) => Ok(value),
            Value::Boolean(b) => Ok(Value::String(b.to_string())),
            Value::Integer(i) => Ok(Value::String(i.to_string())),
            Value::Double(d) => Ok(Value::String(d.to_string())),
            Value::Iri(s) => Ok(Value::String(s)),
            other => Err(fail("string", &other)),
        },
        PrimitiveKind::DateTime => match value {
            Value::DateTime(_) => Ok(value),
            Value::String(ref s) => match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => Ok(Value::DateTime(dt.with_timezone(&Utc))),
                Err(_) => Err(fail("dateTime", &value)),
            },
            other => Err(fail("dateTime", &other)),
        },
    }
}

/// Lenient primitive conversion for graph decode: a mismatch yields
/// `None` so the next statement can be tried
pub(crate) fn coerce_primitive_lenient(kind: &PrimitiveKind, value: Value) -> Option<Value> {
    coerce_primitive(kind, value, "", "").ok()
}

/// Interpret an identifier-key input as a term
fn identifier_term(ty: &ObjectType, field: &str, value: Value) -> Result<Term> {
    match value {
        Value::Iri(iri) => Ok(Term::iri(iri)),
        Value::Blank(label) => Ok(Term::blank(label)),
        Value::String(s) => {
            if let Some(label) = s.strip_prefix("_:") {
                Ok(Term::blank(label))
            } else {
                Ok(Term::iri(s))
            }
        }
        other => Err(CodecError::CoercionFailed {
            object: ty.name.clone(),
            field: field.to_string(),
            expected: "identifier".to_string(),
            actual: other.to_string(),
        }),
    }
}
