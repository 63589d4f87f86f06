//! JSON codec
//!
//! Encodes instances as flat JSON objects with the model's identifier
//! and discriminator keys, and decodes them back. Decode validates the
//! document against the generated schema first and fails with the full
//! set of structured issues rather than stopping at the first.

use crate::error::{CodecError, Result};
use crate::mint::identifier_of;
use crate::schema::validate;
use crate::value::{FieldValue, Instance, Value};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as Json};
use shapegen_graph_ir::Term;
use shapegen_model::{ObjectModel, ObjectType, UnionType};
use shapegen_shapes::{MintingStrategy, PrimitiveKind, PropertyTypeKind};

/// Encode one instance as a JSON object
///
/// The identifier key is written for explicit identifiers and for any
/// minting strategy that can produce one; a mintless instance without an
/// identifier simply omits the key.
pub fn to_json(model: &ObjectModel, ty: &ObjectType, instance: &mut Instance) -> Result<Json> {
    crate::ensure_feature(ty, shapegen_shapes::Feature::Json)?;
    let mut map = Map::new();
    if instance.explicit_id().is_some() || ty.minting != MintingStrategy::None {
        let id = identifier_of(model, ty, instance)?;
        map.insert(model.identifier_key().to_string(), term_to_json(&id));
    }
    map.insert(
        model.discriminator_key().to_string(),
        Json::String(ty.discriminator.clone()),
    );

    for prop in &ty.properties {
        let field = instance.get(&prop.name).clone();
        match field {
            FieldValue::Absent => {}
            FieldValue::One(v) => {
                map.insert(prop.name.clone(), value_to_json(model, &v)?);
            }
            FieldValue::Many(vs) => {
                let items = vs
                    .iter()
                    .map(|v| value_to_json(model, v))
                    .collect::<Result<Vec<_>>>()?;
                map.insert(prop.name.clone(), Json::Array(items));
            }
        }
    }
    Ok(Json::Object(map))
}

/// Decode one instance from a JSON object, schema validation first
pub fn from_json(model: &ObjectModel, ty: &ObjectType, json: &Json) -> Result<Instance> {
    crate::ensure_feature(ty, shapegen_shapes::Feature::Json)?;
    let issues = validate(model, ty, json);
    if !issues.is_empty() {
        return Err(CodecError::JsonValidation {
            object: ty.name.clone(),
            issues,
        });
    }
    build_instance(model, ty, json)
}

/// Decode a union document by its discriminator tag
pub fn union_from_json(model: &ObjectModel, union: &UnionType, json: &Json) -> Result<Instance> {
    let tag = json
        .get(&union.discriminator_key)
        .and_then(Json::as_str)
        .ok_or_else(|| CodecError::UnknownObjectType {
            name: format!("{}(untagged)", union.name),
        })?;
    let member = union
        .member(tag)
        .ok_or_else(|| CodecError::UnknownObjectType {
            name: tag.to_string(),
        })?;
    let ty = model
        .object_type_for_shape(&member.shape_id)
        .ok_or_else(|| CodecError::UnknownObjectType {
            name: member.tag.clone(),
        })?;
    from_json(model, ty, json)
}

/// Validation already passed; absence of convertible values here means
/// the field stays absent
fn build_instance(model: &ObjectModel, ty: &ObjectType, json: &Json) -> Result<Instance> {
    let map = json.as_object().ok_or_else(|| CodecError::JsonValidation {
        object: ty.name.clone(),
        issues: vec![crate::error::ValidationIssue {
            path: "/".to_string(),
            message: "expected an object".to_string(),
        }],
    })?;

    let mut instance = Instance::new(&ty.name);
    if let Some(Json::String(id)) = map.get(model.identifier_key()) {
        instance.set_id(identifier_from_text(id));
    }

    for prop in &ty.properties {
        let value = match map.get(&prop.name) {
            Some(v) => v,
            None => {
                if let Some(default) = &prop.ty.default_value {
                    instance.set(prop.name.clone(), Value::from_term(default));
                }
                continue;
            }
        };
        if prop.ty.cardinality.is_collection() {
            let items = value.as_array().cloned().unwrap_or_default();
            let mut out = Vec::with_capacity(items.len());
            for item in &items {
                if let Some(v) = json_to_value(model, &prop.ty.kind, item)? {
                    out.push(v);
                }
            }
            instance.set_many(prop.name.clone(), out);
        } else if let Some(v) = json_to_value(model, &prop.ty.kind, value)? {
            instance.set(prop.name.clone(), v);
        }
    }
    Ok(instance)
}

fn json_to_value(
    model: &ObjectModel,
    kind: &PropertyTypeKind,
    json: &Json,
) -> Result<Option<Value>> {
    let converted = match kind {
        PropertyTypeKind::Primitive(p) => match (p, json) {
            (PrimitiveKind::Boolean, Json::Bool(b)) => Some(Value::Boolean(*b)),
            (PrimitiveKind::Integer, v) => v.as_i64().map(Value::Integer),
            (PrimitiveKind::Double, v) => v.as_f64().map(Value::Double),
            (PrimitiveKind::String | PrimitiveKind::Other(_), Json::String(s)) => {
                Some(Value::String(s.clone()))
            }
            (PrimitiveKind::DateTime, Json::String(s)) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| Value::DateTime(dt.with_timezone(&Utc))),
            _ => None,
        },
        PropertyTypeKind::LiteralTerm => match json {
            Json::Bool(b) => Some(Value::Boolean(*b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Integer(i))
                } else {
                    n.as_f64().map(Value::Double)
                }
            }
            // RFC 3339 text re-enters as a dateTime, mirroring how a typed
            // graph literal would have decoded
            Json::String(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => Some(Value::DateTime(dt.with_timezone(&Utc))),
                Err(_) => Some(Value::String(s.clone())),
            },
            _ => None,
        },
        PropertyTypeKind::IriTerm { .. } => json
            .as_str()
            .map(|s| Value::from_term(&identifier_from_text(s))),
        PropertyTypeKind::EnumValue { allowed } => allowed
            .iter()
            .find(|t| &term_to_json(t) == json)
            .map(Value::from_term),
        PropertyTypeKind::ObjectReference { target, is_extern } => match json {
            Json::String(s) => Some(Value::from_term(&identifier_from_text(s))),
            Json::Object(_) if !is_extern => {
                match model.object_type_for_shape(target) {
                    Some(nested_ty) => {
                        let nested = build_instance(model, nested_ty, json)?;
                        Some(Value::Object(nested))
                    }
                    None => None,
                }
            }
            _ => None,
        },
        PropertyTypeKind::Union { members } => {
            let mut found = None;
            for member in members {
                if let Some(v) = json_to_value(model, &member.kind, json)? {
                    found = Some(v);
                    break;
                }
            }
            found
        }
        PropertyTypeKind::List(element) => {
            let items = json.as_array().cloned().unwrap_or_default();
            let mut out = Vec::with_capacity(items.len());
            for item in &items {
                if let Some(v) = json_to_value(model, &element.kind, item)? {
                    out.push(v);
                }
            }
            Some(Value::List(out))
        }
    };
    Ok(converted)
}

fn value_to_json(model: &ObjectModel, value: &Value) -> Result<Json> {
    Ok(match value {
        Value::Boolean(b) => Json::Bool(*b),
        Value::Integer(i) => Json::from(*i),
        Value::Double(d) => serde_json::Number::from_f64(*d)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::String(s) => Json::String(s.clone()),
        Value::DateTime(dt) => {
            Json::String(dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        }
        Value::Iri(iri) => Json::String(iri.clone()),
        Value::Blank(label) => Json::String(format!("_:{label}")),
        Value::Object(nested) => {
            let nested_ty = model.object_type(nested.type_name()).ok_or_else(|| {
                CodecError::UnknownObjectType {
                    name: nested.type_name().to_string(),
                }
            })?;
            let mut nested = nested.clone();
            to_json(model, nested_ty, &mut nested)?
        }
        Value::List(items) => Json::Array(
            items
                .iter()
                .map(|v| value_to_json(model, v))
                .collect::<Result<Vec<_>>>()?,
        ),
    })
}

/// The JSON text form of an identifier term
pub(crate) fn term_to_json(term: &Term) -> Json {
    match term {
        Term::Iri(iri) => Json::String(iri.to_string()),
        Term::BlankNode(id) => Json::String(id.to_string()),
        Term::Literal { value, .. } => {
            if let Some(b) = value.as_bool() {
                Json::Bool(b)
            } else if let Some(i) = value.as_integer() {
                Json::from(i)
            } else if let Some(d) = value.as_double() {
                serde_json::Number::from_f64(d)
                    .map(Json::Number)
                    .unwrap_or(Json::Null)
            } else {
                Json::String(value.lexical())
            }
        }
    }
}

/// `_:`-prefixed text denotes a blank label, anything else an IRI
fn identifier_from_text(text: &str) -> Term {
    match text.strip_prefix("_:") {
        Some(label) => Term::blank(label),
        None => Term::iri(text),
    }
}
