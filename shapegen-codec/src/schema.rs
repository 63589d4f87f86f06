//! JSON Schema and UI schema documents, and the JSON validator
//!
//! Both documents are plain [`serde_json::Value`] builders over the
//! object model. Everything iterates ordered structures only, so the
//! output is byte-identical for an unchanged model.
//!
//! The validator walks the same structure the schema describes and is
//! what `from_json` runs before building an instance.

use crate::error::ValidationIssue;
use serde_json::{json, Map, Value as Json};
use shapegen_model::{ObjectModel, ObjectProperty, ObjectType};
use shapegen_shapes::{Cardinality, PrimitiveKind, PropertyType, PropertyTypeKind};

/// Build the JSON Schema document for one object type
///
/// Every object type of the model lands in `$defs` so nested references
/// resolve, including reference cycles; the root points at the requested
/// type.
pub fn json_schema(model: &ObjectModel, ty: &ObjectType) -> crate::Result<Json> {
    crate::ensure_feature(ty, shapegen_shapes::Feature::JsonSchema)?;
    let mut defs = Map::new();
    for t in model.object_types() {
        defs.insert(t.name.clone(), type_schema(model, t));
    }
    Ok(json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$ref": format!("#/$defs/{}", ty.name),
        "$defs": Json::Object(defs),
    }))
}

fn type_schema(model: &ObjectModel, ty: &ObjectType) -> Json {
    let mut properties = Map::new();
    properties.insert(
        model.identifier_key().to_string(),
        json!({ "type": "string" }),
    );
    properties.insert(
        model.discriminator_key().to_string(),
        json!({ "const": ty.discriminator }),
    );

    let mut required = vec![Json::String(model.discriminator_key().to_string())];
    for prop in &ty.properties {
        properties.insert(prop.name.clone(), property_schema(model, &prop.ty));
        if prop.ty.cardinality.requires_value() && !prop.has_default() {
            required.push(Json::String(prop.name.clone()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    if !ty.comments.is_empty() {
        schema.insert("description".to_string(), json!(ty.comments.join(" ")));
    }
    schema.insert("properties".to_string(), Json::Object(properties));
    schema.insert("required".to_string(), Json::Array(required));
    Json::Object(schema)
}

fn property_schema(model: &ObjectModel, ty: &PropertyType) -> Json {
    let item = kind_schema(model, &ty.kind);
    match ty.cardinality {
        Cardinality::Required | Cardinality::Optional => item,
        Cardinality::Set => json!({ "type": "array", "items": item }),
        Cardinality::NonEmptySet => {
            json!({ "type": "array", "items": item, "minItems": 1 })
        }
    }
}

fn kind_schema(model: &ObjectModel, kind: &PropertyTypeKind) -> Json {
    match kind {
        PropertyTypeKind::Primitive(p) => match p {
            PrimitiveKind::DateTime => json!({ "type": "string", "format": "date-time" }),
            other => json!({ "type": other.json_type() }),
        },
        PropertyTypeKind::LiteralTerm => json!({}),
        PropertyTypeKind::IriTerm { enumerated } => match enumerated {
            Some(values) => {
                let allowed: Vec<Json> =
                    values.iter().map(|t| Json::String(term_text(t))).collect();
                json!({ "type": "string", "enum": allowed })
            }
            None => json!({ "type": "string", "format": "iri-reference" }),
        },
        PropertyTypeKind::EnumValue { allowed } => {
            let values: Vec<Json> = allowed
                .iter()
                .map(|t| crate::json::term_to_json(t))
                .collect();
            json!({ "enum": values })
        }
        PropertyTypeKind::ObjectReference { target, is_extern } => {
            if *is_extern {
                return json!({ "type": "string", "format": "iri-reference" });
            }
            match model.object_type_for_shape(target) {
                Some(t) => json!({ "$ref": format!("#/$defs/{}", t.name) }),
                None => json!({ "type": "string", "format": "iri-reference" }),
            }
        }
        PropertyTypeKind::Union { members } => {
            let alts: Vec<Json> = members
                .iter()
                .map(|m| kind_schema(model, &m.kind))
                .collect();
            json!({ "anyOf": alts })
        }
        PropertyTypeKind::List(element) => {
            json!({ "type": "array", "items": kind_schema(model, &element.kind) })
        }
    }
}

/// Build the UI schema document for one object type
///
/// One control per field in canonical order (display order overrides
/// where declared), labeled from sh:name, with the discriminator as a
/// hidden control.
pub fn ui_schema(model: &ObjectModel, ty: &ObjectType) -> crate::Result<Json> {
    crate::ensure_feature(ty, shapegen_shapes::Feature::UiSchema)?;
    let mut indexed: Vec<(usize, &ObjectProperty)> = ty.properties.iter().enumerate().collect();
    indexed.sort_by_key(|(i, p)| (p.display_order.unwrap_or(i64::MAX), *i));

    let mut elements = vec![json!({
        "type": "Control",
        "scope": format!("#/properties/{}", model.discriminator_key()),
        "options": { "hidden": true },
    })];
    for (_, prop) in indexed {
        let mut control = Map::new();
        control.insert("type".to_string(), json!("Control"));
        control.insert(
            "scope".to_string(),
            json!(format!("#/properties/{}", prop.name)),
        );
        if let Some(label) = &prop.label {
            control.insert("label".to_string(), json!(label));
        }
        if let Some(description) = &prop.description {
            control.insert("options".to_string(), json!({ "description": description }));
        }
        elements.push(Json::Object(control));
    }

    Ok(json!({
        "type": "VerticalLayout",
        "label": ty.labels.first().cloned().unwrap_or_else(|| ty.name.clone()),
        "elements": elements,
    }))
}

/// Validate a JSON document against an object type
///
/// Checks exactly what the generated schema says: object shape,
/// discriminator constant, required fields, per-field types and
/// enumerations. Unknown keys pass.
pub fn validate(model: &ObjectModel, ty: &ObjectType, json: &Json) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    validate_object(model, ty, json, "", &mut issues);
    issues
}

fn validate_object(
    model: &ObjectModel,
    ty: &ObjectType,
    json: &Json,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(map) = json.as_object() else {
        issues.push(issue(path, "expected an object"));
        return;
    };
    if let Some(tag) = map.get(model.discriminator_key()) {
        if tag.as_str() != Some(ty.discriminator.as_str()) {
            issues.push(issue(
                &format!("{path}/{}", model.discriminator_key()),
                &format!("expected '{}'", ty.discriminator),
            ));
        }
    }
    for prop in &ty.properties {
        let field_path = format!("{path}/{}", prop.name);
        match map.get(&prop.name) {
            None => {
                if prop.ty.cardinality.requires_value() && !prop.has_default() {
                    issues.push(issue(&field_path, "required field is missing"));
                }
            }
            Some(value) => validate_property(model, &prop.ty, value, &field_path, issues),
        }
    }
}

fn validate_property(
    model: &ObjectModel,
    ty: &PropertyType,
    value: &Json,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    if ty.cardinality.is_collection() {
        let Some(items) = value.as_array() else {
            issues.push(issue(path, "expected an array"));
            return;
        };
        if ty.cardinality == Cardinality::NonEmptySet && items.is_empty() {
            issues.push(issue(path, "at least one value is required"));
        }
        for (i, item) in items.iter().enumerate() {
            validate_kind(model, &ty.kind, item, &format!("{path}/{i}"), issues);
        }
    } else {
        validate_kind(model, &ty.kind, value, path, issues);
    }
}

fn validate_kind(
    model: &ObjectModel,
    kind: &PropertyTypeKind,
    value: &Json,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match kind {
        PropertyTypeKind::Primitive(p) => {
            let ok = match p {
                PrimitiveKind::Boolean => value.is_boolean(),
                PrimitiveKind::Integer => value.is_i64() || value.is_u64(),
                PrimitiveKind::Double => value.is_number(),
                PrimitiveKind::String | PrimitiveKind::Other(_) => value.is_string(),
                PrimitiveKind::DateTime => value
                    .as_str()
                    .map(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok())
                    .unwrap_or(false),
            };
            if !ok {
                issues.push(issue(path, &format!("expected a {} value", p.json_type())));
            }
        }
        PropertyTypeKind::LiteralTerm => {
            if !(value.is_boolean() || value.is_number() || value.is_string()) {
                issues.push(issue(path, "expected a literal value"));
            }
        }
        PropertyTypeKind::IriTerm { enumerated } => {
            let Some(s) = value.as_str() else {
                issues.push(issue(path, "expected an IRI string"));
                return;
            };
            if let Some(allowed) = enumerated {
                if !allowed.iter().any(|t| term_text(t) == s) {
                    issues.push(issue(path, "value is not one of the enumerated IRIs"));
                }
            }
        }
        PropertyTypeKind::EnumValue { allowed } => {
            let matches = allowed
                .iter()
                .any(|t| &crate::json::term_to_json(t) == value);
            if !matches {
                issues.push(issue(path, "value is not one of the enumerated values"));
            }
        }
        PropertyTypeKind::ObjectReference { target, is_extern } => {
            if *is_extern {
                if !value.is_string() {
                    issues.push(issue(path, "expected an IRI string"));
                }
                return;
            }
            match (value, model.object_type_for_shape(target)) {
                (Json::String(_), _) => {}
                (Json::Object(_), Some(nested_ty)) => {
                    validate_object(model, nested_ty, value, path, issues)
                }
                (Json::Object(_), None) => {}
                _ => issues.push(issue(path, "expected an object or IRI string")),
            }
        }
        PropertyTypeKind::Union { members } => {
            // Accept when any member accepts
            let ok = members.iter().any(|m| {
                let mut probe = Vec::new();
                validate_kind(model, &m.kind, value, path, &mut probe);
                probe.is_empty()
            });
            if !ok {
                issues.push(issue(path, "no union member matches"));
            }
        }
        PropertyTypeKind::List(element) => {
            let Some(items) = value.as_array() else {
                issues.push(issue(path, "expected an array"));
                return;
            };
            for (i, item) in items.iter().enumerate() {
                validate_kind(model, &element.kind, item, &format!("{path}/{i}"), issues);
            }
        }
    }
}

fn issue(path: &str, message: &str) -> ValidationIssue {
    ValidationIssue {
        path: if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        },
        message: message.to_string(),
    }
}

/// The JSON text form of an identifier term
pub(crate) fn term_text(term: &shapegen_graph_ir::Term) -> String {
    match term {
        shapegen_graph_ir::Term::Iri(iri) => iri.to_string(),
        other => other.to_string(),
    }
}
