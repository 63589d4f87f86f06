//! Per-field SPARQL query pattern fragments
//!
//! Text fragments only; no query engine here. Each field of an object
//! type yields one fragment parameterized by the subject term and a
//! variable prefix: required fields bind plainly, optional fields wrap in
//! OPTIONAL, alternative paths expand to UNION blocks, and list-valued
//! fields traverse rdf:rest*/rdf:first.

use shapegen_model::{ObjectProperty, ObjectType};
use shapegen_shapes::{PropertyPath, PropertyTypeKind};
use shapegen_vocab::rdf;

/// One field's WHERE-clause fragment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryPattern {
    /// The field this fragment binds
    pub field: String,
    /// The bound variable, prefix included
    pub variable: String,
    pub text: String,
}

/// Build the per-field fragments for an object type
pub fn query_patterns(
    ty: &ObjectType,
    subject: &str,
    var_prefix: &str,
) -> crate::Result<Vec<QueryPattern>> {
    crate::ensure_feature(ty, shapegen_shapes::Feature::Query)?;
    Ok(ty
        .properties
        .iter()
        .map(|prop| field_pattern(prop, subject, var_prefix))
        .collect())
}

/// Assemble the full WHERE clause: the type-recognition triple followed
/// by every field fragment in canonical order
pub fn where_clause(ty: &ObjectType, subject: &str, var_prefix: &str) -> crate::Result<String> {
    let mut lines = Vec::with_capacity(ty.properties.len() + 1);
    if let Some(type_iri) = &ty.from_rdf_type {
        lines.push(format!("{subject} <{}> <{type_iri}> .", rdf::TYPE));
    }
    for pattern in query_patterns(ty, subject, var_prefix)? {
        lines.push(pattern.text);
    }
    Ok(lines.join("\n"))
}

fn field_pattern(prop: &ObjectProperty, subject: &str, var_prefix: &str) -> QueryPattern {
    let variable = format!("?{var_prefix}{}", prop.name);

    let body = if let PropertyTypeKind::Union { members } = &prop.ty.kind {
        // One branch per member; a list-shaped member keeps its traversal
        members
            .iter()
            .map(|m| format!("{{ {} }}", kind_body(&m.kind, prop, subject, &variable)))
            .collect::<Vec<_>>()
            .join(" UNION ")
    } else if let PropertyPath::Alternative(alts) = &prop.path {
        alts.iter()
            .map(|alt| format!("{{ {subject} {} {variable} . }}", alt.to_sparql()))
            .collect::<Vec<_>>()
            .join(" UNION ")
    } else {
        kind_body(&prop.ty.kind, prop, subject, &variable)
    };

    let text = if prop.ty.cardinality.requires_value() {
        body
    } else {
        format!("OPTIONAL {{ {body} }}")
    };

    QueryPattern {
        field: prop.name.clone(),
        variable,
        text,
    }
}

fn kind_body(kind: &PropertyTypeKind, prop: &ObjectProperty, subject: &str, variable: &str) -> String {
    if matches!(kind, PropertyTypeKind::List(_)) {
        format!(
            "{subject} {}/<{}>*/<{}> {variable} .",
            prop.path.to_sparql(),
            rdf::REST,
            rdf::FIRST
        )
    } else {
        format!("{subject} {} {variable} .", prop.path.to_sparql())
    }
}
