//! Canonical structural hashing
//!
//! Feeds an externally supplied incremental digest in canonical field
//! order. Absent optionals contribute nothing, compound fields recurse,
//! and set-valued fields are fed in a value-sorted order so two
//! multiset-equal instances always hash alike. Identifiers never enter
//! the hash: the SHA-256 minting strategy derives the identifier from
//! this very digest.

use crate::error::{CodecError, Result};
use crate::value::{Instance, Value};
use shapegen_model::{ObjectModel, ObjectType};
use sha2::digest::Update;
use sha2::{Digest, Sha256};

// Kind discriminants, fed ahead of each value
const TAG_BOOLEAN: u8 = 0x01;
const TAG_INTEGER: u8 = 0x02;
const TAG_DOUBLE: u8 = 0x03;
const TAG_STRING: u8 = 0x04;
const TAG_DATE_TIME: u8 = 0x05;
const TAG_IRI: u8 = 0x06;
const TAG_BLANK: u8 = 0x07;
const TAG_OBJECT: u8 = 0x08;
const TAG_LIST: u8 = 0x09;

/// Feed an instance's fields into the digest
pub fn hash_instance<D: Update>(
    model: &ObjectModel,
    ty: &ObjectType,
    instance: &Instance,
    digest: &mut D,
) -> Result<()> {
    crate::ensure_feature(ty, shapegen_shapes::Feature::Hash)?;
    feed_instance(model, ty, instance, digest)
}

/// Ungated feed, shared with identifier minting
pub(crate) fn feed_instance<D: Update>(
    model: &ObjectModel,
    ty: &ObjectType,
    instance: &Instance,
    digest: &mut D,
) -> Result<()> {
    digest.update(ty.name.as_bytes());
    for prop in &ty.properties {
        let field = instance.get(&prop.name);
        if field.is_absent() {
            continue;
        }
        update_str(digest, &prop.name);
        let mut values: Vec<&Value> = field.as_slice().iter().collect();
        if prop.ty.cardinality.is_collection() {
            values = sorted_by_sub_digest(model, values)?;
        }
        update_len(digest, values.len());
        for value in values {
            hash_value(model, value, digest)?;
        }
    }
    Ok(())
}

fn hash_value<D: Update>(model: &ObjectModel, value: &Value, digest: &mut D) -> Result<()> {
    match value {
        Value::Boolean(b) => digest.update(&[TAG_BOOLEAN, *b as u8]),
        Value::Integer(i) => {
            digest.update(&[TAG_INTEGER]);
            digest.update(&i.to_be_bytes());
        }
        Value::Double(d) => {
            digest.update(&[TAG_DOUBLE]);
            digest.update(&d.to_bits().to_be_bytes());
        }
        Value::String(s) => {
            digest.update(&[TAG_STRING]);
            update_str(digest, s);
        }
        Value::DateTime(dt) => {
            digest.update(&[TAG_DATE_TIME]);
            update_str(digest, &dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true));
        }
        Value::Iri(iri) => {
            digest.update(&[TAG_IRI]);
            update_str(digest, iri);
        }
        Value::Blank(label) => {
            digest.update(&[TAG_BLANK]);
            update_str(digest, label);
        }
        Value::Object(nested) => {
            digest.update(&[TAG_OBJECT]);
            let nested_ty = model.object_type(nested.type_name()).ok_or_else(|| {
                CodecError::UnknownObjectType {
                    name: nested.type_name().to_string(),
                }
            })?;
            feed_instance(model, nested_ty, nested, digest)?;
        }
        Value::List(items) => {
            digest.update(&[TAG_LIST]);
            update_len(digest, items.len());
            for item in items {
                hash_value(model, item, digest)?;
            }
        }
    }
    Ok(())
}

/// Length-prefixed string feed, so adjacent strings never merge
fn update_str<D: Update>(digest: &mut D, s: &str) {
    update_len(digest, s.len());
    digest.update(s.as_bytes());
}

fn update_len<D: Update>(digest: &mut D, len: usize) {
    digest.update(&(len as u64).to_be_bytes());
}

/// Order-insensitive feed order for set-valued fields
///
/// Each element is keyed by its own sub-digest, which walks fields in
/// declared order; no unordered map iteration can reach the outer digest.
fn sorted_by_sub_digest<'v>(
    model: &ObjectModel,
    values: Vec<&'v Value>,
) -> Result<Vec<&'v Value>> {
    let mut keyed = Vec::with_capacity(values.len());
    for value in values {
        let mut hasher = Sha256::new();
        hash_value(model, value, &mut hasher)?;
        keyed.push((hasher.finalize(), value));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, v)| v).collect())
}
