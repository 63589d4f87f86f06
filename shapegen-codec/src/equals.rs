//! Structural equality with path-tagged reports
//!
//! Fields compare in canonical order and the first difference wins.
//! Set-valued fields compare as multisets, lists positionally with the
//! index in the path, nested objects recursively with dotted paths.
//! Swapping the arguments swaps the left/right sides of the report but
//! never changes whether the instances are equal.
//!
//! Explicit named identifiers participate; blank identity does not.

use crate::error::{CodecError, Result};
use crate::value::{Instance, Value};
use shapegen_model::{ObjectModel, ObjectType};

/// One reported difference
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inequality {
    /// Dotted field path with array indices, e.g. `address.lines[1]`
    pub path: String,
    /// How the left instance differs
    pub left: String,
    /// How the right instance differs
    pub right: String,
}

impl std::fmt::Display for Inequality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} != {}", self.path, self.left, self.right)
    }
}

/// Compare two instances of the same object type
///
/// Returns `None` when equal, otherwise the first difference in
/// canonical order.
pub fn equals(
    model: &ObjectModel,
    ty: &ObjectType,
    a: &Instance,
    b: &Instance,
) -> Result<Option<Inequality>> {
    crate::ensure_feature(ty, shapegen_shapes::Feature::Equals)?;
    compare_instances(model, ty, "", a, b)
}

fn compare_instances(
    model: &ObjectModel,
    ty: &ObjectType,
    prefix: &str,
    a: &Instance,
    b: &Instance,
) -> Result<Option<Inequality>> {
    // Named identifiers are significant; blank identity is not
    if let (Some(left), Some(right)) = (a.explicit_id(), b.explicit_id()) {
        if left.is_iri() && right.is_iri() && left != right {
            return Ok(Some(Inequality {
                path: join(prefix, model.identifier_key()),
                left: left.to_string(),
                right: right.to_string(),
            }));
        }
    }

    for prop in &ty.properties {
        let path = join(prefix, &prop.name);
        let left = a.get(&prop.name);
        let right = b.get(&prop.name);
        match (left.is_absent(), right.is_absent()) {
            (true, true) => continue,
            (true, false) => {
                return Ok(Some(Inequality {
                    path,
                    left: "absent".to_string(),
                    right: "present".to_string(),
                }))
            }
            (false, true) => {
                return Ok(Some(Inequality {
                    path,
                    left: "present".to_string(),
                    right: "absent".to_string(),
                }))
            }
            (false, false) => {}
        }

        let lv = left.as_slice();
        let rv = right.as_slice();
        let diff = if prop.ty.cardinality.is_collection() {
            compare_multisets(model, &path, lv, rv)?
        } else {
            match (lv.first(), rv.first()) {
                (Some(l), Some(r)) => compare_values(model, &path, l, r)?,
                _ => None,
            }
        };
        if diff.is_some() {
            return Ok(diff);
        }
    }
    Ok(None)
}

/// Order-insensitive comparison with per-element matching
fn compare_multisets(
    model: &ObjectModel,
    path: &str,
    left: &[Value],
    right: &[Value],
) -> Result<Option<Inequality>> {
    if left.len() != right.len() {
        return Ok(Some(Inequality {
            path: path.to_string(),
            left: format!("{} values", left.len()),
            right: format!("{} values", right.len()),
        }));
    }
    let mut claimed = vec![false; right.len()];
    for (i, l) in left.iter().enumerate() {
        let mut matched = false;
        for (j, r) in right.iter().enumerate() {
            if claimed[j] {
                continue;
            }
            if compare_values(model, path, l, r)?.is_none() {
                claimed[j] = true;
                matched = true;
                break;
            }
        }
        if !matched {
            return Ok(Some(Inequality {
                path: format!("{path}[{i}]"),
                left: l.to_string(),
                right: "no matching element".to_string(),
            }));
        }
    }
    Ok(None)
}

fn compare_values(
    model: &ObjectModel,
    path: &str,
    left: &Value,
    right: &Value,
) -> Result<Option<Inequality>> {
    match (left, right) {
        (Value::Object(a), Value::Object(b)) => {
            if a.type_name() != b.type_name() {
                return Ok(Some(Inequality {
                    path: path.to_string(),
                    left: a.type_name().to_string(),
                    right: b.type_name().to_string(),
                }));
            }
            let nested_ty = model.object_type(a.type_name()).ok_or_else(|| {
                CodecError::UnknownObjectType {
                    name: a.type_name().to_string(),
                }
            })?;
            compare_instances(model, nested_ty, path, a, b)
        }
        (Value::List(a), Value::List(b)) => {
            if a.len() != b.len() {
                return Ok(Some(Inequality {
                    path: path.to_string(),
                    left: format!("{} items", a.len()),
                    right: format!("{} items", b.len()),
                }));
            }
            for (i, (l, r)) in a.iter().zip(b.iter()).enumerate() {
                let indexed = format!("{path}[{i}]");
                if let Some(diff) = compare_values(model, &indexed, l, r)? {
                    return Ok(Some(diff));
                }
            }
            Ok(None)
        }
        (l, r) => {
            if l == r {
                Ok(None)
            } else {
                Ok(Some(Inequality {
                    path: path.to_string(),
                    left: l.to_string(),
                    right: r.to_string(),
                }))
            }
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
