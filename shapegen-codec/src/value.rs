//! Runtime values and instances
//!
//! [`Instance`] is the dynamic representation of one object: a type tag,
//! an optional explicit identifier, and a field map read through the
//! object type's declared order. A minted identifier is cached on the
//! instance; any field write flips the invalidation flag and the next
//! read re-mints.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use shapegen_graph_ir::Term;
use shapegen_vocab::xsd;

/// One runtime value
#[derive(Clone, Debug)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    DateTime(DateTime<Utc>),
    /// A bare IRI reference
    Iri(String),
    /// A bare blank label (no `_:` prefix)
    Blank(String),
    /// A nested object
    Object(Instance),
    /// An ordered list
    List(Vec<Value>),
}

impl Value {
    /// Kind label for error messages
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::DateTime(_) => "dateTime",
            Value::Iri(_) => "iri",
            Value::Blank(_) => "blank",
            Value::Object(_) => "object",
            Value::List(_) => "list",
        }
    }

    /// Map a graph term to a runtime value
    ///
    /// Literal mapping follows the term's datatype; an xsd:dateTime or
    /// xsd:date literal that fails to parse falls back to its string
    /// form.
    pub fn from_term(term: &Term) -> Value {
        match term {
            Term::Iri(iri) => Value::Iri(iri.to_string()),
            Term::BlankNode(id) => Value::Blank(id.as_str().to_string()),
            Term::Literal {
                value, datatype, ..
            } => {
                if let Some(b) = value.as_bool() {
                    return Value::Boolean(b);
                }
                if let Some(i) = value.as_integer() {
                    return Value::Integer(i);
                }
                if let Some(d) = value.as_double() {
                    return Value::Double(d);
                }
                let lexical = value.lexical();
                if matches!(datatype.as_iri(), xsd::DATE_TIME | xsd::DATE) {
                    if let Ok(dt) = DateTime::parse_from_rfc3339(&lexical) {
                        return Value::DateTime(dt.with_timezone(&Utc));
                    }
                }
                Value::String(lexical)
            }
        }
    }

    /// Map back to a graph term; compound values have none
    pub fn to_term(&self) -> Option<Term> {
        match self {
            Value::Boolean(b) => Some(Term::boolean(*b)),
            Value::Integer(i) => Some(Term::integer(*i)),
            Value::Double(d) => Some(Term::double(*d)),
            Value::String(s) => Some(Term::string(s.as_str())),
            Value::DateTime(dt) => Some(Term::typed(
                dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                shapegen_graph_ir::Datatype::xsd_date_time(),
            )),
            Value::Iri(iri) => Some(Term::iri(iri.as_str())),
            Value::Blank(label) => Some(Term::blank(label.as_str())),
            Value::Object(_) | Value::List(_) => None,
        }
    }
}

// Doubles compare by bit pattern so equality stays reflexive
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Iri(a), Value::Iri(b)) => a == b,
            (Value::Blank(a), Value::Blank(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::DateTime(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
            }
            Value::Iri(iri) => write!(f, "<{iri}>"),
            Value::Blank(label) => write!(f, "_:{label}"),
            Value::Object(i) => write!(f, "{{{}}}", i.type_name()),
            Value::List(items) => write!(f, "[{} items]", items.len()),
        }
    }
}

/// A field slot: absent, single-valued, or multi-valued
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Absent,
    One(Value),
    Many(Vec<Value>),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// The contained values as a slice; absent is empty
    pub fn as_slice(&self) -> &[Value] {
        match self {
            FieldValue::Absent => &[],
            FieldValue::One(v) => std::slice::from_ref(v),
            FieldValue::Many(vs) => vs,
        }
    }

    /// The single value, if exactly one is present
    pub fn as_one(&self) -> Option<&Value> {
        match self {
            FieldValue::One(v) => Some(v),
            _ => None,
        }
    }
}

const ABSENT: FieldValue = FieldValue::Absent;

/// One runtime object
#[derive(Clone, Debug)]
pub struct Instance {
    type_name: String,
    id: Option<Term>,
    fields: FxHashMap<String, FieldValue>,
    /// Cached minted identifier, stale when `dirty`
    minted: Option<Term>,
    dirty: bool,
}

impl Instance {
    pub fn new(type_name: impl Into<String>) -> Self {
        Instance {
            type_name: type_name.into(),
            id: None,
            fields: FxHashMap::default(),
            minted: None,
            dirty: false,
        }
    }

    pub fn with_id(type_name: impl Into<String>, id: Term) -> Self {
        let mut instance = Instance::new(type_name);
        instance.id = Some(id);
        instance
    }

    /// The object type's canonical name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The explicitly supplied identifier, if any
    pub fn explicit_id(&self) -> Option<&Term> {
        self.id.as_ref()
    }

    pub fn set_id(&mut self, id: Term) {
        self.id = Some(id);
    }

    /// Field read; never fails, an unset field is absent
    pub fn get(&self, name: &str) -> &FieldValue {
        self.fields.get(name).unwrap_or(&ABSENT)
    }

    /// Single-value write; invalidates any cached minted identifier
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), FieldValue::One(value));
        self.dirty = true;
    }

    /// Multi-value write; invalidates any cached minted identifier
    pub fn set_many(&mut self, name: impl Into<String>, values: Vec<Value>) {
        self.fields.insert(name.into(), FieldValue::Many(values));
        self.dirty = true;
    }

    /// Remove a field; invalidates any cached minted identifier
    pub fn clear(&mut self, name: &str) {
        self.fields.remove(name);
        self.dirty = true;
    }

    pub(crate) fn minted_cache(&self) -> Option<&Term> {
        if self.dirty {
            None
        } else {
            self.minted.as_ref()
        }
    }

    pub(crate) fn store_minted(&mut self, id: Term) {
        self.minted = Some(id);
        self.dirty = false;
    }
}

// Identity is type, explicit identifier, and fields; the minted cache is
// derived state and never observable through equality.
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.id == other.id && self.fields == other.fields
    }
}

impl Eq for Instance {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_term_round_trip() {
        let v = Value::from_term(&Term::integer(42));
        assert_eq!(v, Value::Integer(42));
        assert_eq!(v.to_term(), Some(Term::integer(42)));

        let dt = Value::from_term(&Term::typed(
            "2024-03-01T12:00:00Z",
            shapegen_graph_ir::Datatype::xsd_date_time(),
        ));
        assert!(matches!(dt, Value::DateTime(_)));
    }

    #[test]
    fn test_field_write_invalidates_minted_cache() {
        let mut i = Instance::new("Person");
        i.store_minted(Term::blank("gen-1"));
        assert!(i.minted_cache().is_some());
        i.set("name", Value::String("Ada".into()));
        assert!(i.minted_cache().is_none());
    }

    #[test]
    fn test_minted_cache_not_part_of_identity() {
        let mut a = Instance::new("Person");
        a.set("name", Value::String("Ada".into()));
        let mut b = a.clone();
        b.store_minted(Term::blank("gen-2"));
        assert_eq!(a, b);
    }
}
