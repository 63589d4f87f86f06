//! Graph terms
//!
//! Every node and edge label in the IR is a [`Term`]: an expanded IRI, a
//! blank node, or a datatyped literal. Prefixed names never appear here;
//! the reader expands them before terms are built. String payloads sit
//! behind `Arc<str>` so cloning a term while decoding stays cheap.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Label of a blank node, stored without the `_:` sigil
///
/// Labels are only meaningful within one graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// Datatype IRI of a literal
///
/// Every literal carries one; plain strings carry xsd:string and
/// language-tagged strings carry rdf:langString.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Self(Arc::from(iri.as_ref()))
    }

    pub fn as_iri(&self) -> &str {
        &self.0
    }

    pub fn xsd_string() -> Self {
        Self::from_iri(shapegen_vocab::xsd::STRING)
    }

    pub fn xsd_boolean() -> Self {
        Self::from_iri(shapegen_vocab::xsd::BOOLEAN)
    }

    pub fn xsd_integer() -> Self {
        Self::from_iri(shapegen_vocab::xsd::INTEGER)
    }

    pub fn xsd_double() -> Self {
        Self::from_iri(shapegen_vocab::xsd::DOUBLE)
    }

    pub fn xsd_date_time() -> Self {
        Self::from_iri(shapegen_vocab::xsd::DATE_TIME)
    }

    pub fn rdf_lang_string() -> Self {
        Self::from_iri(shapegen_vocab::rdf::LANG_STRING)
    }

    pub fn is_xsd_string(&self) -> bool {
        self.as_iri() == shapegen_vocab::xsd::STRING
    }
}

/// Parsed payload of a literal
///
/// Doubles compare and hash by bit pattern so literals stay usable as map
/// keys even when the payload is NaN.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LiteralValue {
    String(Arc<str>),
    Boolean(bool),
    Integer(i64),
    Double(f64),
}

impl LiteralValue {
    pub fn string(s: impl AsRef<str>) -> Self {
        LiteralValue::String(Arc::from(s.as_ref()))
    }

    /// Lexical form, XSD canonical for the special doubles
    pub fn lexical(&self) -> String {
        match self {
            LiteralValue::String(s) => s.to_string(),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Integer(i) => i.to_string(),
            LiteralValue::Double(d) if d.is_nan() => "NaN".to_string(),
            LiteralValue::Double(d) if *d == f64::INFINITY => "INF".to_string(),
            LiteralValue::Double(d) if *d == f64::NEG_INFINITY => "-INF".to_string(),
            LiteralValue::Double(d) => d.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LiteralValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            LiteralValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric reading; integers widen to double
    pub fn as_double(&self) -> Option<f64> {
        match self {
            LiteralValue::Double(d) => Some(*d),
            LiteralValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            LiteralValue::String(_) => 0,
            LiteralValue::Boolean(_) => 1,
            LiteralValue::Integer(_) => 2,
            LiteralValue::Double(_) => 3,
        }
    }
}

impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        use LiteralValue::*;
        match (self, other) {
            (String(a), String(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for LiteralValue {}

impl Hash for LiteralValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            LiteralValue::String(s) => s.hash(state),
            LiteralValue::Boolean(b) => b.hash(state),
            LiteralValue::Integer(i) => i.hash(state),
            LiteralValue::Double(d) => d.to_bits().hash(state),
        }
    }
}

impl Ord for LiteralValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use LiteralValue::*;
        match (self, other) {
            (String(a), String(b)) => a.cmp(b),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Double(a), Double(b)) => a.total_cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for LiteralValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One graph term
///
/// Invariants: IRIs are fully expanded, a language tag only appears
/// alongside the rdf:langString datatype, and the predicate position of a
/// triple holds an IRI. The derived `Ord` sorts IRIs before blank nodes
/// before literals; graph canonicalization relies only on the order being
/// total and stable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Iri(Arc<str>),
    BlankNode(BlankId),
    Literal {
        value: LiteralValue,
        datatype: Datatype,
        language: Option<Arc<str>>,
    },
}

impl Term {
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::BlankNode(BlankId::new(label))
    }

    /// Plain xsd:string literal
    pub fn string(value: impl AsRef<str>) -> Self {
        Term::typed(value, Datatype::xsd_string())
    }

    pub fn boolean(value: bool) -> Self {
        Term::Literal {
            value: LiteralValue::Boolean(value),
            datatype: Datatype::xsd_boolean(),
            language: None,
        }
    }

    pub fn integer(value: i64) -> Self {
        Term::Literal {
            value: LiteralValue::Integer(value),
            datatype: Datatype::xsd_integer(),
            language: None,
        }
    }

    pub fn double(value: f64) -> Self {
        Term::Literal {
            value: LiteralValue::Double(value),
            datatype: Datatype::xsd_double(),
            language: None,
        }
    }

    /// rdf:langString literal with its tag
    pub fn lang_string(value: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal {
            value: LiteralValue::string(value),
            datatype: Datatype::rdf_lang_string(),
            language: Some(Arc::from(lang.as_ref())),
        }
    }

    /// String-valued literal under an arbitrary datatype
    pub fn typed(value: impl AsRef<str>, datatype: Datatype) -> Self {
        Term::Literal {
            value: LiteralValue::string(value),
            datatype,
            language: None,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// IRI or blank node, the two kinds that can name a resource
    pub fn is_identifier(&self) -> bool {
        !self.is_literal()
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_blank(&self) -> Option<&BlankId> {
        match self {
            Term::BlankNode(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<(&LiteralValue, &Datatype, Option<&str>)> {
        match self {
            Term::Literal {
                value,
                datatype,
                language,
            } => Some((value, datatype, language.as_deref())),
            _ => None,
        }
    }
}

impl std::fmt::Display for Term {
    /// N-Triples-style rendering; xsd:string drops its datatype suffix
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(id) => id.fmt(f),
            Term::Literal {
                value,
                datatype,
                language: Some(lang),
            } if datatype.as_iri() == shapegen_vocab::rdf::LANG_STRING => {
                write!(f, "\"{}\"@{lang}", value.lexical())
            }
            Term::Literal {
                value, datatype, ..
            } if datatype.is_xsd_string() => write!(f, "\"{}\"", value.lexical()),
            Term::Literal {
                value, datatype, ..
            } => write!(f, "\"{}\"^^<{}>", value.lexical(), datatype.as_iri()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identifier_kinds() {
        assert!(Term::iri("http://example.org/p").is_identifier());
        assert!(Term::blank("n3").is_identifier());
        assert!(!Term::integer(7).is_identifier());
        assert_eq!(Term::blank("n3").as_blank().map(BlankId::as_str), Some("n3"));
    }

    #[test]
    fn literal_accessors_widen_integers() {
        let i = LiteralValue::Integer(4);
        assert_eq!(i.as_integer(), Some(4));
        assert_eq!(i.as_double(), Some(4.0));
        assert_eq!(i.as_str(), None);
        assert_eq!(LiteralValue::string("x").as_str(), Some("x"));
    }

    #[test]
    fn nan_literals_are_equal_and_hash_alike() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Term::double(f64::NAN));
        assert!(set.contains(&Term::double(f64::NAN)));
        assert_eq!(LiteralValue::Double(f64::NAN).lexical(), "NaN");
        assert_eq!(LiteralValue::Double(f64::NEG_INFINITY).lexical(), "-INF");
    }

    #[test]
    fn ordering_is_total_across_kinds() {
        let mut terms = vec![
            Term::string("b"),
            Term::blank("a"),
            Term::iri("http://example.org/z"),
            Term::iri("http://example.org/a"),
        ];
        terms.sort();
        assert_eq!(
            terms,
            vec![
                Term::iri("http://example.org/a"),
                Term::iri("http://example.org/z"),
                Term::blank("a"),
                Term::string("b"),
            ]
        );
    }

    #[test]
    fn ntriples_rendering() {
        assert_eq!(Term::iri("http://example.org/s").to_string(), "<http://example.org/s>");
        assert_eq!(Term::blank("c14n0").to_string(), "_:c14n0");
        assert_eq!(Term::string("plain").to_string(), "\"plain\"");
        assert_eq!(Term::lang_string("salut", "fr").to_string(), "\"salut\"@fr");
        assert_eq!(
            Term::boolean(true).to_string(),
            "\"true\"^^<http://www.w3.org/2001/XMLSchema#boolean>"
        );
    }
}
