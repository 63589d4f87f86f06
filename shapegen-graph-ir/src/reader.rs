//! Resource reader: the minimal graph access capability
//!
//! A `Resource` binds a subject to its graph and answers predicate
//! lookups; a `GraphValue` is one looked-up term that remembers where it
//! came from, so coercion failures can name the statement.
//!
//! Lookup contract:
//! - plural reads (`values_of`) return values in graph order;
//! - singular reads (`first_of`) take the first matching value;
//! - absence of an optional value is not an error;
//! - a failed coercion is `DecodeError::MistypedValue`.

use crate::{DecodeError, Graph, LiteralValue, Result, Term};
use chrono::{DateTime, FixedOffset, NaiveDate};
use shapegen_vocab::rdf;

/// Traversal bound for first/rest linked lists; a longer chain is assumed
/// to be cyclic.
const MAX_LIST_LENGTH: usize = 10_000;

/// A subject bound to its graph
#[derive(Clone, Debug)]
pub struct Resource<'g> {
    graph: &'g Graph,
    subject: Term,
}

impl<'g> Resource<'g> {
    pub(crate) fn new(graph: &'g Graph, subject: Term) -> Self {
        Self { graph, subject }
    }

    /// The underlying graph
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// The bound subject term
    pub fn subject(&self) -> &Term {
        &self.subject
    }

    /// All values of a predicate, in graph order
    pub fn values_of(&self, predicate: &str) -> Vec<GraphValue<'g>> {
        self.graph
            .objects_of(&self.subject, predicate)
            .map(|term| GraphValue {
                graph: self.graph,
                subject: self.subject.clone(),
                predicate: predicate.to_string(),
                term,
            })
            .collect()
    }

    /// First value of a predicate, if any
    pub fn first_of(&self, predicate: &str) -> Option<GraphValue<'g>> {
        self.values_of(predicate).into_iter().next()
    }

    /// First value of a predicate, or `MissingRequiredValue`
    pub fn require(&self, predicate: &str) -> Result<GraphValue<'g>> {
        self.first_of(predicate)
            .ok_or_else(|| DecodeError::MissingRequiredValue {
                subject: self.subject.to_string(),
                predicate: predicate.to_string(),
            })
    }

    /// All rdf:type IRIs of this resource
    pub fn types(&self) -> Vec<&'g str> {
        self.graph
            .objects_of(&self.subject, rdf::TYPE)
            .filter_map(|t| t.as_iri())
            .collect()
    }

    /// Whether this resource carries the given rdf:type
    pub fn is_instance_of(&self, type_iri: &str) -> bool {
        self.types().contains(&type_iri)
    }

    /// Build the `UnexpectedType` error for a failed type recognition
    pub fn unexpected_type(&self, expected: &str) -> DecodeError {
        DecodeError::UnexpectedType {
            subject: self.subject.to_string(),
            expected: expected.to_string(),
        }
    }
}

/// One term looked up from a graph, with its provenance
#[derive(Clone, Debug)]
pub struct GraphValue<'g> {
    graph: &'g Graph,
    subject: Term,
    predicate: String,
    term: &'g Term,
}

impl<'g> GraphValue<'g> {
    /// The raw term
    pub fn term(&self) -> &'g Term {
        self.term
    }

    fn mistyped(&self, expected: &'static str) -> DecodeError {
        DecodeError::MistypedValue {
            subject: self.subject.to_string(),
            predicate: self.predicate.clone(),
            expected,
            actual: self.term.to_string(),
        }
    }

    /// Coerce to an IRI string
    pub fn to_iri(&self) -> Result<&'g str> {
        self.term.as_iri().ok_or_else(|| self.mistyped("IRI"))
    }

    /// Coerce to an identifier term (IRI or blank node)
    pub fn to_identifier(&self) -> Result<Term> {
        if self.term.is_identifier() {
            Ok(self.term.clone())
        } else {
            Err(self.mistyped("IRI or blank node"))
        }
    }

    /// Coerce to literal components
    pub fn to_literal(&self) -> Result<&'g Term> {
        if self.term.is_literal() {
            Ok(self.term)
        } else {
            Err(self.mistyped("literal"))
        }
    }

    /// Coerce to a boolean literal
    pub fn to_boolean(&self) -> Result<bool> {
        self.term
            .as_literal()
            .and_then(|(v, _, _)| v.as_bool())
            .ok_or_else(|| self.mistyped("boolean literal"))
    }

    /// Coerce to an integer literal
    pub fn to_integer(&self) -> Result<i64> {
        self.term
            .as_literal()
            .and_then(|(v, _, _)| v.as_integer())
            .ok_or_else(|| self.mistyped("integer literal"))
    }

    /// Coerce to a double literal (integers widen)
    pub fn to_double(&self) -> Result<f64> {
        self.term
            .as_literal()
            .and_then(|(v, _, _)| v.as_double())
            .ok_or_else(|| self.mistyped("numeric literal"))
    }

    /// Coerce to a string literal (plain or language-tagged)
    pub fn to_string_value(&self) -> Result<&'g str> {
        self.term
            .as_literal()
            .and_then(|(v, _, _)| match v {
                LiteralValue::String(s) => Some(&**s),
                _ => None,
            })
            .ok_or_else(|| self.mistyped("string literal"))
    }

    /// Coerce to a date or dateTime literal
    ///
    /// Accepts RFC 3339 dateTime lexical forms and bare `YYYY-MM-DD` dates
    /// (read as midnight UTC).
    pub fn to_date_time(&self) -> Result<DateTime<FixedOffset>> {
        let lexical = self.to_string_value()?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(lexical) {
            return Ok(dt);
        }
        if let Ok(date) = NaiveDate::parse_from_str(lexical, "%Y-%m-%d") {
            let midnight = date.and_time(chrono::NaiveTime::MIN);
            return Ok(midnight.and_utc().fixed_offset());
        }
        Err(self.mistyped("date or dateTime literal"))
    }

    /// Traverse an rdf:first/rdf:rest linked list starting at this term
    ///
    /// Returns the element values in list order. `rdf:nil` yields an empty
    /// list. A cell missing `rdf:first` contributes nothing, matching the
    /// skip-don't-fail policy for malformed optional data.
    pub fn to_list(&self) -> Result<Vec<GraphValue<'g>>> {
        let mut values = Vec::new();
        let mut current = self.to_identifier()?;

        for _ in 0..MAX_LIST_LENGTH {
            if current.as_iri() == Some(rdf::NIL) {
                return Ok(values);
            }
            let cell = self.graph.resource(current.clone());
            if let Some(first) = cell.first_of(rdf::FIRST) {
                values.push(first);
            }
            match cell.first_of(rdf::REST) {
                Some(rest) => current = rest.to_identifier()?,
                None => return Ok(values),
            }
        }
        Err(self.mistyped("terminating rdf list"))
    }

    /// Coerce to a nested resource bound to the same graph
    pub fn to_resource(&self) -> Result<Resource<'g>> {
        let subject = self.to_identifier()?;
        Ok(Resource::new(self.graph, subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_graph() -> Graph {
        let mut g = Graph::new();
        let subject = Term::iri("http://example.org/s");
        g.add_triple(
            subject.clone(),
            Term::iri("http://example.org/items"),
            Term::blank("l0"),
        );
        g.add_triple(Term::blank("l0"), Term::iri(rdf::FIRST), Term::string("a"));
        g.add_triple(Term::blank("l0"), Term::iri(rdf::REST), Term::blank("l1"));
        g.add_triple(Term::blank("l1"), Term::iri(rdf::FIRST), Term::string("b"));
        g.add_triple(Term::blank("l1"), Term::iri(rdf::REST), Term::iri(rdf::NIL));
        g
    }

    #[test]
    fn test_list_traversal() {
        let g = list_graph();
        let r = g.resource(Term::iri("http://example.org/s"));
        let head = r.first_of("http://example.org/items").unwrap();
        let items = head.to_list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].to_string_value().unwrap(), "a");
        assert_eq!(items[1].to_string_value().unwrap(), "b");
    }

    #[test]
    fn test_nil_is_empty_list() {
        let mut g = Graph::new();
        g.add_triple(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/items"),
            Term::iri(rdf::NIL),
        );
        let r = g.resource(Term::iri("http://example.org/s"));
        let head = r.first_of("http://example.org/items").unwrap();
        assert!(head.to_list().unwrap().is_empty());
    }

    #[test]
    fn test_mistyped_iri() {
        let mut g = Graph::new();
        g.add_triple(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("not an iri"),
        );
        let r = g.resource(Term::iri("http://example.org/s"));
        let v = r.first_of("http://example.org/p").unwrap();
        let err = v.to_iri().unwrap_err();
        assert!(matches!(err, DecodeError::MistypedValue { .. }));
        assert!(err.to_string().contains("http://example.org/p"));
    }

    #[test]
    fn test_require_missing() {
        let g = Graph::new();
        let r = g.resource(Term::iri("http://example.org/s"));
        let err = r.require("http://example.org/p").unwrap_err();
        assert!(matches!(err, DecodeError::MissingRequiredValue { .. }));
    }

    #[test]
    fn test_date_time_coercion() {
        let mut g = Graph::new();
        g.add_triple(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/when"),
            Term::typed("2024-03-01T12:00:00Z", crate::Datatype::xsd_date_time()),
        );
        let r = g.resource(Term::iri("http://example.org/s"));
        let v = r.first_of("http://example.org/when").unwrap();
        let dt = v.to_date_time().unwrap();
        assert_eq!(dt.timestamp(), 1_709_294_400);
    }
}
