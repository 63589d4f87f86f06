//! RDF graph - a collection of triples
//!
//! The `Graph` type uses `Vec<Triple>` to preserve duplicates and, more
//! importantly here, insertion order: "graph order" is what plural
//! predicate reads observe, and the first matching triple is what singular
//! reads take.

use crate::{Resource, Term, Triple};

/// A collection of RDF triples
///
/// # Design Decisions
///
/// - **Vec storage**: preserves graph order and duplicates.
/// - **Explicit deduplication**: call `dedupe()` for set semantics.
/// - **Deterministic output**: call `sort()` (SPO lexicographic) before
///   comparing or formatting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple to the graph
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Add a triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples in graph order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All objects of (subject, predicate), in graph order
    pub fn objects_of<'g, 's, 'p>(
        &'g self,
        subject: &'s Term,
        predicate: &'p str,
    ) -> impl Iterator<Item = &'g Term> + use<'g, 's, 'p> {
        self.triples
            .iter()
            .filter(move |t| &t.s == subject && t.p.as_iri() == Some(predicate))
            .map(|t| &t.o)
    }

    /// Distinct subjects, in order of first appearance
    ///
    /// Declaration order for shapes in a shapes graph is defined by this
    /// traversal.
    pub fn subjects(&self) -> Vec<&Term> {
        let mut seen = Vec::new();
        for t in &self.triples {
            if !seen.contains(&&t.s) {
                seen.push(&t.s);
            }
        }
        seen
    }

    /// Bind a subject for reading
    pub fn resource(&self, subject: Term) -> Resource<'_> {
        Resource::new(self, subject)
    }

    /// Sort triples by SPO for deterministic output
    pub fn sort(&mut self) {
        self.triples.sort();
    }

    /// Remove duplicate triples (apply set semantics)
    ///
    /// Preserves the first occurrence of each triple. Call `sort()` first
    /// for deterministic results.
    pub fn dedupe(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.triples.retain(|t| seen.insert(t.clone()));
    }

    /// Sort then dedupe
    pub fn canonicalize(&mut self) {
        self.sort();
        self.triples.dedup();
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}
