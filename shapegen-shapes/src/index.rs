//! Shape index and inheritance resolver
//!
//! One pass over the shapes graph builds the graph-wide lookup table
//! (identifier → shape) and an explicit, immutable adjacency table for
//! the class hierarchy: parents/children one level, ancestors/descendants
//! transitively. Resolvers take the index by reference; nothing is
//! recomputed per call.
//!
//! A cycle in the inheritance graph is a programmer error in the schema
//! and aborts compilation.

use crate::loader::{
    ConstraintBag, NodeShapeRecord, OntologyRecord, PropertyGroupRecord, PropertyShapeRecord,
};
use crate::semantics::NodeShapeView;
use crate::{Result, ShapeError};
use rustc_hash::FxHashMap;
use shapegen_graph_ir::{Graph, Term};
use shapegen_vocab::{owl, sh};

/// Graph-wide shape lookup and inheritance closure
#[derive(Debug, Default)]
pub struct ShapeIndex {
    /// Node shape identifiers in declaration order
    order: Vec<Term>,
    node_shapes: FxHashMap<Term, NodeShapeRecord>,
    property_shapes: FxHashMap<Term, PropertyShapeRecord>,
    /// Constraint bags for anonymous logical-combinator members
    member_bags: FxHashMap<Term, ConstraintBag>,
    ontologies: Vec<OntologyRecord>,
    groups: FxHashMap<Term, PropertyGroupRecord>,
    parents: FxHashMap<Term, Vec<Term>>,
    children: FxHashMap<Term, Vec<Term>>,
    /// Transitive ancestors, nearest first
    ancestors: FxHashMap<Term, Vec<Term>>,
    /// Transitive descendants, nearest first
    descendants: FxHashMap<Term, Vec<Term>>,
}

impl ShapeIndex {
    /// Load every shape resource in the graph and resolve inheritance
    pub fn load(graph: &Graph) -> Result<Self> {
        let mut index = ShapeIndex::default();

        // First pass: explicitly typed resources, in declaration order
        for subject in graph.subjects() {
            let r = graph.resource(subject.clone());
            if r.is_instance_of(sh::NODE_SHAPE) {
                let record = NodeShapeRecord::from_resource(&r, true)?;
                index.order.push(subject.clone());
                index.node_shapes.insert(subject.clone(), record);
            } else if r.is_instance_of(sh::PROPERTY_SHAPE) {
                let record = PropertyShapeRecord::from_resource(&r, true)?;
                index.property_shapes.insert(subject.clone(), record);
            } else if r.is_instance_of(owl::ONTOLOGY) {
                index.ontologies.push(OntologyRecord::from_resource(&r, true)?);
            } else if r.is_instance_of(sh::PROPERTY_GROUP) {
                index
                    .groups
                    .insert(subject.clone(), PropertyGroupRecord::from_resource(&r, true)?);
            }
        }

        // Second pass: untyped property shapes referenced via sh:property
        // (typically blank nodes), and anonymous logical members.
        let referenced: Vec<Term> = index
            .node_shapes
            .values()
            .flat_map(|ns| ns.property_shape_ids.iter().cloned())
            .collect();
        for id in referenced {
            if !index.property_shapes.contains_key(&id) {
                let r = graph.resource(id.clone());
                let record = PropertyShapeRecord::from_resource(&r, false)?;
                index.property_shapes.insert(id, record);
            }
        }
        let member_ids: Vec<Term> = index
            .node_shapes
            .values()
            .map(|ns| &ns.constraints)
            .chain(index.property_shapes.values().map(|ps| &ps.constraints))
            .flat_map(|bag| {
                bag.or
                    .iter()
                    .chain(bag.xone.iter())
                    .chain(bag.and.iter())
                    .chain(bag.not.iter())
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();
        for id in member_ids {
            if !index.node_shapes.contains_key(&id)
                && !index.property_shapes.contains_key(&id)
                && !index.member_bags.contains_key(&id)
            {
                let r = graph.resource(id.clone());
                let bag = ConstraintBag::from_resource(&r)?;
                index.member_bags.insert(id, bag);
            }
        }

        index.build_hierarchy()?;

        tracing::debug!(
            node_shapes = index.node_shapes.len(),
            property_shapes = index.property_shapes.len(),
            ontologies = index.ontologies.len(),
            "shape index built"
        );

        Ok(index)
    }

    /// Collect is-a edges and compute the transitive closure
    fn build_hierarchy(&mut self) -> Result<()> {
        for id in &self.order {
            let record = &self.node_shapes[id];
            let mut parents = Vec::new();
            for class_iri in &record.sub_class_of {
                let parent = Term::iri(class_iri);
                if self.node_shapes.contains_key(&parent) && !parents.contains(&parent) {
                    parents.push(parent);
                }
            }
            for node_ref in &record.constraints.node {
                if self.node_shapes.contains_key(node_ref) && !parents.contains(node_ref) {
                    parents.push(node_ref.clone());
                }
            }
            for parent in &parents {
                self.children
                    .entry(parent.clone())
                    .or_default()
                    .push(id.clone());
            }
            self.parents.insert(id.clone(), parents);
        }

        // Cycle check: DFS with in-stack marking
        let mut state: FxHashMap<Term, u8> = FxHashMap::default();
        for id in &self.order {
            self.check_cycles(id, &mut state, &mut Vec::new())?;
        }

        // Transitive closures: BFS, nearest first, first-seen dedup
        for id in &self.order {
            let up = Self::closure(id, &self.parents);
            let down = Self::closure(id, &self.children);
            self.ancestors.insert(id.clone(), up);
            self.descendants.insert(id.clone(), down);
        }
        Ok(())
    }

    fn check_cycles(
        &self,
        id: &Term,
        state: &mut FxHashMap<Term, u8>,
        path: &mut Vec<Term>,
    ) -> Result<()> {
        match state.get(id) {
            Some(2) => return Ok(()),
            Some(1) => {
                let cycle = path
                    .iter()
                    .chain(std::iter::once(id))
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(ShapeError::CircularInheritance {
                    shape: id.to_string(),
                    cycle,
                });
            }
            _ => {}
        }
        state.insert(id.clone(), 1);
        path.push(id.clone());
        if let Some(parents) = self.parents.get(id) {
            for parent in parents {
                self.check_cycles(parent, state, path)?;
            }
        }
        path.pop();
        state.insert(id.clone(), 2);
        Ok(())
    }

    fn closure(id: &Term, edges: &FxHashMap<Term, Vec<Term>>) -> Vec<Term> {
        let mut out = Vec::new();
        let mut queue: Vec<&Term> = edges.get(id).map(|v| v.iter().collect()).unwrap_or_default();
        let mut cursor = 0;
        while cursor < queue.len() {
            let current = queue[cursor];
            cursor += 1;
            if out.contains(current) {
                continue;
            }
            out.push(current.clone());
            if let Some(next) = edges.get(current) {
                queue.extend(next.iter());
            }
        }
        out
    }

    /// Node shape by identifier
    pub fn node_shape(&self, id: &Term) -> Option<&NodeShapeRecord> {
        self.node_shapes.get(id)
    }

    /// Property shape by identifier
    pub fn property_shape(&self, id: &Term) -> Option<&PropertyShapeRecord> {
        self.property_shapes.get(id)
    }

    /// Constraint bag for any shape identifier, whether it was loaded as a
    /// node shape, a property shape, or an anonymous logical member
    pub fn constraint_bag(&self, id: &Term) -> Option<&ConstraintBag> {
        self.node_shapes
            .get(id)
            .map(|ns| &ns.constraints)
            .or_else(|| self.property_shapes.get(id).map(|ps| &ps.constraints))
            .or_else(|| self.member_bags.get(id))
    }

    /// Node shapes in declaration order
    pub fn node_shapes(&self) -> impl Iterator<Item = &NodeShapeRecord> {
        self.order.iter().map(|id| &self.node_shapes[id])
    }

    /// Node shape identifiers in declaration order
    pub fn node_shape_order(&self) -> &[Term] {
        &self.order
    }

    /// Loaded ontologies, in declaration order; the first one supplies
    /// graph-wide defaults
    pub fn ontologies(&self) -> &[OntologyRecord] {
        &self.ontologies
    }

    /// Property group by identifier
    pub fn group(&self, id: &Term) -> Option<&PropertyGroupRecord> {
        self.groups.get(id)
    }

    /// Direct parents (one level), declaration order
    pub fn parents(&self, id: &Term) -> &[Term] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Direct children (one level), declaration order
    pub fn children(&self, id: &Term) -> &[Term] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transitive ancestors, nearest first
    pub fn ancestors(&self, id: &Term) -> &[Term] {
        self.ancestors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transitive descendants, nearest first
    pub fn descendants(&self, id: &Term) -> &[Term] {
        self.descendants.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Semantic view of a node shape
    pub fn view(&self, id: &Term) -> Option<NodeShapeView<'_>> {
        self.node_shapes
            .get(id)
            .map(|record| NodeShapeView::new(self, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapegen_vocab::{rdf, rdfs};

    fn class_shape(g: &mut Graph, iri: &str, parent: Option<&str>) {
        let s = Term::iri(iri);
        g.add_triple(s.clone(), Term::iri(rdf::TYPE), Term::iri(sh::NODE_SHAPE));
        g.add_triple(s.clone(), Term::iri(rdf::TYPE), Term::iri(rdfs::CLASS));
        if let Some(p) = parent {
            g.add_triple(s, Term::iri(rdfs::SUB_CLASS_OF), Term::iri(p));
        }
    }

    #[test]
    fn test_hierarchy_closure() {
        let mut g = Graph::new();
        class_shape(&mut g, "http://example.org/A", None);
        class_shape(&mut g, "http://example.org/B", Some("http://example.org/A"));
        class_shape(&mut g, "http://example.org/C", Some("http://example.org/B"));
        let index = ShapeIndex::load(&g).unwrap();

        let c = Term::iri("http://example.org/C");
        let ancestors: Vec<_> = index.ancestors(&c).iter().map(|t| t.to_string()).collect();
        assert_eq!(
            ancestors,
            vec!["<http://example.org/B>", "<http://example.org/A>"]
        );

        let a = Term::iri("http://example.org/A");
        assert_eq!(index.children(&a).len(), 1);
        assert_eq!(index.descendants(&a).len(), 2);
    }

    #[test]
    fn test_inheritance_cycle_is_fatal() {
        let mut g = Graph::new();
        class_shape(&mut g, "http://example.org/A", Some("http://example.org/B"));
        class_shape(&mut g, "http://example.org/B", Some("http://example.org/A"));
        let err = ShapeIndex::load(&g).unwrap_err();
        match err {
            ShapeError::CircularInheritance { cycle, .. } => {
                assert!(cycle.contains("http://example.org/A"));
                assert!(cycle.contains("http://example.org/B"));
            }
            other => panic!("expected cycle error, got {other}"),
        }
    }

    #[test]
    fn test_declaration_order_preserved() {
        let mut g = Graph::new();
        class_shape(&mut g, "http://example.org/Z", None);
        class_shape(&mut g, "http://example.org/A", None);
        let index = ShapeIndex::load(&g).unwrap();
        let order: Vec<_> = index
            .node_shapes()
            .map(|ns| ns.identifier.to_string())
            .collect();
        assert_eq!(order, vec!["<http://example.org/Z>", "<http://example.org/A>"]);
    }
}
