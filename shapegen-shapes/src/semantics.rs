//! Shape semantic views
//!
//! Pure functions over a loaded shape record plus its resolved ancestor
//! chain. Views borrow the index; nothing here mutates or caches beyond
//! what the index already computed.

use crate::loader::{
    Feature, MintingStrategy, NodeShapeRecord, PropertyShapeRecord, TermKind, Visibility,
};
use crate::{Result, ShapeError, ShapeIndex};
use shapegen_graph_ir::Term;

/// The last path segment of an IRI (after `#`, else after the final `/`)
pub fn local_name(iri: &str) -> &str {
    match iri.rsplit_once('#') {
        Some((_, frag)) if !frag.is_empty() => frag,
        _ => iri.rsplit('/').next().unwrap_or(iri),
    }
}

/// Allowed identifier kinds for instances of a node shape
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeKindSet {
    pub blank: bool,
    pub named: bool,
}

impl NodeKindSet {
    /// The default when neither a shape nor its ancestors declare kinds
    pub const DEFAULT: NodeKindSet = NodeKindSet {
        blank: true,
        named: true,
    };

    fn from_kinds(kinds: &[TermKind]) -> Option<Self> {
        let blank = kinds.contains(&TermKind::BlankNode);
        let named = kinds.contains(&TermKind::NamedNode);
        if blank || named {
            Some(NodeKindSet { blank, named })
        } else {
            None
        }
    }

    /// True when every kind in `self` is also in `other`
    pub fn is_subset_of(&self, other: &NodeKindSet) -> bool {
        (!self.blank || other.blank) && (!self.named || other.named)
    }

    /// Blank-node-only identifier set
    pub fn is_blank_only(&self) -> bool {
        self.blank && !self.named
    }
}

impl std::fmt::Display for NodeKindSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.blank, self.named) {
            (true, true) => write!(f, "{{BlankNode, NamedNode}}"),
            (true, false) => write!(f, "{{BlankNode}}"),
            (false, true) => write!(f, "{{NamedNode}}"),
            (false, false) => write!(f, "{{}}"),
        }
    }
}

/// The resolved set of codec capabilities to emit for a shape
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureSet(Vec<Feature>);

impl FeatureSet {
    /// Every capability
    pub fn all() -> Self {
        FeatureSet(Feature::ALL.to_vec())
    }

    /// Resolve from an include/exclude pair
    ///
    /// A non-empty include list wins; otherwise everything minus the
    /// exclude list. Returns `None` when both lists are empty so callers
    /// can fall through to the next level of defaults.
    fn resolve(include: &[Feature], exclude: &[Feature]) -> Option<Self> {
        if !include.is_empty() {
            let mut set: Vec<Feature> = Feature::ALL
                .iter()
                .copied()
                .filter(|f| include.contains(f))
                .collect();
            set.retain(|f| !exclude.contains(f));
            Some(FeatureSet(set))
        } else if !exclude.is_empty() {
            Some(FeatureSet(
                Feature::ALL
                    .iter()
                    .copied()
                    .filter(|f| !exclude.contains(f))
                    .collect(),
            ))
        } else {
            None
        }
    }

    /// Whether a capability is selected
    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    /// Selected capabilities in canonical order
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }
}

/// Inheritance-aware view of a node shape
#[derive(Clone, Copy, Debug)]
pub struct NodeShapeView<'a> {
    index: &'a ShapeIndex,
    record: &'a NodeShapeRecord,
}

impl<'a> NodeShapeView<'a> {
    pub(crate) fn new(index: &'a ShapeIndex, record: &'a NodeShapeRecord) -> Self {
        Self { index, record }
    }

    /// The underlying record
    pub fn record(&self) -> &'a NodeShapeRecord {
        self.record
    }

    /// The shape identifier
    pub fn identifier(&self) -> &'a Term {
        &self.record.identifier
    }

    /// gen:abstract, default false
    pub fn is_abstract(&self) -> bool {
        self.record.ext.is_abstract.unwrap_or(false)
    }

    /// gen:extern, default false
    pub fn is_extern(&self) -> bool {
        self.record.ext.is_extern.unwrap_or(false)
    }

    /// gen:mutable, default false
    pub fn is_mutable(&self) -> bool {
        self.record.ext.mutable.unwrap_or(false)
    }

    /// Whether this shape is an ordered first/rest list shape
    ///
    /// The explicit gen:list flag wins; otherwise a shape whose property
    /// paths are exactly the rdf:first / rdf:rest pair is recognized
    /// structurally.
    pub fn is_list(&self) -> bool {
        if self.record.ext.is_list {
            return true;
        }
        let mut has_first = false;
        let mut only_list_paths = !self.record.property_shape_ids.is_empty();
        for id in &self.record.property_shape_ids {
            let Some(ps) = self.index.property_shape(id) else {
                return false;
            };
            match ps.path.as_predicate() {
                Some(shapegen_vocab::rdf::FIRST) => has_first = true,
                Some(shapegen_vocab::rdf::REST) => {}
                _ => only_list_paths = false,
            }
        }
        has_first && only_list_paths
    }

    /// Resolved node-kind set
    ///
    /// A shape's declared kinds must be a subset of every ancestor's
    /// declared kinds; an undeclared shape inherits the nearest declared
    /// set; with no declaration anywhere the default is
    /// {BlankNode, NamedNode}.
    pub fn node_kinds(&self) -> Result<NodeKindSet> {
        let own = NodeKindSet::from_kinds(&self.record.constraints.node_kinds);

        let mut inherited = None;
        for ancestor_id in self.index.ancestors(&self.record.identifier) {
            let Some(ancestor) = self.index.node_shape(ancestor_id) else {
                continue;
            };
            if let Some(declared) = NodeKindSet::from_kinds(&ancestor.constraints.node_kinds) {
                if let Some(own) = own {
                    if !own.is_subset_of(&declared) {
                        return Err(ShapeError::ConflictingNodeKinds {
                            shape: self.record.identifier.to_string(),
                            declared: own.to_string(),
                            ancestor: ancestor_id.to_string(),
                            allowed: declared.to_string(),
                        });
                    }
                }
                if inherited.is_none() {
                    inherited = Some(declared);
                }
            }
        }

        Ok(own.or(inherited).unwrap_or(NodeKindSet::DEFAULT))
    }

    /// Resolved identifier minting strategy
    ///
    /// Own value, else the nearest ancestor that declares one, else
    /// BlankNode when the shape can only be blank-identified.
    pub fn minting_strategy(&self) -> Result<MintingStrategy> {
        if let Some(strategy) = self.record.ext.minting_strategy {
            return Ok(strategy);
        }
        for ancestor_id in self.index.ancestors(&self.record.identifier) {
            if let Some(ancestor) = self.index.node_shape(ancestor_id) {
                if let Some(strategy) = ancestor.ext.minting_strategy {
                    return Ok(strategy);
                }
            }
        }
        if self.node_kinds()?.is_blank_only() {
            Ok(MintingStrategy::BlankNode)
        } else {
            Ok(MintingStrategy::None)
        }
    }

    /// The type IRI used to recognize an instance on decode
    ///
    /// Explicit gen:fromRdfType wins; otherwise a concrete class-backed,
    /// IRI-identified shape recognizes its own identifier IRI.
    pub fn from_rdf_type(&self) -> Option<String> {
        if let Some(explicit) = &self.record.ext.from_rdf_type {
            return Some(explicit.clone());
        }
        if self.record.is_class && !self.is_abstract() {
            if let Some(iri) = self.record.identifier.as_iri() {
                return Some(iri.to_string());
            }
        }
        None
    }

    /// The ordered type IRIs emitted on encode; always contains
    /// `from_rdf_type` (first) when present
    pub fn to_rdf_types(&self) -> Vec<String> {
        let mut types = Vec::new();
        if let Some(from) = self.from_rdf_type() {
            types.push(from);
        }
        for t in &self.record.ext.to_rdf_types {
            if !types.contains(t) {
                types.push(t.clone());
            }
        }
        types
    }

    /// Resolved codec feature selection: shape-level include/exclude,
    /// else the nearest ontology's, else all
    pub fn features(&self) -> FeatureSet {
        FeatureSet::resolve(
            &self.record.ext.include_features,
            &self.record.ext.exclude_features,
        )
        .or_else(|| {
            self.index.ontologies().first().and_then(|ont| {
                FeatureSet::resolve(&ont.include_features, &ont.exclude_features)
            })
        })
        .unwrap_or_else(FeatureSet::all)
    }

    /// Object name: gen:name, else the identifier's local name, else the
    /// blank label
    pub fn name(&self) -> String {
        if let Some(name) = &self.record.ext.name {
            return name.clone();
        }
        match &self.record.identifier {
            Term::Iri(iri) => local_name(iri).to_string(),
            Term::BlankNode(id) => id.as_str().to_string(),
            Term::Literal { value, .. } => value.lexical(),
        }
    }

    /// Discriminator tag value for this object type
    pub fn discriminator_value(&self) -> String {
        self.name()
    }
}

/// View of a property shape in the context of its owning node shape
#[derive(Clone, Copy, Debug)]
pub struct PropertyShapeView<'a> {
    record: &'a PropertyShapeRecord,
    owner: &'a NodeShapeRecord,
}

impl<'a> PropertyShapeView<'a> {
    pub fn new(record: &'a PropertyShapeRecord, owner: &'a NodeShapeRecord) -> Self {
        Self { record, owner }
    }

    /// The underlying record
    pub fn record(&self) -> &'a PropertyShapeRecord {
        self.record
    }

    /// Field name: gen:name, else sh:name, else the path predicate's
    /// local name
    pub fn name(&self) -> String {
        if let Some(name) = &self.record.ext.name {
            return name.clone();
        }
        if let Some(name) = self.record.names.first() {
            return name.clone();
        }
        match self.record.path.as_predicate() {
            Some(iri) => local_name(iri).to_string(),
            None => "value".to_string(),
        }
    }

    /// gen:visibility, default public
    pub fn visibility(&self) -> Visibility {
        self.record.ext.visibility.unwrap_or_default()
    }

    /// Field mutability: own gen:mutable, else the owning shape's
    pub fn is_mutable(&self) -> bool {
        self.record
            .ext
            .mutable
            .or(self.owner.ext.mutable)
            .unwrap_or(false)
    }

    /// sh:order display position
    pub fn order(&self) -> Option<i64> {
        self.record.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapegen_graph_ir::Graph;
    use shapegen_vocab::{gen, rdf, rdfs, sh};

    fn typed_shape(g: &mut Graph, iri: &str) -> Term {
        let s = Term::iri(iri);
        g.add_triple(s.clone(), Term::iri(rdf::TYPE), Term::iri(sh::NODE_SHAPE));
        g.add_triple(s.clone(), Term::iri(rdf::TYPE), Term::iri(rdfs::CLASS));
        s
    }

    #[test]
    fn test_node_kind_inheritance_and_conflict() {
        let mut g = Graph::new();
        let parent = typed_shape(&mut g, "http://example.org/Parent");
        g.add_triple(parent.clone(), Term::iri(sh::NODE_KIND), Term::iri(sh::IRI));
        let child = typed_shape(&mut g, "http://example.org/Child");
        g.add_triple(child.clone(), Term::iri(rdfs::SUB_CLASS_OF), parent.clone());

        let index = ShapeIndex::load(&g).unwrap();
        // Child declares nothing: inherits {NamedNode}
        let kinds = index.view(&child).unwrap().node_kinds().unwrap();
        assert!(kinds.named && !kinds.blank);

        // A child declaring BlankNode under an IRI-only parent conflicts
        let mut g2 = Graph::new();
        let parent = typed_shape(&mut g2, "http://example.org/Parent");
        g2.add_triple(parent.clone(), Term::iri(sh::NODE_KIND), Term::iri(sh::IRI));
        let bad = typed_shape(&mut g2, "http://example.org/Bad");
        g2.add_triple(bad.clone(), Term::iri(rdfs::SUB_CLASS_OF), parent);
        g2.add_triple(bad.clone(), Term::iri(sh::NODE_KIND), Term::iri(sh::BLANK_NODE));
        let index = ShapeIndex::load(&g2).unwrap();
        let err = index.view(&bad).unwrap().node_kinds().unwrap_err();
        assert!(matches!(err, ShapeError::ConflictingNodeKinds { .. }));
    }

    #[test]
    fn test_minting_strategy_resolution() {
        let mut g = Graph::new();
        let parent = typed_shape(&mut g, "http://example.org/Parent");
        g.add_triple(
            parent.clone(),
            Term::iri(gen::MINTING_STRATEGY),
            Term::iri(gen::MINT_SHA256),
        );
        let child = typed_shape(&mut g, "http://example.org/Child");
        g.add_triple(child.clone(), Term::iri(rdfs::SUB_CLASS_OF), parent);

        // Blank-only shape with no declaration anywhere defaults to BlankNode
        let blank_only = typed_shape(&mut g, "http://example.org/Anon");
        g.add_triple(
            blank_only.clone(),
            Term::iri(sh::NODE_KIND),
            Term::iri(sh::BLANK_NODE),
        );

        let index = ShapeIndex::load(&g).unwrap();
        assert_eq!(
            index.view(&child).unwrap().minting_strategy().unwrap(),
            MintingStrategy::Sha256
        );
        assert_eq!(
            index.view(&blank_only).unwrap().minting_strategy().unwrap(),
            MintingStrategy::BlankNode
        );
    }

    #[test]
    fn test_from_to_rdf_types() {
        let mut g = Graph::new();
        let shape = typed_shape(&mut g, "http://example.org/Person");
        g.add_triple(
            shape.clone(),
            Term::iri(gen::TO_RDF_TYPE),
            Term::iri("http://example.org/Agent"),
        );
        let index = ShapeIndex::load(&g).unwrap();
        let view = index.view(&shape).unwrap();
        assert_eq!(view.from_rdf_type().as_deref(), Some("http://example.org/Person"));
        assert_eq!(
            view.to_rdf_types(),
            vec![
                "http://example.org/Person".to_string(),
                "http://example.org/Agent".to_string()
            ]
        );
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("http://example.org/ns#foo"), "foo");
        assert_eq!(local_name("http://example.org/ns/bar"), "bar");
    }
}
