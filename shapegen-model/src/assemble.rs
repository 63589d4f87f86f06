//! Object model assembly
//!
//! One pass over the shape index produces the complete model: one
//! [`ObjectType`] per concrete node shape, one [`UnionType`] per surfaced
//! or/xone composite. Abstract shapes flatten into their descendants and
//! never materialize; extern and structural list shapes never materialize
//! either.
//!
//! Output order is dependency order: parents before children, referenced
//! types before referrers, declaration order otherwise. Reference cycles
//! between concrete types are permitted and broken at the back edge.

use crate::object::{IdentifierKind, ObjectProperty, ObjectType, UnionType, UnionTypeMember};
use rustc_hash::FxHashMap;
use shapegen_graph_ir::{Graph, Term};
use shapegen_shapes::{
    resolve_property_type, DeclarationStyle, NodeShapeRecord, PropertyShapeView, PropertyTypeKind,
    Result, ShapeError, ShapeIndex,
};

/// JSON identifier key when no ontology overrides it
pub const DEFAULT_IDENTIFIER_KEY: &str = "@id";
/// JSON discriminator key when no ontology overrides it
pub const DEFAULT_DISCRIMINATOR_KEY: &str = "type";

/// The assembled intermediate object model
#[derive(Debug)]
pub struct ObjectModel {
    /// JSON key carrying the instance identifier
    identifier_key: String,
    /// JSON key carrying the type tag
    discriminator_key: String,
    /// Object types in dependency order
    types: Vec<ObjectType>,
    unions: Vec<UnionType>,
    by_shape: FxHashMap<Term, usize>,
    by_name: FxHashMap<String, usize>,
    unions_by_shape: FxHashMap<Term, usize>,
}

impl ObjectModel {
    /// Assemble the model straight from a shapes graph
    pub fn from_graph(graph: &Graph) -> Result<Self> {
        let index = ShapeIndex::load(graph)?;
        Self::from_index(&index)
    }

    /// Assemble the model from an already-loaded shape index
    pub fn from_index(index: &ShapeIndex) -> Result<Self> {
        Assembler::new(index).run()
    }

    /// The JSON identifier key
    pub fn identifier_key(&self) -> &str {
        &self.identifier_key
    }

    /// The JSON discriminator key
    pub fn discriminator_key(&self) -> &str {
        &self.discriminator_key
    }

    /// Object types in dependency order
    pub fn object_types(&self) -> &[ObjectType] {
        &self.types
    }

    /// Surfaced unions in declaration order
    pub fn unions(&self) -> &[UnionType] {
        &self.unions
    }

    /// Object type by canonical name
    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.by_name.get(name).map(|&i| &self.types[i])
    }

    /// Object type by originating shape identifier
    pub fn object_type_for_shape(&self, shape_id: &Term) -> Option<&ObjectType> {
        self.by_shape.get(shape_id).map(|&i| &self.types[i])
    }

    /// Object type recognizing a given RDF type IRI
    pub fn object_type_for_rdf_type(&self, iri: &str) -> Option<&ObjectType> {
        self.types
            .iter()
            .find(|t| t.from_rdf_type.as_deref() == Some(iri))
    }

    /// Union by originating shape identifier
    pub fn union_for_shape(&self, shape_id: &Term) -> Option<&UnionType> {
        self.unions_by_shape.get(shape_id).map(|&i| &self.unions[i])
    }

    /// Union by canonical name
    pub fn union(&self, name: &str) -> Option<&UnionType> {
        self.unions.iter().find(|u| u.name == name)
    }
}

struct Assembler<'a> {
    index: &'a ShapeIndex,
    identifier_key: String,
    discriminator_key: String,
    declaration_style: DeclarationStyle,
}

impl<'a> Assembler<'a> {
    fn new(index: &'a ShapeIndex) -> Self {
        let ontology = index.ontologies().first();
        let identifier_key = ontology
            .and_then(|o| o.identifier_property_name.clone())
            .unwrap_or_else(|| DEFAULT_IDENTIFIER_KEY.to_string());
        let discriminator_key = ontology
            .and_then(|o| o.discriminator_property_name.clone())
            .unwrap_or_else(|| DEFAULT_DISCRIMINATOR_KEY.to_string());
        let declaration_style = ontology
            .map(|o| o.declaration_style)
            .unwrap_or_default();
        Assembler {
            index,
            identifier_key,
            discriminator_key,
            declaration_style,
        }
    }

    fn run(self) -> Result<ObjectModel> {
        let mut built: FxHashMap<Term, ObjectType> = FxHashMap::default();
        let mut unions = Vec::new();
        let mut unions_by_shape = FxHashMap::default();

        for record in self.index.node_shapes() {
            let view = self
                .index
                .view(&record.identifier)
                .ok_or_else(|| ShapeError::UnknownShapeReference {
                    referrer: record.identifier.to_string(),
                    referenced: record.identifier.to_string(),
                })?;
            if view.is_extern() || view.is_list() {
                continue;
            }
            if is_union_composite(record) {
                let union = self.build_union(record)?;
                unions_by_shape.insert(record.identifier.clone(), unions.len());
                unions.push(union);
                continue;
            }
            if view.is_abstract() {
                continue;
            }
            built.insert(record.identifier.clone(), self.build_object_type(record)?);
        }

        let types = self.dependency_order(built);

        let mut by_shape = FxHashMap::default();
        let mut by_name = FxHashMap::default();
        for (i, t) in types.iter().enumerate() {
            by_shape.insert(t.shape_id.clone(), i);
            by_name.insert(t.name.clone(), i);
        }

        tracing::debug!(
            object_types = types.len(),
            unions = unions.len(),
            "object model assembled"
        );

        Ok(ObjectModel {
            identifier_key: self.identifier_key,
            discriminator_key: self.discriminator_key,
            types,
            unions,
            by_shape,
            by_name,
            unions_by_shape,
        })
    }

    /// Flatten inherited fields and resolve everything the codecs need
    fn build_object_type(&self, record: &NodeShapeRecord) -> Result<ObjectType> {
        let view = self
            .index
            .view(&record.identifier)
            .ok_or_else(|| ShapeError::UnknownShapeReference {
                referrer: record.identifier.to_string(),
                referenced: record.identifier.to_string(),
            })?;

        // Parent fields first: walk ancestors farthest-first, then own.
        // A nearer declaration of an already-seen field name overrides in
        // place, keeping the original position.
        let mut properties: Vec<ObjectProperty> = Vec::new();
        let mut chain: Vec<&NodeShapeRecord> = self
            .index
            .ancestors(&record.identifier)
            .iter()
            .filter_map(|id| self.index.node_shape(id))
            .collect();
        chain.reverse();
        chain.push(record);
        for level in chain {
            for ps_id in &level.property_shape_ids {
                let ps = self.index.property_shape(ps_id).ok_or_else(|| {
                    ShapeError::UnknownShapeReference {
                        referrer: level.identifier.to_string(),
                        referenced: ps_id.to_string(),
                    }
                })?;
                let prop = self.build_property(ps, level)?;
                match properties.iter_mut().find(|p| p.name == prop.name) {
                    Some(existing) => *existing = prop,
                    None => properties.push(prop),
                }
            }
        }

        Ok(ObjectType {
            name: view.name(),
            shape_id: record.identifier.clone(),
            discriminator: view.discriminator_value(),
            parent: self.index.parents(&record.identifier).first().cloned(),
            properties,
            identifier_kind: IdentifierKind::from_node_kinds(view.node_kinds()?),
            minting: view.minting_strategy()?,
            from_rdf_type: view.from_rdf_type(),
            to_rdf_types: view.to_rdf_types(),
            features: view.features(),
            declaration_style: self.declaration_style,
            mutable: view.is_mutable(),
            labels: record.labels.clone(),
            comments: record.comments.clone(),
        })
    }

    fn build_property(
        &self,
        ps: &shapegen_shapes::PropertyShapeRecord,
        owner: &NodeShapeRecord,
    ) -> Result<ObjectProperty> {
        let view = PropertyShapeView::new(ps, owner);
        let ty = resolve_property_type(ps, self.index)?;
        Ok(ObjectProperty {
            name: view.name(),
            path: ps.path.clone(),
            ty,
            visibility: view.visibility(),
            mutable: view.is_mutable(),
            label: ps.names.first().cloned(),
            description: ps.descriptions.first().cloned(),
            display_order: view.order(),
            group: ps.group.clone(),
        })
    }

    /// Surface a top-level or/xone composite as a closed union
    ///
    /// Abstract members expand into their concrete descendants so every
    /// tag selects a materialized type. Two members resolving to the same
    /// tag is fatal.
    fn build_union(&self, record: &NodeShapeRecord) -> Result<UnionType> {
        let view = self
            .index
            .view(&record.identifier)
            .ok_or_else(|| ShapeError::UnknownShapeReference {
                referrer: record.identifier.to_string(),
                referenced: record.identifier.to_string(),
            })?;
        let declared = if !record.constraints.or.is_empty() {
            &record.constraints.or
        } else {
            &record.constraints.xone
        };

        let mut members: Vec<UnionTypeMember> = Vec::new();
        for member_id in declared {
            let member_view =
                self.index
                    .view(member_id)
                    .ok_or_else(|| ShapeError::UnknownShapeReference {
                        referrer: record.identifier.to_string(),
                        referenced: member_id.to_string(),
                    })?;
            let mut concrete = Vec::new();
            if member_view.is_abstract() {
                for descendant in self.index.descendants(member_id) {
                    if let Some(v) = self.index.view(descendant) {
                        if !v.is_abstract() && !v.is_extern() {
                            concrete.push((v.discriminator_value(), descendant.clone()));
                        }
                    }
                }
            } else {
                concrete.push((member_view.discriminator_value(), member_id.clone()));
            }
            for (tag, shape_id) in concrete {
                if members.iter().any(|m| m.tag == tag) {
                    return Err(ShapeError::DuplicateDiscriminator {
                        union: record.identifier.to_string(),
                        tag,
                    });
                }
                members.push(UnionTypeMember { tag, shape_id });
            }
        }

        Ok(UnionType {
            name: view.name(),
            shape_id: record.identifier.clone(),
            discriminator_key: self.discriminator_key.clone(),
            members,
        })
    }

    /// Order built types so dependencies come first
    fn dependency_order(&self, mut built: FxHashMap<Term, ObjectType>) -> Vec<ObjectType> {
        let mut out = Vec::with_capacity(built.len());
        let mut visiting: Vec<Term> = Vec::new();
        let mut done: Vec<Term> = Vec::new();

        fn visit(
            id: &Term,
            index: &ShapeIndex,
            built: &mut FxHashMap<Term, ObjectType>,
            visiting: &mut Vec<Term>,
            done: &mut Vec<Term>,
            out: &mut Vec<ObjectType>,
        ) {
            if done.contains(id) || visiting.contains(id) || !built.contains_key(id) {
                return;
            }
            visiting.push(id.clone());
            let deps = dependencies_of(&built[id], index);
            for dep in deps {
                visit(&dep, index, built, visiting, done, out);
            }
            visiting.pop();
            done.push(id.clone());
            if let Some(t) = built.remove(id) {
                out.push(t);
            }
        }

        for id in self.index.node_shape_order() {
            visit(
                id,
                self.index,
                &mut built,
                &mut visiting,
                &mut done,
                &mut out,
            );
        }
        out
    }
}

/// A node shape whose only constraint is a logical or/xone composite
fn is_union_composite(record: &NodeShapeRecord) -> bool {
    let bag = &record.constraints;
    (!bag.or.is_empty() || !bag.xone.is_empty())
        && record.property_shape_ids.is_empty()
        && bag.datatype.is_none()
        && bag.classes.is_empty()
        && bag.node.is_empty()
        && bag.in_values.is_none()
        && bag.has_value.is_none()
}

/// Parents plus object-reference targets, declaration order
fn dependencies_of(t: &ObjectType, index: &ShapeIndex) -> Vec<Term> {
    let mut deps: Vec<Term> = index.parents(&t.shape_id).to_vec();
    for prop in &t.properties {
        collect_reference_targets(&prop.ty.kind, &mut deps);
    }
    deps
}

fn collect_reference_targets(kind: &PropertyTypeKind, out: &mut Vec<Term>) {
    match kind {
        PropertyTypeKind::ObjectReference { target, is_extern } => {
            if !is_extern && !out.contains(target) {
                out.push(target.clone());
            }
        }
        PropertyTypeKind::List(element) => collect_reference_targets(&element.kind, out),
        PropertyTypeKind::Union { members } => {
            for m in members {
                collect_reference_targets(&m.kind, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shapegen_vocab::{gen, rdf, rdfs, sh, xsd};

    fn class_shape(g: &mut Graph, iri: &str) -> Term {
        let s = Term::iri(iri);
        g.add_triple(s.clone(), Term::iri(rdf::TYPE), Term::iri(sh::NODE_SHAPE));
        g.add_triple(s.clone(), Term::iri(rdf::TYPE), Term::iri(rdfs::CLASS));
        s
    }

    fn string_property(g: &mut Graph, shape: &Term, label: &str, predicate: &str) {
        let ps = Term::blank(label);
        g.add_triple(shape.clone(), Term::iri(sh::PROPERTY), ps.clone());
        g.add_triple(ps.clone(), Term::iri(sh::PATH), Term::iri(predicate));
        g.add_triple(ps, Term::iri(sh::DATATYPE), Term::iri(xsd::STRING));
    }

    #[test]
    fn test_inherited_fields_flatten_parent_first() {
        let mut g = Graph::new();
        let parent = class_shape(&mut g, "http://example.org/Agent");
        string_property(&mut g, &parent, "p0", "http://example.org/label");
        let child = class_shape(&mut g, "http://example.org/Person");
        g.add_triple(child.clone(), Term::iri(rdfs::SUB_CLASS_OF), parent);
        string_property(&mut g, &child, "p1", "http://example.org/name");

        let model = ObjectModel::from_graph(&g).unwrap();
        let person = model.object_type("Person").unwrap();
        let names: Vec<_> = person.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["label", "name"]);
        assert_eq!(
            person.parent.as_ref().and_then(Term::as_iri),
            Some("http://example.org/Agent")
        );
    }

    #[test]
    fn test_abstract_shape_never_materializes() {
        let mut g = Graph::new();
        let base = class_shape(&mut g, "http://example.org/Base");
        g.add_triple(base.clone(), Term::iri(gen::ABSTRACT), Term::boolean(true));
        string_property(&mut g, &base, "p0", "http://example.org/label");
        let leaf = class_shape(&mut g, "http://example.org/Leaf");
        g.add_triple(leaf, Term::iri(rdfs::SUB_CLASS_OF), base);

        let model = ObjectModel::from_graph(&g).unwrap();
        assert!(model.object_type("Base").is_none());
        let leaf = model.object_type("Leaf").unwrap();
        assert_eq!(leaf.properties.len(), 1);
        assert_eq!(leaf.properties[0].name, "label");
    }

    #[test]
    fn test_dependency_order_referenced_first() {
        let mut g = Graph::new();
        // Declared referrer-first; output must be referenced-first
        let order_shape = class_shape(&mut g, "http://example.org/Order");
        let ps = Term::blank("p0");
        g.add_triple(order_shape, Term::iri(sh::PROPERTY), ps.clone());
        g.add_triple(ps.clone(), Term::iri(sh::PATH), Term::iri("http://example.org/item"));
        g.add_triple(ps, Term::iri(sh::NODE), Term::iri("http://example.org/Item"));
        class_shape(&mut g, "http://example.org/Item");

        let model = ObjectModel::from_graph(&g).unwrap();
        let names: Vec<_> = model.object_types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Item", "Order"]);
    }

    #[test]
    fn test_union_surfacing_and_duplicate_tags() {
        let mut g = Graph::new();
        class_shape(&mut g, "http://example.org/Cat");
        class_shape(&mut g, "http://example.org/Dog");
        let pet = Term::iri("http://example.org/Pet");
        g.add_triple(pet.clone(), Term::iri(rdf::TYPE), Term::iri(sh::NODE_SHAPE));
        g.add_triple(pet.clone(), Term::iri(sh::OR), Term::blank("l0"));
        g.add_triple(
            Term::blank("l0"),
            Term::iri(rdf::FIRST),
            Term::iri("http://example.org/Cat"),
        );
        g.add_triple(Term::blank("l0"), Term::iri(rdf::REST), Term::blank("l1"));
        g.add_triple(
            Term::blank("l1"),
            Term::iri(rdf::FIRST),
            Term::iri("http://example.org/Dog"),
        );
        g.add_triple(Term::blank("l1"), Term::iri(rdf::REST), Term::iri(rdf::NIL));

        let model = ObjectModel::from_graph(&g).unwrap();
        let union = model.union("Pet").unwrap();
        let tags: Vec<_> = union.members.iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags, vec!["Cat", "Dog"]);

        // Two members with the same gen:name collide
        let mut g2 = Graph::new();
        let cat = class_shape(&mut g2, "http://example.org/Cat");
        g2.add_triple(cat, Term::iri(gen::NAME), Term::string("Animal"));
        let dog = class_shape(&mut g2, "http://example.org/Dog");
        g2.add_triple(dog, Term::iri(gen::NAME), Term::string("Animal"));
        let pet = Term::iri("http://example.org/Pet");
        g2.add_triple(pet.clone(), Term::iri(rdf::TYPE), Term::iri(sh::NODE_SHAPE));
        g2.add_triple(pet, Term::iri(sh::OR), Term::blank("l0"));
        g2.add_triple(
            Term::blank("l0"),
            Term::iri(rdf::FIRST),
            Term::iri("http://example.org/Cat"),
        );
        g2.add_triple(Term::blank("l0"), Term::iri(rdf::REST), Term::blank("l1"));
        g2.add_triple(
            Term::blank("l1"),
            Term::iri(rdf::FIRST),
            Term::iri("http://example.org/Dog"),
        );
        g2.add_triple(Term::blank("l1"), Term::iri(rdf::REST), Term::iri(rdf::NIL));
        let err = ObjectModel::from_graph(&g2).unwrap_err();
        assert!(matches!(err, ShapeError::DuplicateDiscriminator { .. }));
    }

    #[test]
    fn test_ontology_key_overrides() {
        let mut g = Graph::new();
        let ont = Term::iri("http://example.org/");
        g.add_triple(ont.clone(), Term::iri(rdf::TYPE), Term::iri(shapegen_vocab::owl::ONTOLOGY));
        g.add_triple(
            ont.clone(),
            Term::iri(gen::IDENTIFIER_PROPERTY_NAME),
            Term::string("id"),
        );
        g.add_triple(
            ont.clone(),
            Term::iri(gen::DISCRIMINATOR_PROPERTY_NAME),
            Term::string("kind"),
        );
        g.add_triple(
            ont,
            Term::iri(gen::DECLARATION_STYLE),
            Term::string("interface"),
        );
        class_shape(&mut g, "http://example.org/Thing");

        let model = ObjectModel::from_graph(&g).unwrap();
        assert_eq!(model.identifier_key(), "id");
        assert_eq!(model.discriminator_key(), "kind");
        let thing = model.object_type("Thing").unwrap();
        assert_eq!(
            thing.declaration_style,
            shapegen_shapes::DeclarationStyle::Interface
        );
    }
}
