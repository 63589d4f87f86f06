//! Shape loader: graph resources → typed shape records
//!
//! Records are immutable once loaded. Every scalar field is read with
//! first-match-wins semantics and every plural field collects all values
//! in graph order, per the resource reader contract. Absence of an
//! optional field is never an error.
//!
//! Records verify RDF-type membership unless told to skip the check; the
//! skip path exists so a supertype decoder can re-read an already-typed
//! resource from a subclass context.

use crate::{Result, ShapeError};
use shapegen_graph_ir::{GraphValue, Resource, Term};
use shapegen_vocab::{gen, owl, rdfs, sh};

/// One parsed sh:nodeKind atom
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermKind {
    BlankNode,
    NamedNode,
    Literal,
}

impl TermKind {
    /// Expand a sh:nodeKind IRI into its atoms
    ///
    /// Compound kinds (e.g. sh:BlankNodeOrIRI) expand to multiple atoms.
    /// Returns an empty vector for unrecognized IRIs.
    pub fn parse(iri: &str) -> Vec<TermKind> {
        match iri {
            sh::BLANK_NODE => vec![TermKind::BlankNode],
            sh::IRI => vec![TermKind::NamedNode],
            sh::LITERAL => vec![TermKind::Literal],
            sh::BLANK_NODE_OR_IRI => vec![TermKind::BlankNode, TermKind::NamedNode],
            sh::BLANK_NODE_OR_LITERAL => vec![TermKind::BlankNode, TermKind::Literal],
            sh::IRI_OR_LITERAL => vec![TermKind::NamedNode, TermKind::Literal],
            _ => Vec::new(),
        }
    }
}

/// Identifier minting strategy for instances of a shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MintingStrategy {
    /// Fresh opaque blank identifier
    BlankNode,
    /// Content hash of the object's own fields, as a URN
    Sha256,
    /// Random UUID, as a URN
    Uuidv4,
    /// No minting: the identifier must be supplied
    #[default]
    None,
}

/// Field visibility in the generated object model
///
/// Protected and private fields still participate in the canonical
/// contract (equality, hashing, codecs); they are just not exposed
/// outside the defining module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// Object declaration style hint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationStyle {
    #[default]
    Class,
    Interface,
}

/// One independently toggleable codec capability
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Construct,
    Equals,
    Hash,
    Json,
    Graph,
    Query,
    JsonSchema,
    UiSchema,
}

impl Feature {
    /// All capabilities, in canonical order
    pub const ALL: [Feature; 8] = [
        Feature::Construct,
        Feature::Equals,
        Feature::Hash,
        Feature::Json,
        Feature::Graph,
        Feature::Query,
        Feature::JsonSchema,
        Feature::UiSchema,
    ];

    fn parse(iri: &str) -> Option<Feature> {
        match iri {
            gen::FEATURE_CONSTRUCT => Some(Feature::Construct),
            gen::FEATURE_EQUALS => Some(Feature::Equals),
            gen::FEATURE_HASH => Some(Feature::Hash),
            gen::FEATURE_JSON => Some(Feature::Json),
            gen::FEATURE_GRAPH => Some(Feature::Graph),
            gen::FEATURE_QUERY => Some(Feature::Query),
            gen::FEATURE_JSON_SCHEMA => Some(Feature::JsonSchema),
            gen::FEATURE_UI_SCHEMA => Some(Feature::UiSchema),
            _ => None,
        }
    }
}

/// Raw declarative constraints of a shape, straight off the graph
///
/// No interpretation happens here; the property type resolver and the
/// semantic views derive meaning later.
#[derive(Clone, Debug, Default)]
pub struct ConstraintBag {
    /// sh:datatype IRI
    pub datatype: Option<String>,
    /// sh:class IRIs, in graph order
    pub classes: Vec<String>,
    /// Expanded sh:nodeKind atoms, declaration order, deduplicated
    pub node_kinds: Vec<TermKind>,
    /// sh:minCount
    pub min_count: Option<i64>,
    /// sh:maxCount
    pub max_count: Option<i64>,
    /// sh:in - closed enumerated value set (list order preserved)
    pub in_values: Option<Vec<Term>>,
    /// sh:hasValue - single fixed permitted value
    pub has_value: Option<Term>,
    /// sh:pattern
    pub pattern: Option<String>,
    /// sh:flags for sh:pattern
    pub flags: Option<String>,
    /// sh:minLength
    pub min_length: Option<i64>,
    /// sh:maxLength
    pub max_length: Option<i64>,
    /// sh:languageIn tags
    pub language_in: Vec<String>,
    /// sh:uniqueLang
    pub unique_lang: bool,
    /// sh:defaultValue
    pub default_value: Option<Term>,
    /// sh:node shape references
    pub node: Vec<Term>,
    /// sh:and member shape identifiers (list order)
    pub and: Vec<Term>,
    /// sh:or member shape identifiers (list order)
    pub or: Vec<Term>,
    /// sh:xone member shape identifiers (list order)
    pub xone: Vec<Term>,
    /// sh:not shape references
    pub not: Vec<Term>,
}

impl ConstraintBag {
    /// Read the raw constraint bag off a resource
    pub fn from_resource(r: &Resource<'_>) -> Result<Self> {
        let mut bag = ConstraintBag::default();

        if let Some(v) = r.first_of(sh::DATATYPE) {
            bag.datatype = Some(v.to_iri()?.to_string());
        }
        for v in r.values_of(sh::CLASS) {
            bag.classes.push(v.to_iri()?.to_string());
        }
        for v in r.values_of(sh::NODE_KIND) {
            for kind in TermKind::parse(v.to_iri()?) {
                if !bag.node_kinds.contains(&kind) {
                    bag.node_kinds.push(kind);
                }
            }
        }
        if let Some(v) = r.first_of(sh::MIN_COUNT) {
            bag.min_count = Some(v.to_integer()?);
        }
        if let Some(v) = r.first_of(sh::MAX_COUNT) {
            bag.max_count = Some(v.to_integer()?);
        }
        if let Some(v) = r.first_of(sh::IN) {
            let values = v
                .to_list()?
                .iter()
                .map(|item| item.term().clone())
                .collect();
            bag.in_values = Some(values);
        }
        if let Some(v) = r.first_of(sh::HAS_VALUE) {
            bag.has_value = Some(v.term().clone());
        }
        if let Some(v) = r.first_of(sh::PATTERN) {
            bag.pattern = Some(v.to_string_value()?.to_string());
        }
        if let Some(v) = r.first_of(sh::FLAGS) {
            bag.flags = Some(v.to_string_value()?.to_string());
        }
        if let Some(v) = r.first_of(sh::MIN_LENGTH) {
            bag.min_length = Some(v.to_integer()?);
        }
        if let Some(v) = r.first_of(sh::MAX_LENGTH) {
            bag.max_length = Some(v.to_integer()?);
        }
        if let Some(v) = r.first_of(sh::LANGUAGE_IN) {
            for item in v.to_list()? {
                bag.language_in.push(item.to_string_value()?.to_string());
            }
        }
        if let Some(v) = r.first_of(sh::UNIQUE_LANG) {
            bag.unique_lang = v.to_boolean()?;
        }
        if let Some(v) = r.first_of(sh::DEFAULT_VALUE) {
            bag.default_value = Some(v.term().clone());
        }
        for v in r.values_of(sh::NODE) {
            bag.node.push(v.to_identifier()?);
        }
        bag.and = read_shape_list(r, sh::AND)?;
        bag.or = read_shape_list(r, sh::OR)?;
        bag.xone = read_shape_list(r, sh::XONE)?;
        for v in r.values_of(sh::NOT) {
            bag.not.push(v.to_identifier()?);
        }

        Ok(bag)
    }
}

/// Read a logical-combinator member list (sh:and / sh:or / sh:xone)
fn read_shape_list(r: &Resource<'_>, predicate: &str) -> Result<Vec<Term>> {
    let mut members = Vec::new();
    if let Some(v) = r.first_of(predicate) {
        for item in v.to_list()? {
            members.push(item.to_identifier()?);
        }
    }
    Ok(members)
}

/// Extension-vocabulary fields shared by node and property shapes
#[derive(Clone, Debug, Default)]
pub struct ExtensionFields {
    /// gen:abstract
    pub is_abstract: Option<bool>,
    /// gen:extern
    pub is_extern: Option<bool>,
    /// gen:mutable
    pub mutable: Option<bool>,
    /// gen:visibility
    pub visibility: Option<Visibility>,
    /// gen:mintingStrategy
    pub minting_strategy: Option<MintingStrategy>,
    /// gen:name override
    pub name: Option<String>,
    /// gen:fromRdfType
    pub from_rdf_type: Option<String>,
    /// gen:toRdfType values, in graph order
    pub to_rdf_types: Vec<String>,
    /// gen:includeFeature values
    pub include_features: Vec<Feature>,
    /// gen:excludeFeature values
    pub exclude_features: Vec<Feature>,
    /// gen:list
    pub is_list: bool,
}

impl ExtensionFields {
    fn from_resource(r: &Resource<'_>) -> Result<Self> {
        let mut ext = ExtensionFields::default();

        if let Some(v) = r.first_of(gen::ABSTRACT) {
            ext.is_abstract = Some(v.to_boolean()?);
        }
        if let Some(v) = r.first_of(gen::EXTERN) {
            ext.is_extern = Some(v.to_boolean()?);
        }
        if let Some(v) = r.first_of(gen::MUTABLE) {
            ext.mutable = Some(v.to_boolean()?);
        }
        if let Some(v) = r.first_of(gen::VISIBILITY) {
            ext.visibility = Some(parse_visibility(r, &v)?);
        }
        if let Some(v) = r.first_of(gen::MINTING_STRATEGY) {
            ext.minting_strategy = Some(parse_minting_strategy(r, &v)?);
        }
        if let Some(v) = r.first_of(gen::NAME) {
            ext.name = Some(v.to_string_value()?.to_string());
        }
        if let Some(v) = r.first_of(gen::FROM_RDF_TYPE) {
            ext.from_rdf_type = Some(v.to_iri()?.to_string());
        }
        for v in r.values_of(gen::TO_RDF_TYPE) {
            ext.to_rdf_types.push(v.to_iri()?.to_string());
        }
        ext.include_features = read_features(r, gen::INCLUDE_FEATURE)?;
        ext.exclude_features = read_features(r, gen::EXCLUDE_FEATURE)?;
        if let Some(v) = r.first_of(gen::LIST) {
            ext.is_list = v.to_boolean()?;
        }

        Ok(ext)
    }
}

fn read_features(r: &Resource<'_>, predicate: &str) -> Result<Vec<Feature>> {
    let mut features = Vec::new();
    for v in r.values_of(predicate) {
        let iri = v.to_iri()?;
        let feature = Feature::parse(iri).ok_or_else(|| ShapeError::InvalidVocabularyValue {
            shape: r.subject().to_string(),
            predicate: predicate.to_string(),
            value: iri.to_string(),
        })?;
        if !features.contains(&feature) {
            features.push(feature);
        }
    }
    Ok(features)
}

fn parse_visibility(r: &Resource<'_>, v: &GraphValue<'_>) -> Result<Visibility> {
    match v.to_string_value()? {
        "public" => Ok(Visibility::Public),
        "protected" => Ok(Visibility::Protected),
        "private" => Ok(Visibility::Private),
        other => Err(ShapeError::InvalidVocabularyValue {
            shape: r.subject().to_string(),
            predicate: gen::VISIBILITY.to_string(),
            value: other.to_string(),
        }),
    }
}

fn parse_minting_strategy(r: &Resource<'_>, v: &GraphValue<'_>) -> Result<MintingStrategy> {
    let iri = v.to_iri()?;
    match iri {
        gen::MINT_BLANK_NODE => Ok(MintingStrategy::BlankNode),
        gen::MINT_SHA256 => Ok(MintingStrategy::Sha256),
        gen::MINT_UUIDV4 => Ok(MintingStrategy::Uuidv4),
        gen::MINT_NONE => Ok(MintingStrategy::None),
        other => Err(ShapeError::InvalidVocabularyValue {
            shape: r.subject().to_string(),
            predicate: gen::MINTING_STRATEGY.to_string(),
            value: other.to_string(),
        }),
    }
}

/// A property path
///
/// Most paths are a single predicate; sequence, inverse, and alternative
/// paths cover the structured cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyPath {
    /// Plain predicate IRI
    Predicate(String),
    /// sh:inversePath
    Inverse(Box<PropertyPath>),
    /// RDF-list sequence path
    Sequence(Vec<PropertyPath>),
    /// sh:alternativePath
    Alternative(Vec<PropertyPath>),
}

impl PropertyPath {
    /// Parse a sh:path value
    pub fn from_value(v: &GraphValue<'_>) -> Result<Self> {
        if let Some(iri) = v.term().as_iri() {
            return Ok(PropertyPath::Predicate(iri.to_string()));
        }
        // Blank node: inverse, alternative, or a sequence list
        let r = v.to_resource()?;
        if let Some(inner) = r.first_of(sh::INVERSE_PATH) {
            return Ok(PropertyPath::Inverse(Box::new(PropertyPath::from_value(
                &inner,
            )?)));
        }
        if let Some(alts) = r.first_of(sh::ALTERNATIVE_PATH) {
            let members = alts
                .to_list()?
                .iter()
                .map(PropertyPath::from_value)
                .collect::<Result<Vec<_>>>()?;
            return Ok(PropertyPath::Alternative(members));
        }
        let steps = v
            .to_list()?
            .iter()
            .map(PropertyPath::from_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(PropertyPath::Sequence(steps))
    }

    /// The single predicate IRI, if this is a plain path
    pub fn as_predicate(&self) -> Option<&str> {
        match self {
            PropertyPath::Predicate(iri) => Some(iri),
            _ => None,
        }
    }

    /// Render as a SPARQL property path expression
    pub fn to_sparql(&self) -> String {
        match self {
            PropertyPath::Predicate(iri) => format!("<{}>", iri),
            PropertyPath::Inverse(inner) => format!("^{}", inner.to_sparql()),
            PropertyPath::Sequence(steps) => steps
                .iter()
                .map(|s| s.to_sparql())
                .collect::<Vec<_>>()
                .join("/"),
            PropertyPath::Alternative(alts) => format!(
                "({})",
                alts.iter()
                    .map(|s| s.to_sparql())
                    .collect::<Vec<_>>()
                    .join("|")
            ),
        }
    }
}

/// A decoded ontology resource
///
/// Its extension-vocabulary settings act as defaults inherited by every
/// shape it defines.
#[derive(Clone, Debug)]
pub struct OntologyRecord {
    pub identifier: Term,
    pub labels: Vec<String>,
    pub include_features: Vec<Feature>,
    pub exclude_features: Vec<Feature>,
    pub declaration_style: DeclarationStyle,
    /// JSON identifier key default for shapes of this ontology
    pub identifier_property_name: Option<String>,
    /// JSON type-tag key default for shapes of this ontology
    pub discriminator_property_name: Option<String>,
}

impl OntologyRecord {
    /// Decode an owl:Ontology resource
    pub fn from_resource(r: &Resource<'_>, check_type: bool) -> Result<Self> {
        if check_type && !r.is_instance_of(owl::ONTOLOGY) {
            return Err(r.unexpected_type(owl::ONTOLOGY).into());
        }
        let mut labels = Vec::new();
        for v in r.values_of(rdfs::LABEL) {
            labels.push(v.to_string_value()?.to_string());
        }
        let declaration_style = match r.first_of(gen::DECLARATION_STYLE) {
            Some(v) => match v.to_string_value()? {
                "class" => DeclarationStyle::Class,
                "interface" => DeclarationStyle::Interface,
                other => {
                    return Err(ShapeError::InvalidVocabularyValue {
                        shape: r.subject().to_string(),
                        predicate: gen::DECLARATION_STYLE.to_string(),
                        value: other.to_string(),
                    })
                }
            },
            None => DeclarationStyle::default(),
        };
        let identifier_property_name = r
            .first_of(gen::IDENTIFIER_PROPERTY_NAME)
            .map(|v| v.to_string_value().map(str::to_string))
            .transpose()?;
        let discriminator_property_name = r
            .first_of(gen::DISCRIMINATOR_PROPERTY_NAME)
            .map(|v| v.to_string_value().map(str::to_string))
            .transpose()?;

        Ok(OntologyRecord {
            identifier: r.subject().clone(),
            labels,
            include_features: read_features(r, gen::INCLUDE_FEATURE)?,
            exclude_features: read_features(r, gen::EXCLUDE_FEATURE)?,
            declaration_style,
            identifier_property_name,
            discriminator_property_name,
        })
    }
}

/// A decoded sh:PropertyGroup resource
#[derive(Clone, Debug)]
pub struct PropertyGroupRecord {
    pub identifier: Term,
    pub label: Option<String>,
    pub order: Option<i64>,
}

impl PropertyGroupRecord {
    /// Decode a sh:PropertyGroup resource
    pub fn from_resource(r: &Resource<'_>, check_type: bool) -> Result<Self> {
        if check_type && !r.is_instance_of(sh::PROPERTY_GROUP) {
            return Err(r.unexpected_type(sh::PROPERTY_GROUP).into());
        }
        let label = r
            .first_of(rdfs::LABEL)
            .map(|v| v.to_string_value().map(str::to_string))
            .transpose()?;
        let order = r.first_of(sh::ORDER).map(|v| v.to_integer()).transpose()?;
        Ok(PropertyGroupRecord {
            identifier: r.subject().clone(),
            label,
            order,
        })
    }
}

/// A decoded sh:NodeShape resource
#[derive(Clone, Debug)]
pub struct NodeShapeRecord {
    pub identifier: Term,
    pub constraints: ConstraintBag,
    pub ext: ExtensionFields,
    /// Whether the shape is also an rdfs:Class / owl:Class
    pub is_class: bool,
    /// sh:property references, in graph order (= declaration order)
    pub property_shape_ids: Vec<Term>,
    /// rdfs:subClassOf IRIs, in graph order
    pub sub_class_of: Vec<String>,
    pub labels: Vec<String>,
    pub comments: Vec<String>,
}

impl NodeShapeRecord {
    /// Decode a sh:NodeShape resource
    ///
    /// `check_type` is skipped when decoding an already-typed super-shape
    /// from a subclass context.
    pub fn from_resource(r: &Resource<'_>, check_type: bool) -> Result<Self> {
        if check_type && !r.is_instance_of(sh::NODE_SHAPE) {
            return Err(r.unexpected_type(sh::NODE_SHAPE).into());
        }
        let is_class = r.is_instance_of(rdfs::CLASS) || r.is_instance_of(owl::CLASS);

        let mut property_shape_ids = Vec::new();
        for v in r.values_of(sh::PROPERTY) {
            property_shape_ids.push(v.to_identifier()?);
        }
        let mut sub_class_of = Vec::new();
        for v in r.values_of(rdfs::SUB_CLASS_OF) {
            sub_class_of.push(v.to_iri()?.to_string());
        }
        let mut labels = Vec::new();
        for v in r.values_of(rdfs::LABEL) {
            labels.push(v.to_string_value()?.to_string());
        }
        let mut comments = Vec::new();
        for v in r.values_of(rdfs::COMMENT) {
            comments.push(v.to_string_value()?.to_string());
        }

        Ok(NodeShapeRecord {
            identifier: r.subject().clone(),
            constraints: ConstraintBag::from_resource(r)?,
            ext: ExtensionFields::from_resource(r)?,
            is_class,
            property_shape_ids,
            sub_class_of,
            labels,
            comments,
        })
    }
}

/// A decoded sh:PropertyShape resource
#[derive(Clone, Debug)]
pub struct PropertyShapeRecord {
    pub identifier: Term,
    pub path: PropertyPath,
    pub constraints: ConstraintBag,
    pub ext: ExtensionFields,
    /// sh:name values (display)
    pub names: Vec<String>,
    /// sh:description values (display)
    pub descriptions: Vec<String>,
    /// sh:order (display ordering, not canonical codec ordering)
    pub order: Option<i64>,
    /// sh:group reference
    pub group: Option<Term>,
}

impl PropertyShapeRecord {
    /// Decode a sh:PropertyShape resource
    ///
    /// Property shapes referenced via sh:property are frequently blank
    /// nodes without an explicit rdf:type; pass `check_type = false` for
    /// those.
    pub fn from_resource(r: &Resource<'_>, check_type: bool) -> Result<Self> {
        if check_type && !r.is_instance_of(sh::PROPERTY_SHAPE) {
            return Err(r.unexpected_type(sh::PROPERTY_SHAPE).into());
        }
        let path_value = r.require(sh::PATH)?;
        let path = PropertyPath::from_value(&path_value)?;

        let mut names = Vec::new();
        for v in r.values_of(sh::NAME) {
            names.push(v.to_string_value()?.to_string());
        }
        let mut descriptions = Vec::new();
        for v in r.values_of(sh::DESCRIPTION) {
            descriptions.push(v.to_string_value()?.to_string());
        }
        let order = r.first_of(sh::ORDER).map(|v| v.to_integer()).transpose()?;
        let group = r
            .first_of(sh::GROUP)
            .map(|v| v.to_identifier())
            .transpose()?;

        Ok(PropertyShapeRecord {
            identifier: r.subject().clone(),
            path,
            constraints: ConstraintBag::from_resource(r)?,
            ext: ExtensionFields::from_resource(r)?,
            names,
            descriptions,
            order,
            group,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapegen_graph_ir::Graph;
    use shapegen_vocab::rdf;

    fn shape_graph() -> Graph {
        let mut g = Graph::new();
        let shape = Term::iri("http://example.org/PersonShape");
        g.add_triple(shape.clone(), Term::iri(rdf::TYPE), Term::iri(sh::NODE_SHAPE));
        g.add_triple(shape.clone(), Term::iri(rdf::TYPE), Term::iri(rdfs::CLASS));
        g.add_triple(shape.clone(), Term::iri(sh::PROPERTY), Term::blank("p0"));
        g.add_triple(
            Term::blank("p0"),
            Term::iri(sh::PATH),
            Term::iri("http://example.org/name"),
        );
        g.add_triple(Term::blank("p0"), Term::iri(sh::MIN_COUNT), Term::integer(1));
        g.add_triple(Term::blank("p0"), Term::iri(sh::MAX_COUNT), Term::integer(1));
        g.add_triple(
            Term::blank("p0"),
            Term::iri(sh::DATATYPE),
            Term::iri(shapegen_vocab::xsd::STRING),
        );
        g
    }

    #[test]
    fn test_node_shape_decode() {
        let g = shape_graph();
        let r = g.resource(Term::iri("http://example.org/PersonShape"));
        let record = NodeShapeRecord::from_resource(&r, true).unwrap();
        assert!(record.is_class);
        assert_eq!(record.property_shape_ids.len(), 1);
    }

    #[test]
    fn test_type_check_enforced_and_skippable() {
        let g = shape_graph();
        let r = g.resource(Term::blank("p0"));
        // A blank property shape has no rdf:type, so the check fails ...
        assert!(NodeShapeRecord::from_resource(&r, true).is_err());
        // ... but PropertyShape decode with check skipped works
        let ps = PropertyShapeRecord::from_resource(&r, false).unwrap();
        assert_eq!(ps.path.as_predicate(), Some("http://example.org/name"));
        assert_eq!(ps.constraints.min_count, Some(1));
    }

    #[test]
    fn test_property_path_sparql() {
        let p = PropertyPath::Sequence(vec![
            PropertyPath::Predicate("http://example.org/a".into()),
            PropertyPath::Inverse(Box::new(PropertyPath::Predicate(
                "http://example.org/b".into(),
            ))),
        ]);
        assert_eq!(
            p.to_sparql(),
            "<http://example.org/a>/^<http://example.org/b>"
        );
    }

    #[test]
    fn test_node_kind_expansion() {
        assert_eq!(
            TermKind::parse(sh::BLANK_NODE_OR_IRI),
            vec![TermKind::BlankNode, TermKind::NamedNode]
        );
        assert!(TermKind::parse("http://example.org/nonsense").is_empty());
    }
}
