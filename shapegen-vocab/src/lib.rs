//! RDF vocabulary constants for the shapegen compiler
//!
//! This crate is the single home for vocabulary IRIs used across the
//! shapegen workspace.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `owl` - OWL vocabulary (http://www.w3.org/2002/07/owl#)
//! - `sh` - SHACL vocabulary (http://www.w3.org/ns/shacl#)
//! - `gen` - the generator extension vocabulary carrying code-generation
//!   hints (https://ns.shapegen.dev/generator#)

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:first IRI (RDF list head)
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

    /// rdf:rest IRI (RDF list tail)
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

    /// rdf:nil IRI (RDF list terminator)
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:subClassOf IRI
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    /// rdfs:Class IRI
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:comment IRI
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
}

/// OWL vocabulary constants
pub mod owl {
    /// owl:Ontology IRI
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";

    /// owl:Class IRI
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
}

/// XSD vocabulary constants
pub mod xsd {
    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}

/// SHACL vocabulary constants
pub mod sh {
    /// sh:NodeShape IRI
    pub const NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";

    /// sh:PropertyShape IRI
    pub const PROPERTY_SHAPE: &str = "http://www.w3.org/ns/shacl#PropertyShape";

    /// sh:PropertyGroup IRI
    pub const PROPERTY_GROUP: &str = "http://www.w3.org/ns/shacl#PropertyGroup";

    /// sh:property IRI
    pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";

    /// sh:path IRI
    pub const PATH: &str = "http://www.w3.org/ns/shacl#path";

    /// sh:inversePath IRI
    pub const INVERSE_PATH: &str = "http://www.w3.org/ns/shacl#inversePath";

    /// sh:alternativePath IRI
    pub const ALTERNATIVE_PATH: &str = "http://www.w3.org/ns/shacl#alternativePath";

    /// sh:node IRI (shape-level is-a link)
    pub const NODE: &str = "http://www.w3.org/ns/shacl#node";

    /// sh:datatype IRI
    pub const DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";

    /// sh:class IRI
    pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";

    /// sh:nodeKind IRI
    pub const NODE_KIND: &str = "http://www.w3.org/ns/shacl#nodeKind";

    /// sh:minCount IRI
    pub const MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";

    /// sh:maxCount IRI
    pub const MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";

    /// sh:in IRI
    pub const IN: &str = "http://www.w3.org/ns/shacl#in";

    /// sh:hasValue IRI
    pub const HAS_VALUE: &str = "http://www.w3.org/ns/shacl#hasValue";

    /// sh:pattern IRI
    pub const PATTERN: &str = "http://www.w3.org/ns/shacl#pattern";

    /// sh:flags IRI
    pub const FLAGS: &str = "http://www.w3.org/ns/shacl#flags";

    /// sh:minLength IRI
    pub const MIN_LENGTH: &str = "http://www.w3.org/ns/shacl#minLength";

    /// sh:maxLength IRI
    pub const MAX_LENGTH: &str = "http://www.w3.org/ns/shacl#maxLength";

    /// sh:languageIn IRI
    pub const LANGUAGE_IN: &str = "http://www.w3.org/ns/shacl#languageIn";

    /// sh:uniqueLang IRI
    pub const UNIQUE_LANG: &str = "http://www.w3.org/ns/shacl#uniqueLang";

    /// sh:defaultValue IRI
    pub const DEFAULT_VALUE: &str = "http://www.w3.org/ns/shacl#defaultValue";

    /// sh:and IRI
    pub const AND: &str = "http://www.w3.org/ns/shacl#and";

    /// sh:or IRI
    pub const OR: &str = "http://www.w3.org/ns/shacl#or";

    /// sh:xone IRI
    pub const XONE: &str = "http://www.w3.org/ns/shacl#xone";

    /// sh:not IRI
    pub const NOT: &str = "http://www.w3.org/ns/shacl#not";

    /// sh:name IRI
    pub const NAME: &str = "http://www.w3.org/ns/shacl#name";

    /// sh:description IRI
    pub const DESCRIPTION: &str = "http://www.w3.org/ns/shacl#description";

    /// sh:order IRI
    pub const ORDER: &str = "http://www.w3.org/ns/shacl#order";

    /// sh:group IRI
    pub const GROUP: &str = "http://www.w3.org/ns/shacl#group";

    /// sh:BlankNode node kind IRI
    pub const BLANK_NODE: &str = "http://www.w3.org/ns/shacl#BlankNode";

    /// sh:IRI node kind IRI
    pub const IRI: &str = "http://www.w3.org/ns/shacl#IRI";

    /// sh:Literal node kind IRI
    pub const LITERAL: &str = "http://www.w3.org/ns/shacl#Literal";

    /// sh:BlankNodeOrIRI node kind IRI
    pub const BLANK_NODE_OR_IRI: &str = "http://www.w3.org/ns/shacl#BlankNodeOrIRI";

    /// sh:BlankNodeOrLiteral node kind IRI
    pub const BLANK_NODE_OR_LITERAL: &str = "http://www.w3.org/ns/shacl#BlankNodeOrLiteral";

    /// sh:IRIOrLiteral node kind IRI
    pub const IRI_OR_LITERAL: &str = "http://www.w3.org/ns/shacl#IRIOrLiteral";
}

/// Generator extension vocabulary
///
/// Code-generation hints layered over SHACL. These never affect
/// validation semantics; they only steer the object model the
/// compiler assembles.
pub mod gen {
    /// Namespace prefix for the extension vocabulary
    pub const NAMESPACE: &str = "https://ns.shapegen.dev/generator#";

    /// gen:abstract - shape is non-instantiable, inherit-only
    pub const ABSTRACT: &str = "https://ns.shapegen.dev/generator#abstract";

    /// gen:extern - references decode to a bare identifier, never composed
    pub const EXTERN: &str = "https://ns.shapegen.dev/generator#extern";

    /// gen:mutable - fields of this shape may be written after construction
    pub const MUTABLE: &str = "https://ns.shapegen.dev/generator#mutable";

    /// gen:visibility - public / protected / private
    pub const VISIBILITY: &str = "https://ns.shapegen.dev/generator#visibility";

    /// gen:mintingStrategy - identifier minting strategy for the shape
    pub const MINTING_STRATEGY: &str = "https://ns.shapegen.dev/generator#mintingStrategy";

    /// gen:MintBlankNode strategy value
    pub const MINT_BLANK_NODE: &str = "https://ns.shapegen.dev/generator#MintBlankNode";

    /// gen:MintSha256 strategy value
    pub const MINT_SHA256: &str = "https://ns.shapegen.dev/generator#MintSha256";

    /// gen:MintUuidv4 strategy value
    pub const MINT_UUIDV4: &str = "https://ns.shapegen.dev/generator#MintUuidv4";

    /// gen:MintNone strategy value (identifier must be supplied)
    pub const MINT_NONE: &str = "https://ns.shapegen.dev/generator#MintNone";

    /// gen:name - explicit object/field name override
    pub const NAME: &str = "https://ns.shapegen.dev/generator#name";

    /// gen:fromRdfType - type IRI used to recognize an instance on decode
    pub const FROM_RDF_TYPE: &str = "https://ns.shapegen.dev/generator#fromRdfType";

    /// gen:toRdfType - type IRIs emitted on encode (repeatable)
    pub const TO_RDF_TYPE: &str = "https://ns.shapegen.dev/generator#toRdfType";

    /// gen:identifierPropertyName - JSON identifier key override
    pub const IDENTIFIER_PROPERTY_NAME: &str =
        "https://ns.shapegen.dev/generator#identifierPropertyName";

    /// gen:discriminatorPropertyName - JSON type-tag key override
    pub const DISCRIMINATOR_PROPERTY_NAME: &str =
        "https://ns.shapegen.dev/generator#discriminatorPropertyName";

    /// gen:includeFeature - codec capability to emit (repeatable)
    pub const INCLUDE_FEATURE: &str = "https://ns.shapegen.dev/generator#includeFeature";

    /// gen:excludeFeature - codec capability to suppress (repeatable)
    pub const EXCLUDE_FEATURE: &str = "https://ns.shapegen.dev/generator#excludeFeature";

    /// gen:declarationStyle - class-like vs interface-like object declaration
    pub const DECLARATION_STYLE: &str = "https://ns.shapegen.dev/generator#declarationStyle";

    /// gen:list - marks a node shape as an ordered first/rest list shape
    pub const LIST: &str = "https://ns.shapegen.dev/generator#list";

    /// Feature value: construct/coercion
    pub const FEATURE_CONSTRUCT: &str = "https://ns.shapegen.dev/generator#Construct";

    /// Feature value: structural equality
    pub const FEATURE_EQUALS: &str = "https://ns.shapegen.dev/generator#Equals";

    /// Feature value: incremental hash
    pub const FEATURE_HASH: &str = "https://ns.shapegen.dev/generator#Hash";

    /// Feature value: JSON codec
    pub const FEATURE_JSON: &str = "https://ns.shapegen.dev/generator#Json";

    /// Feature value: graph codec
    pub const FEATURE_GRAPH: &str = "https://ns.shapegen.dev/generator#Graph";

    /// Feature value: query-pattern builder
    pub const FEATURE_QUERY: &str = "https://ns.shapegen.dev/generator#Query";

    /// Feature value: JSON Schema document
    pub const FEATURE_JSON_SCHEMA: &str = "https://ns.shapegen.dev/generator#JsonSchema";

    /// Feature value: UI Schema document
    pub const FEATURE_UI_SCHEMA: &str = "https://ns.shapegen.dev/generator#UiSchema";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_consistency() {
        assert!(sh::MIN_COUNT.starts_with("http://www.w3.org/ns/shacl#"));
        assert!(gen::ABSTRACT.starts_with(gen::NAMESPACE));
        assert!(gen::MINT_SHA256.starts_with(gen::NAMESPACE));
    }

    #[test]
    fn test_rdf_list_terms() {
        assert_eq!(rdf::NIL, "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil");
        assert_ne!(rdf::FIRST, rdf::REST);
    }
}
