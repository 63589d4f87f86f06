//! Format-agnostic RDF graph intermediate representation
//!
//! This crate provides the canonical types a shapes graph is loaded into,
//! plus the minimal read capability the rest of the compiler consumes:
//! `Resource` (values-of-predicate lookup, type membership) and
//! `GraphValue` (term coercions).
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!    Prefix compaction belongs to parsers and formatters, not this IR.
//!
//! 2. **Explicit datatypes** - Literals always carry a datatype. Plain
//!    strings use `xsd:string`, language-tagged strings `rdf:langString`.
//!
//! 3. **Graph order is observable** - The `Graph` stores `Vec<Triple>` and
//!    preserves insertion order; plural reads return values in graph order
//!    and singular reads take the first match.
//!
//! 4. **Deterministic output** - Call `sort()` (SPO lexicographic) before
//!    comparing or formatting encoded graphs.

mod error;
mod graph;
mod reader;
mod term;
mod triple;

pub use error::{DecodeError, Result};
pub use graph::Graph;
pub use reader::{GraphValue, Resource};
pub use term::{BlankId, Datatype, LiteralValue, Term};
pub use triple::Triple;
