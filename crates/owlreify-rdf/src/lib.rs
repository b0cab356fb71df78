//! RDF graph layer for owlreify.
//!
//! This crate is the **triple store accessor** the reification resolver reads from:
//!
//! - `term`: the RDF term model (IRIs, blank nodes, literals).
//! - `vocab`: the `rdf:` / `rdfs:` / `owl:` IRIs the translator cares about.
//! - `graph`: an in-memory triple graph with random access by subject.
//! - `parse`: Sophia-backed parsing of N-Triples, Turtle and RDF/XML into a graph.
//!
//! Reified axioms can be spread across a document in any order, so parsing always
//! produces a complete `TripleGraph` before anything downstream looks at it.

pub mod error;
pub mod graph;
pub mod parse;
pub mod term;
pub mod vocab;

pub use error::RdfError;
pub use graph::{RdfStatement, TripleAccessor, TripleGraph};
pub use parse::{parse_graph, parse_graph_file, RdfFormat};
pub use term::{RdfLiteral, RdfNode, RdfObject};
