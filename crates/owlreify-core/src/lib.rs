//! Reified axiom resolution.
//!
//! A reification node encodes one statement plus the annotations attached to it:
//!
//! ```text
//! _:x rdf:type owl:Axiom ;
//!     owl:annotatedSource   ex:A ;      # or rdf:subject   (legacy)
//!     owl:annotatedProperty ex:p ;      # or rdf:predicate (legacy)
//!     owl:annotatedTarget   ex:B ;      # or rdf:object    (legacy), resource or literal
//!     rdfs:comment "why A p B" .        # annotations
//! ```
//!
//! Resolution runs in two halves so the interesting part stays testable without an
//! engine:
//!
//! 1. `resolve_reification` is a pure read of the graph: it reconstitutes the triple
//!    (`resolver`, `target`) and computes the annotation set (`annotations`).
//! 2. `commit_reification` hands that description to an `AxiomSink` and repairs the
//!    result so only the annotated axiom survives (`commit`).
//!
//! `handler` packages both halves per reification type, and `document` drives them
//! over a whole graph. Nothing here can run while a document is still streaming in:
//! the triples of a node may appear anywhere in the source.

pub mod annotations;
pub mod commit;
pub mod config;
pub mod document;
pub mod error;
pub mod handler;
pub mod resolver;
pub mod target;

pub use annotations::{candidate_predicates, extract_annotations, EXCLUDED_PREDICATES};
pub use commit::{
    commit_reification, resolve_reification, CommitOutcome, ReconstitutedTriple, Reification,
};
pub use config::{MalformedNodePolicy, ReifyConfig};
pub use document::{resolve_nodes, translate_document, NodeDiagnostic, NodePass, Translation};
pub use error::ReifyError;
pub use handler::{ReificationHandler, ReificationKind};
pub use resolver::{require_pair, resolve_pair, Literal, ObjectForm, PredicatePair, Resource, Role};
pub use target::{resolve_target, TargetValue};
