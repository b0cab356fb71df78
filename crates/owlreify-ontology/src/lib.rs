//! OWL ontology model and the RDF consumer engine.
//!
//! This crate owns everything the reification resolver treats as an external
//! collaborator:
//!
//! - the axiom model (`axiom`) and its annotation-free projection,
//! - the ontology with its change log (`ontology`, `change`),
//! - the consumer (`consumer`): annotation-property classification, node-scoped
//!   annotation translation, pending annotations, triple commit and removal.
//!
//! The consumer does not know about reification. It turns single triples into
//! axioms; `owlreify-core` decides which triples to give it.

pub mod axiom;
pub mod change;
pub mod consumer;
pub mod error;
pub mod ontology;

pub use axiom::{Annotation, AnnotationSet, Axiom, OwlAxiom};
pub use change::{ChangeOutcome, ChangeRecord, OntologyChange};
pub use consumer::{AnnotationPolicy, AnnotationVocabulary, AxiomSink, OntologyConsumer};
pub use error::OntologyError;
pub use ontology::Ontology;
