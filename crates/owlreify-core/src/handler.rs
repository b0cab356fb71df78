//! Reification handlers, one per reification type.

use crate::commit::{commit_reification, resolve_reification, CommitOutcome, Reification};
use crate::ReifyError;
use owlreify_ontology::{AnnotationVocabulary, AxiomSink};
use owlreify_rdf::vocab::{owl, rdf};
use owlreify_rdf::{RdfNode, TripleAccessor, TripleGraph};
use serde::{Deserialize, Serialize};

/// The `rdf:type` that marks a node as a reification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReificationKind {
    /// `owl:Axiom`: an annotated axiom.
    Axiom,
    /// `owl:Annotation`: an annotated annotation.
    Annotation,
    /// `rdf:Statement`: a plain RDF reification.
    Statement,
}

impl ReificationKind {
    pub const ALL: [Self; 3] = [Self::Axiom, Self::Annotation, Self::Statement];

    pub fn type_iri(self) -> &'static str {
        match self {
            Self::Axiom => owl::AXIOM,
            Self::Annotation => owl::ANNOTATION,
            Self::Statement => rdf::STATEMENT,
        }
    }

    pub fn from_type_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_iri() == iri)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReificationHandler {
    kind: ReificationKind,
}

impl ReificationHandler {
    pub fn new(kind: ReificationKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ReificationKind {
        self.kind
    }

    pub fn type_iri(&self) -> &'static str {
        self.kind.type_iri()
    }

    /// Always `false`: a node's source/property/target triples may not have been
    /// parsed yet when its type triple is seen.
    pub fn can_handle_streaming(&self) -> bool {
        false
    }

    /// The nodes of `graph` this handler applies to, sorted.
    pub fn nodes(&self, graph: &TripleGraph) -> Vec<RdfNode> {
        graph.subjects_of_type(self.type_iri())
    }

    pub fn resolve<S, V>(
        &self,
        store: &S,
        vocabulary: &V,
        node: &RdfNode,
    ) -> Result<Reification, ReifyError>
    where
        S: TripleAccessor + ?Sized,
        V: AnnotationVocabulary + ?Sized,
    {
        resolve_reification(store, vocabulary, node)
    }

    /// Resolve `node` against `store` and commit it through `engine`.
    pub fn handle<S, E>(
        &self,
        store: &S,
        engine: &mut E,
        node: &RdfNode,
    ) -> Result<CommitOutcome, ReifyError>
    where
        S: TripleAccessor + ?Sized,
        E: AnnotationVocabulary + AxiomSink,
    {
        let reification = resolve_reification(store, &*engine, node)?;
        commit_reification(engine, reification)
    }
}
