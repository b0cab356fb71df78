use owlreify_ontology::OntologyError;
use owlreify_rdf::RdfNode;
use thiserror::Error;

/// Errors raised while resolving or committing one reification node.
///
/// The `Missing*` variants are malformed-input errors: the node does not carry the
/// structure a reified statement needs. They abort the node before anything is
/// committed.
#[derive(Debug, Error)]
pub enum ReifyError {
    #[error("missing owl:annotatedSource triple on {node}")]
    MissingSourceTriple { node: RdfNode },
    #[error("missing owl:annotatedProperty triple on {node}")]
    MissingPropertyTriple { node: RdfNode },
    #[error("missing owl:annotatedTarget triple on {node}")]
    MissingTargetTriple { node: RdfNode },
    /// The engine accepted the commit but reports no axiom to repair.
    #[error("no committed axiom to repair for {node}")]
    MissingCommittedAxiom { node: RdfNode },
    #[error(transparent)]
    Ontology(#[from] OntologyError),
}

impl ReifyError {
    /// True for the structural errors that mean "this node is not a well-formed
    /// reification".
    pub fn is_malformed_node(&self) -> bool {
        matches!(
            self,
            Self::MissingSourceTriple { .. }
                | Self::MissingPropertyTriple { .. }
                | Self::MissingTargetTriple { .. }
        )
    }
}
