//! Ontology changes and the change log.

use crate::axiom::Axiom;
use serde::{Deserialize, Serialize};

/// A change to an ontology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OntologyChange {
    AddAxiom(Axiom),
    RemoveAxiom(Axiom),
}

/// What applying a change did.
///
/// Adding an axiom that is already present, or removing one that is absent, leaves
/// the ontology untouched and is reported as `NoOp` rather than as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeOutcome {
    Applied,
    NoOp,
}

/// One entry of the change log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub seq: u64,
    pub change: OntologyChange,
    pub outcome: ChangeOutcome,
}
