use crate::axiom::Axiom;
use crate::change::{ChangeOutcome, ChangeRecord, OntologyChange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An ontology: a set of axioms plus the log of every change applied to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ontology {
    pub iri: Option<String>,
    axioms: BTreeSet<Axiom>,
    changelog: Vec<ChangeRecord>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iri(iri: impl Into<String>) -> Self {
        Self {
            iri: Some(iri.into()),
            ..Self::default()
        }
    }

    pub fn apply_change(&mut self, change: OntologyChange) -> ChangeOutcome {
        let changed = match &change {
            OntologyChange::AddAxiom(axiom) => self.axioms.insert(axiom.clone()),
            OntologyChange::RemoveAxiom(axiom) => self.axioms.remove(axiom),
        };
        let outcome = if changed {
            ChangeOutcome::Applied
        } else {
            ChangeOutcome::NoOp
        };
        self.changelog.push(ChangeRecord {
            seq: self.changelog.len() as u64,
            change,
            outcome,
        });
        outcome
    }

    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.axioms.contains(axiom)
    }

    pub fn axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter()
    }

    /// Every held axiom sharing `axiom`'s annotation-free projection.
    pub fn axioms_with_projection<'a>(
        &'a self,
        axiom: &'a Axiom,
    ) -> impl Iterator<Item = &'a Axiom> + 'a {
        self.axioms
            .iter()
            .filter(move |held| held.statement == axiom.statement)
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    pub fn changelog(&self) -> &[ChangeRecord] {
        &self.changelog
    }
}
