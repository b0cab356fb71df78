//! Preferred-then-legacy predicate resolution.
//!
//! Each part of a reified statement can be spelled two ways: with the OWL 2
//! vocabulary (`owl:annotatedSource` ...) or with the RDF reification vocabulary
//! (`rdf:subject` ...). A `PredicatePair` names both spellings; resolution tries the
//! preferred one first and falls back to the legacy one, and only reports a miss
//! when neither resolves.
//!
//! Whether the lookup reads resource objects or literal objects is a compile-time
//! choice (`Resource` / `Literal`), the same way for every pair.

use crate::ReifyError;
use owlreify_rdf::vocab::{owl, rdf};
use owlreify_rdf::{RdfLiteral, RdfNode, TripleAccessor};

/// Which part of the reified statement a predicate pair resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Source,
    Property,
    Target,
}

impl Role {
    /// The error for a mandatory lookup of this role that found nothing.
    pub fn missing(self, node: &RdfNode) -> ReifyError {
        let node = node.clone();
        match self {
            Self::Source => ReifyError::MissingSourceTriple { node },
            Self::Property => ReifyError::MissingPropertyTriple { node },
            Self::Target => ReifyError::MissingTargetTriple { node },
        }
    }
}

/// The preferred and legacy predicate for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicatePair {
    pub role: Role,
    pub preferred: &'static str,
    pub legacy: &'static str,
}

impl PredicatePair {
    pub const SOURCE: Self = Self {
        role: Role::Source,
        preferred: owl::ANNOTATED_SOURCE,
        legacy: rdf::SUBJECT,
    };

    pub const PROPERTY: Self = Self {
        role: Role::Property,
        preferred: owl::ANNOTATED_PROPERTY,
        legacy: rdf::PREDICATE,
    };

    pub const TARGET: Self = Self {
        role: Role::Target,
        preferred: owl::ANNOTATED_TARGET,
        legacy: rdf::OBJECT,
    };

    pub fn contains(&self, predicate: &str) -> bool {
        self.preferred == predicate || self.legacy == predicate
    }
}

// ============================================================================
// Object forms
// ============================================================================

/// Selects which accessor a lookup goes through.
pub trait ObjectForm {
    type Value;

    fn lookup<S: TripleAccessor + ?Sized>(
        store: &S,
        node: &RdfNode,
        predicate: &str,
    ) -> Option<Self::Value>;
}

/// Look up IRI / blank-node objects.
#[derive(Debug)]
pub enum Resource {}

impl ObjectForm for Resource {
    type Value = RdfNode;

    #[inline]
    fn lookup<S: TripleAccessor + ?Sized>(
        store: &S,
        node: &RdfNode,
        predicate: &str,
    ) -> Option<RdfNode> {
        store.resource_object_of(node, predicate)
    }
}

/// Look up literal objects.
#[derive(Debug)]
pub enum Literal {}

impl ObjectForm for Literal {
    type Value = RdfLiteral;

    #[inline]
    fn lookup<S: TripleAccessor + ?Sized>(
        store: &S,
        node: &RdfNode,
        predicate: &str,
    ) -> Option<RdfLiteral> {
        store.literal_object_of(node, predicate)
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Optional lookup: the preferred predicate's object, else the legacy one's.
pub fn resolve_pair<F: ObjectForm, S: TripleAccessor + ?Sized>(
    store: &S,
    node: &RdfNode,
    pair: &PredicatePair,
) -> Option<F::Value> {
    F::lookup(store, node, pair.preferred).or_else(|| F::lookup(store, node, pair.legacy))
}

/// Mandatory lookup: like `resolve_pair`, but a miss on both predicates is the
/// role's `Missing*` error.
pub fn require_pair<F: ObjectForm, S: TripleAccessor + ?Sized>(
    store: &S,
    node: &RdfNode,
    pair: &PredicatePair,
) -> Result<F::Value, ReifyError> {
    resolve_pair::<F, S>(store, node, pair).ok_or_else(|| pair.role.missing(node))
}
