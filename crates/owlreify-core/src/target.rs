//! Target disambiguation: resource first, literal only as a fallback.

use crate::resolver::{require_pair, resolve_pair, Literal, PredicatePair, Resource};
use crate::ReifyError;
use owlreify_rdf::{RdfLiteral, RdfNode, RdfObject, TripleAccessor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The object of a reconstituted triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetValue {
    Resource(RdfNode),
    Literal(RdfLiteral),
}

impl From<TargetValue> for RdfObject {
    fn from(target: TargetValue) -> Self {
        match target {
            TargetValue::Resource(node) => RdfObject::Node(node),
            TargetValue::Literal(lit) => RdfObject::Literal(lit),
        }
    }
}

impl fmt::Display for TargetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(node) => node.fmt(f),
            Self::Literal(lit) => lit.fmt(f),
        }
    }
}

/// Resolve the target of `node`.
///
/// A literal is only looked up when no resource object exists for either target
/// predicate, so a resource always wins when both are present.
pub fn resolve_target<S: TripleAccessor + ?Sized>(
    store: &S,
    node: &RdfNode,
) -> Result<TargetValue, ReifyError> {
    if let Some(resource) = resolve_pair::<Resource, S>(store, node, &PredicatePair::TARGET) {
        return Ok(TargetValue::Resource(resource));
    }
    require_pair::<Literal, S>(store, node, &PredicatePair::TARGET).map(TargetValue::Literal)
}
