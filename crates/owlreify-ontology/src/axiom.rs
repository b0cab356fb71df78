//! OWL axiom types.

use owlreify_rdf::vocab::{owl, rdf, rdfs};
use owlreify_rdf::{RdfNode, RdfObject};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Annotations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Annotation {
    pub property: String,
    pub value: RdfObject,
}

impl Annotation {
    pub fn new(property: impl Into<String>, value: impl Into<RdfObject>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Annotations attached to one axiom. Set semantics: duplicates collapse.
pub type AnnotationSet = BTreeSet<Annotation>;

// ============================================================================
// Axioms
// ============================================================================

/// The logical content of an axiom, without annotations.
///
/// Every variant is binary, so each one maps back to exactly one RDF triple
/// (see `to_triple`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OwlAxiom {
    /// `entity rdf:type owl:Class` and the other built-in declaration types.
    Declaration { entity: RdfNode, kind: String },
    ClassAssertion { individual: RdfNode, class: RdfNode },
    SubClassOf { sub: RdfNode, super_class: RdfNode },
    EquivalentClasses { first: RdfNode, second: RdfNode },
    DisjointClasses { first: RdfNode, second: RdfNode },
    SubPropertyOf { sub: RdfNode, super_prop: RdfNode },
    PropertyDomain { property: RdfNode, domain: RdfNode },
    PropertyRange { property: RdfNode, range: RdfNode },
    InverseProperties { first: RdfNode, second: RdfNode },
    PropertyAssertion {
        subject: RdfNode,
        property: String,
        object: RdfObject,
    },
    AnnotationAssertion {
        subject: RdfNode,
        property: String,
        value: RdfObject,
    },
}

impl OwlAxiom {
    /// The (subject, predicate IRI, object) triple this axiom is serialized as.
    pub fn to_triple(&self) -> (RdfNode, String, RdfObject) {
        fn node(n: &RdfNode) -> RdfObject {
            RdfObject::Node(n.clone())
        }
        match self {
            Self::Declaration { entity, kind } => (
                entity.clone(),
                rdf::TYPE.to_string(),
                RdfObject::Node(RdfNode::Iri(kind.clone())),
            ),
            Self::ClassAssertion { individual, class } => {
                (individual.clone(), rdf::TYPE.to_string(), node(class))
            }
            Self::SubClassOf { sub, super_class } => (
                sub.clone(),
                rdfs::SUB_CLASS_OF.to_string(),
                node(super_class),
            ),
            Self::EquivalentClasses { first, second } => (
                first.clone(),
                owl::EQUIVALENT_CLASS.to_string(),
                node(second),
            ),
            Self::DisjointClasses { first, second } => {
                (first.clone(), owl::DISJOINT_WITH.to_string(), node(second))
            }
            Self::SubPropertyOf { sub, super_prop } => (
                sub.clone(),
                rdfs::SUB_PROPERTY_OF.to_string(),
                node(super_prop),
            ),
            Self::PropertyDomain { property, domain } => {
                (property.clone(), rdfs::DOMAIN.to_string(), node(domain))
            }
            Self::PropertyRange { property, range } => {
                (property.clone(), rdfs::RANGE.to_string(), node(range))
            }
            Self::InverseProperties { first, second } => {
                (first.clone(), owl::INVERSE_OF.to_string(), node(second))
            }
            Self::PropertyAssertion {
                subject,
                property,
                object,
            } => (subject.clone(), property.clone(), object.clone()),
            Self::AnnotationAssertion {
                subject,
                property,
                value,
            } => (subject.clone(), property.clone(), value.clone()),
        }
    }
}

/// An axiom as held by an ontology: logical content plus annotations.
///
/// Two axioms with the same `statement` and different `annotations` are different
/// values; they describe the same underlying axiom and share a projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Axiom {
    pub statement: OwlAxiom,
    pub annotations: AnnotationSet,
}

impl Axiom {
    pub fn new(statement: OwlAxiom) -> Self {
        Self {
            statement,
            annotations: AnnotationSet::new(),
        }
    }

    pub fn with_annotations(statement: OwlAxiom, annotations: AnnotationSet) -> Self {
        Self {
            statement,
            annotations,
        }
    }

    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// The annotation-free projection.
    pub fn without_annotations(&self) -> Axiom {
        Axiom::new(self.statement.clone())
    }
}
