//! RDF → OWL consumer.
//!
//! `OntologyConsumer` reads a fully parsed `TripleGraph` and turns triples into
//! axioms, one triple at a time. It exposes two seams:
//!
//! - `AnnotationVocabulary`: read-only questions about annotation properties
//!   (classification and node-scoped translation).
//! - `AxiomSink`: the mutable commit path (pending annotations, triple commit,
//!   last added axiom, removal).
//!
//! Pending annotations are attached to the next axiom the consumer creates and
//! then cleared, whether or not that commit succeeds.

use crate::axiom::{Annotation, AnnotationSet, Axiom, OwlAxiom};
use crate::change::{ChangeOutcome, OntologyChange};
use crate::ontology::Ontology;
use crate::OntologyError;
use owlreify_rdf::vocab::{self, owl, rdf, rdfs};
use owlreify_rdf::{RdfLiteral, RdfNode, RdfObject, TripleGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Seams
// ============================================================================

/// Annotation-property classification and translation.
pub trait AnnotationVocabulary {
    /// Whether `predicate` should be read as an annotation property.
    fn is_annotation_property(&self, predicate: &str) -> bool;

    /// Every annotation asserted on `node`.
    ///
    /// Node-scoped: the result covers all annotation-property predicates of the
    /// node, not one predicate at a time.
    fn translate_annotations(&self, node: &RdfNode) -> AnnotationSet;
}

/// The statement-commit interface.
pub trait AxiomSink {
    /// Annotations to attach to the next committed axiom.
    fn set_pending_annotations(&mut self, annotations: AnnotationSet);

    fn handle_resource_triple(
        &mut self,
        subject: &RdfNode,
        predicate: &RdfNode,
        object: &RdfNode,
    ) -> Result<(), OntologyError>;

    fn handle_literal_triple(
        &mut self,
        subject: &RdfNode,
        predicate: &RdfNode,
        object: &RdfLiteral,
    ) -> Result<(), OntologyError>;

    /// The axiom most recently created (or re-added) by a commit.
    fn last_added_axiom(&self) -> Option<&Axiom>;

    fn annotation_free_projection(&self, axiom: &Axiom) -> Axiom {
        axiom.without_annotations()
    }

    fn apply_removal(&mut self, axiom: Axiom) -> Result<ChangeOutcome, OntologyError>;
}

// ============================================================================
// Configuration
// ============================================================================

/// How undeclared predicates are classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationPolicy {
    /// Only predicates declared `owl:AnnotationProperty`, plus the built-in ones.
    Declared,
    /// Also any IRI outside the RDF/RDFS/OWL namespaces that is not declared as an
    /// object or datatype property.
    #[default]
    Lenient,
}

// ============================================================================
// Consumer
// ============================================================================

const STRUCTURAL_PREDICATES: [&str; 8] = [
    rdf::TYPE,
    rdfs::SUB_CLASS_OF,
    owl::EQUIVALENT_CLASS,
    owl::DISJOINT_WITH,
    rdfs::SUB_PROPERTY_OF,
    rdfs::DOMAIN,
    rdfs::RANGE,
    owl::INVERSE_OF,
];

pub struct OntologyConsumer<'g> {
    graph: &'g TripleGraph,
    policy: AnnotationPolicy,
    declared_annotation_properties: HashSet<String>,
    declared_value_properties: HashSet<String>,
    ontology: Ontology,
    pending: AnnotationSet,
    last_added: Option<Axiom>,
}

impl<'g> OntologyConsumer<'g> {
    pub fn new(graph: &'g TripleGraph, policy: AnnotationPolicy) -> Self {
        let iris_of_type = |ty: &str| -> HashSet<String> {
            graph
                .subjects_of_type(ty)
                .into_iter()
                .filter_map(|node| node.as_iri().map(str::to_string))
                .collect()
        };

        let declared_annotation_properties = iris_of_type(owl::ANNOTATION_PROPERTY);
        let mut declared_value_properties = iris_of_type(owl::OBJECT_PROPERTY);
        declared_value_properties.extend(iris_of_type(owl::DATATYPE_PROPERTY));

        let ontology = match graph
            .subjects_of_type(owl::ONTOLOGY)
            .into_iter()
            .find_map(|node| node.as_iri().map(str::to_string))
        {
            Some(iri) => Ontology::with_iri(iri),
            None => Ontology::new(),
        };

        Self {
            graph,
            policy,
            declared_annotation_properties,
            declared_value_properties,
            ontology,
            pending: AnnotationSet::new(),
            last_added: None,
        }
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    pub fn into_ontology(self) -> Ontology {
        self.ontology
    }

    pub fn pending_annotations(&self) -> &AnnotationSet {
        &self.pending
    }

    /// Commit one triple as an axiom, attaching (and clearing) pending annotations.
    pub fn handle_triple(
        &mut self,
        subject: &RdfNode,
        predicate: &str,
        object: &RdfObject,
    ) -> Result<(), OntologyError> {
        let annotations = std::mem::take(&mut self.pending);
        let statement = self.statement_for(subject, predicate, object)?;
        let axiom = Axiom::with_annotations(statement, annotations);

        let outcome = self
            .ontology
            .apply_change(OntologyChange::AddAxiom(axiom.clone()));
        tracing::trace!(
            subject = %subject,
            predicate,
            object = %object,
            annotations = axiom.annotations.len(),
            ?outcome,
            "committed axiom"
        );
        self.last_added = Some(axiom);
        Ok(())
    }

    /// `handle_triple` for a predicate given as a node. A non-IRI predicate still
    /// clears the pending annotations.
    fn handle_node_predicate_triple(
        &mut self,
        subject: &RdfNode,
        predicate: &RdfNode,
        object: &RdfObject,
    ) -> Result<(), OntologyError> {
        let Some(predicate_iri) = predicate.as_iri() else {
            self.pending.clear();
            return Err(OntologyError::NonIriPredicate(predicate.to_string()));
        };
        self.handle_triple(subject, predicate_iri, object)
    }

    fn statement_for(
        &self,
        subject: &RdfNode,
        predicate: &str,
        object: &RdfObject,
    ) -> Result<OwlAxiom, OntologyError> {
        let s = subject.clone();
        let statement = match (predicate, object) {
            (rdf::TYPE, RdfObject::Node(RdfNode::Iri(kind)))
                if vocab::DECLARATION_TYPES.contains(&kind.as_str()) =>
            {
                OwlAxiom::Declaration {
                    entity: s,
                    kind: kind.clone(),
                }
            }
            (rdf::TYPE, RdfObject::Node(class)) => OwlAxiom::ClassAssertion {
                individual: s,
                class: class.clone(),
            },
            (rdfs::SUB_CLASS_OF, RdfObject::Node(o)) => OwlAxiom::SubClassOf {
                sub: s,
                super_class: o.clone(),
            },
            (owl::EQUIVALENT_CLASS, RdfObject::Node(o)) => OwlAxiom::EquivalentClasses {
                first: s,
                second: o.clone(),
            },
            (owl::DISJOINT_WITH, RdfObject::Node(o)) => OwlAxiom::DisjointClasses {
                first: s,
                second: o.clone(),
            },
            (rdfs::SUB_PROPERTY_OF, RdfObject::Node(o)) => OwlAxiom::SubPropertyOf {
                sub: s,
                super_prop: o.clone(),
            },
            (rdfs::DOMAIN, RdfObject::Node(o)) => OwlAxiom::PropertyDomain {
                property: s,
                domain: o.clone(),
            },
            (rdfs::RANGE, RdfObject::Node(o)) => OwlAxiom::PropertyRange {
                property: s,
                range: o.clone(),
            },
            (owl::INVERSE_OF, RdfObject::Node(o)) => OwlAxiom::InverseProperties {
                first: s,
                second: o.clone(),
            },
            (p, RdfObject::Literal(_)) if STRUCTURAL_PREDICATES.contains(&p) => {
                return Err(OntologyError::UnsupportedStatement {
                    subject: subject.to_string(),
                    predicate: p.to_string(),
                    object: object.to_string(),
                    reason: "structural predicate with a literal object",
                });
            }
            (p, value) if self.is_annotation_property(p) => OwlAxiom::AnnotationAssertion {
                subject: s,
                property: p.to_string(),
                value: value.clone(),
            },
            (p, value) => OwlAxiom::PropertyAssertion {
                subject: s,
                property: p.to_string(),
                object: value.clone(),
            },
        };
        Ok(statement)
    }
}


impl AnnotationVocabulary for OntologyConsumer<'_> {
    fn is_annotation_property(&self, predicate: &str) -> bool {
        if self.declared_annotation_properties.contains(predicate)
            || vocab::BUILT_IN_ANNOTATION_PROPERTIES.contains(&predicate)
        {
            return true;
        }
        match self.policy {
            AnnotationPolicy::Declared => false,
            AnnotationPolicy::Lenient => {
                !vocab::is_reserved_vocabulary(predicate)
                    && !self.declared_value_properties.contains(predicate)
            }
        }
    }

    fn translate_annotations(&self, node: &RdfNode) -> AnnotationSet {
        self.graph
            .statements_of(node)
            .filter(|stmt| self.is_annotation_property(&stmt.predicate_iri))
            .map(|stmt| Annotation::new(stmt.predicate_iri.as_str(), stmt.object.clone()))
            .collect()
    }
}

impl AxiomSink for OntologyConsumer<'_> {
    fn set_pending_annotations(&mut self, annotations: AnnotationSet) {
        self.pending = annotations;
    }

    fn handle_resource_triple(
        &mut self,
        subject: &RdfNode,
        predicate: &RdfNode,
        object: &RdfNode,
    ) -> Result<(), OntologyError> {
        self.handle_node_predicate_triple(subject, predicate, &RdfObject::Node(object.clone()))
    }

    fn handle_literal_triple(
        &mut self,
        subject: &RdfNode,
        predicate: &RdfNode,
        object: &RdfLiteral,
    ) -> Result<(), OntologyError> {
        self.handle_node_predicate_triple(subject, predicate, &RdfObject::Literal(object.clone()))
    }

    fn last_added_axiom(&self) -> Option<&Axiom> {
        self.last_added.as_ref()
    }

    fn apply_removal(&mut self, axiom: Axiom) -> Result<ChangeOutcome, OntologyError> {
        Ok(self
            .ontology
            .apply_change(OntologyChange::RemoveAxiom(axiom)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EX: &str = "http://example.org/";

    fn ex(local: &str) -> RdfNode {
        RdfNode::iri(format!("{EX}{local}"))
    }

    fn ex_iri(local: &str) -> String {
        format!("{EX}{local}")
    }

    #[test]
    fn dispatches_structural_predicates() {
        let graph = TripleGraph::new();
        let mut consumer = OntologyConsumer::new(&graph, AnnotationPolicy::Lenient);
        consumer
            .handle_triple(&ex("A"), rdfs::SUB_CLASS_OF, &RdfObject::Node(ex("B")))
            .unwrap();
        consumer
            .handle_triple(&ex("A"), rdf::TYPE, &RdfObject::Node(RdfNode::iri(owl::CLASS)))
            .unwrap();

        let statements: Vec<&OwlAxiom> =
            consumer.ontology().axioms().map(|a| &a.statement).collect();
        assert!(statements.contains(&&OwlAxiom::SubClassOf {
            sub: ex("A"),
            super_class: ex("B"),
        }));
        assert!(statements.contains(&&OwlAxiom::Declaration {
            entity: ex("A"),
            kind: owl::CLASS.to_string(),
        }));
    }

    #[test]
    fn structural_predicate_with_literal_is_rejected() {
        let graph = TripleGraph::new();
        let mut consumer = OntologyConsumer::new(&graph, AnnotationPolicy::Lenient);
        let err = consumer
            .handle_triple(
                &ex("A"),
                rdfs::SUB_CLASS_OF,
                &RdfObject::Literal(RdfLiteral::simple("B")),
            )
            .unwrap_err();
        assert!(matches!(err, OntologyError::UnsupportedStatement { .. }));
        assert!(consumer.ontology().is_empty());
    }

    #[test]
    fn pending_annotations_attach_once() {
        let graph = TripleGraph::new();
        let mut consumer = OntologyConsumer::new(&graph, AnnotationPolicy::Lenient);
        let annotations: AnnotationSet =
            [Annotation::new(rdfs::COMMENT, RdfLiteral::simple("hi"))]
                .into_iter()
                .collect();

        consumer.set_pending_annotations(annotations.clone());
        consumer
            .handle_resource_triple(&ex("A"), &ex("p"), &ex("B"))
            .unwrap();
        assert_eq!(
            consumer.last_added_axiom().map(|a| &a.annotations),
            Some(&annotations)
        );
        assert!(consumer.pending_annotations().is_empty());

        consumer
            .handle_resource_triple(&ex("A"), &ex("q"), &ex("B"))
            .unwrap();
        assert!(!consumer.last_added_axiom().unwrap().is_annotated());
    }

    #[test]
    fn blank_predicate_is_rejected() {
        let graph = TripleGraph::new();
        let mut consumer = OntologyConsumer::new(&graph, AnnotationPolicy::Lenient);
        let err = consumer
            .handle_resource_triple(&ex("A"), &RdfNode::blank("p"), &ex("B"))
            .unwrap_err();
        assert!(matches!(err, OntologyError::NonIriPredicate(_)));
    }

    #[test]
    fn rejected_predicate_clears_pending_annotations() {
        let graph = TripleGraph::new();
        let mut consumer = OntologyConsumer::new(&graph, AnnotationPolicy::Lenient);
        consumer.set_pending_annotations(
            [Annotation::new(rdfs::COMMENT, RdfLiteral::simple("hi"))]
                .into_iter()
                .collect(),
        );
        assert!(consumer
            .handle_literal_triple(&ex("A"), &RdfNode::blank("p"), &RdfLiteral::simple("v"))
            .is_err());
        assert!(consumer.pending_annotations().is_empty());

        consumer
            .handle_resource_triple(&ex("C"), &RdfNode::iri(rdfs::SUB_CLASS_OF), &ex("D"))
            .unwrap();
        assert!(!consumer.last_added_axiom().unwrap().is_annotated());
    }

    #[test]
    fn annotation_policy_controls_undeclared_predicates() {
        let mut graph = TripleGraph::new();
        graph.insert(ex("knows"), rdf::TYPE, RdfNode::iri(owl::OBJECT_PROPERTY));
        graph.insert(ex("note"), rdf::TYPE, RdfNode::iri(owl::ANNOTATION_PROPERTY));

        let lenient = OntologyConsumer::new(&graph, AnnotationPolicy::Lenient);
        assert!(lenient.is_annotation_property(&ex_iri("comment")));
        assert!(lenient.is_annotation_property(&ex_iri("note")));
        assert!(!lenient.is_annotation_property(&ex_iri("knows")));
        assert!(!lenient.is_annotation_property(owl::ANNOTATED_SOURCE));
        assert!(lenient.is_annotation_property(rdfs::LABEL));

        let declared = OntologyConsumer::new(&graph, AnnotationPolicy::Declared);
        assert!(!declared.is_annotation_property(&ex_iri("comment")));
        assert!(declared.is_annotation_property(&ex_iri("note")));
        assert!(declared.is_annotation_property(rdfs::COMMENT));
    }

    #[test]
    fn translation_is_node_scoped() {
        let mut graph = TripleGraph::new();
        let x = RdfNode::blank("x");
        graph.insert(x.clone(), rdf::TYPE, RdfNode::iri(owl::AXIOM));
        graph.insert(x.clone(), ex_iri("comment"), RdfLiteral::simple("hi"));
        graph.insert(x.clone(), rdfs::LABEL, RdfLiteral::lang("label", "en"));
        graph.insert(ex("other"), ex_iri("comment"), RdfLiteral::simple("elsewhere"));

        let consumer = OntologyConsumer::new(&graph, AnnotationPolicy::Lenient);
        let annotations = consumer.translate_annotations(&x);
        assert_eq!(annotations.len(), 2);
        assert!(annotations.contains(&Annotation::new(
            ex_iri("comment"),
            RdfLiteral::simple("hi")
        )));
    }

    #[test]
    fn ontology_iri_is_picked_up() {
        let mut graph = TripleGraph::new();
        graph.insert(ex("onto"), rdf::TYPE, RdfNode::iri(owl::ONTOLOGY));
        let consumer = OntologyConsumer::new(&graph, AnnotationPolicy::default());
        assert_eq!(consumer.ontology().iri.as_deref(), Some(ex_iri("onto").as_str()));
    }
}
