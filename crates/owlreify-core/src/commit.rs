//! Resolve a reification node, then commit it.
//!
//! Resolution is a pure read and fails fast: a missing source, property or target
//! aborts before any annotation is registered or any axiom committed.
//!
//! Commit hands the reconstituted triple to the sink with the annotations pending.
//! The sink's commit path may leave the bare (annotation-free) version of the same
//! axiom in place, for instance because the plain triple was also asserted in the
//! document. When annotations were found, the bare projection of the committed axiom
//! is removed so exactly one version survives.

use crate::annotations::extract_annotations;
use crate::resolver::{require_pair, PredicatePair, Resource};
use crate::target::{resolve_target, TargetValue};
use crate::ReifyError;
use owlreify_ontology::{AnnotationSet, AnnotationVocabulary, Axiom, AxiomSink, ChangeOutcome};
use owlreify_rdf::{RdfNode, TripleAccessor};
use serde::Serialize;

/// The statement a reification node encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconstitutedTriple {
    pub subject: RdfNode,
    pub property: RdfNode,
    pub target: TargetValue,
}

/// Everything needed to commit one node: its triple and its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reification {
    pub node: RdfNode,
    pub triple: ReconstitutedTriple,
    pub annotations: AnnotationSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// The axiom the sink created for the triple, annotations included.
    pub committed: Axiom,
    /// Result of removing the bare projection; `None` when there was nothing to
    /// repair (no annotations).
    pub repaired: Option<ChangeOutcome>,
}

/// Reconstitute `node`'s triple and collect its annotations.
pub fn resolve_reification<S, V>(
    store: &S,
    vocabulary: &V,
    node: &RdfNode,
) -> Result<Reification, ReifyError>
where
    S: TripleAccessor + ?Sized,
    V: AnnotationVocabulary + ?Sized,
{
    let subject = require_pair::<Resource, S>(store, node, &PredicatePair::SOURCE)?;
    let property = require_pair::<Resource, S>(store, node, &PredicatePair::PROPERTY)?;
    let target = resolve_target(store, node)?;
    let annotations = extract_annotations(store, vocabulary, node);

    tracing::debug!(
        node = %node,
        subject = %subject,
        property = %property,
        target = %target,
        annotations = annotations.len(),
        "resolved reification"
    );

    Ok(Reification {
        node: node.clone(),
        triple: ReconstitutedTriple {
            subject,
            property,
            target,
        },
        annotations,
    })
}

/// Commit a resolved reification and repair the bare duplicate.
pub fn commit_reification<K>(
    sink: &mut K,
    reification: Reification,
) -> Result<CommitOutcome, ReifyError>
where
    K: AxiomSink + ?Sized,
{
    let Reification {
        node,
        triple,
        annotations,
    } = reification;
    let annotated = !annotations.is_empty();

    sink.set_pending_annotations(annotations);
    match &triple.target {
        TargetValue::Resource(object) => {
            sink.handle_resource_triple(&triple.subject, &triple.property, object)?
        }
        TargetValue::Literal(literal) => {
            sink.handle_literal_triple(&triple.subject, &triple.property, literal)?
        }
    }

    let committed = sink
        .last_added_axiom()
        .cloned()
        .ok_or_else(|| ReifyError::MissingCommittedAxiom { node: node.clone() })?;

    let repaired = if annotated {
        let bare = sink.annotation_free_projection(&committed);
        let outcome = sink.apply_removal(bare)?;
        tracing::debug!(node = %node, ?outcome, "removed bare axiom");
        Some(outcome)
    } else {
        None
    };

    Ok(CommitOutcome {
        committed,
        repaired,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use owlreify_ontology::{Annotation, AnnotationPolicy, OntologyConsumer, OntologyError};
    use owlreify_rdf::vocab::{owl, rdf, rdfs};
    use owlreify_rdf::{RdfLiteral, RdfObject, TripleGraph};

    fn ex(local: &str) -> RdfNode {
        RdfNode::iri(format!("http://example.org/{local}"))
    }

    fn scenario_graph() -> (TripleGraph, RdfNode) {
        let mut g = TripleGraph::new();
        let x = RdfNode::blank("x");
        g.insert(x.clone(), rdf::TYPE, RdfNode::iri(owl::AXIOM));
        g.insert(x.clone(), owl::ANNOTATED_SOURCE, ex("A"));
        g.insert(x.clone(), owl::ANNOTATED_PROPERTY, ex("p"));
        g.insert(x.clone(), owl::ANNOTATED_TARGET, ex("B"));
        g.insert(x.clone(), rdfs::COMMENT, RdfLiteral::simple("hi"));
        (g, x)
    }

    #[test]
    fn resolves_triple_and_annotations() {
        let (g, x) = scenario_graph();
        let consumer = OntologyConsumer::new(&g, AnnotationPolicy::Lenient);
        let reification = resolve_reification(&g, &consumer, &x).unwrap();

        assert_eq!(
            reification.triple,
            ReconstitutedTriple {
                subject: ex("A"),
                property: ex("p"),
                target: TargetValue::Resource(ex("B")),
            }
        );
        assert_eq!(
            reification.annotations.into_iter().collect::<Vec<_>>(),
            vec![Annotation::new(rdfs::COMMENT, RdfLiteral::simple("hi"))]
        );
    }

    #[test]
    fn commit_removes_the_bare_duplicate() {
        let (g, x) = scenario_graph();
        let mut consumer = OntologyConsumer::new(&g, AnnotationPolicy::Lenient);

        // The plain triple was already committed by the regular translation path.
        consumer
            .handle_triple(&ex("A"), "http://example.org/p", &RdfObject::Node(ex("B")))
            .unwrap();
        assert_eq!(consumer.ontology().len(), 1);

        let reification = resolve_reification(&g, &consumer, &x).unwrap();
        let outcome = commit_reification(&mut consumer, reification).unwrap();

        assert!(outcome.committed.is_annotated());
        assert_eq!(outcome.repaired, Some(ChangeOutcome::Applied));
        let survivors: Vec<&Axiom> = consumer
            .ontology()
            .axioms_with_projection(&outcome.committed)
            .collect();
        assert_eq!(survivors, vec![&outcome.committed]);
    }

    #[test]
    fn unannotated_commit_skips_repair() {
        let mut g = TripleGraph::new();
        let y = RdfNode::blank("y");
        g.insert(y.clone(), rdf::SUBJECT, ex("A"));
        g.insert(y.clone(), rdf::PREDICATE, ex("p"));
        g.insert(y.clone(), rdf::OBJECT, RdfLiteral::simple("literal-text"));

        let mut consumer = OntologyConsumer::new(&g, AnnotationPolicy::Lenient);
        let reification = resolve_reification(&g, &consumer, &y).unwrap();
        assert!(reification.annotations.is_empty());

        let outcome = commit_reification(&mut consumer, reification).unwrap();
        assert_eq!(outcome.repaired, None);
        assert_eq!(consumer.ontology().len(), 1);
        assert!(consumer
            .ontology()
            .changelog()
            .iter()
            .all(|r| matches!(r.change, owlreify_ontology::OntologyChange::AddAxiom(_))));
    }

    /// A sink whose commit never produces an axiom.
    #[derive(Default)]
    struct ForgetfulSink {
        pending: AnnotationSet,
    }

    impl AxiomSink for ForgetfulSink {
        fn set_pending_annotations(&mut self, annotations: AnnotationSet) {
            self.pending = annotations;
        }

        fn handle_resource_triple(
            &mut self,
            _subject: &RdfNode,
            _predicate: &RdfNode,
            _object: &RdfNode,
        ) -> Result<(), OntologyError> {
            Ok(())
        }

        fn handle_literal_triple(
            &mut self,
            _subject: &RdfNode,
            _predicate: &RdfNode,
            _object: &RdfLiteral,
        ) -> Result<(), OntologyError> {
            Ok(())
        }

        fn last_added_axiom(&self) -> Option<&Axiom> {
            None
        }

        fn apply_removal(&mut self, _axiom: Axiom) -> Result<ChangeOutcome, OntologyError> {
            Ok(ChangeOutcome::NoOp)
        }
    }

    #[test]
    fn missing_committed_axiom_is_surfaced() {
        let (g, x) = scenario_graph();
        let consumer = OntologyConsumer::new(&g, AnnotationPolicy::Lenient);
        let reification = resolve_reification(&g, &consumer, &x).unwrap();

        let mut sink = ForgetfulSink::default();
        let err = commit_reification(&mut sink, reification).unwrap_err();
        assert!(matches!(err, ReifyError::MissingCommittedAxiom { .. }));
        assert_eq!(sink.pending.len(), 1);
    }

    #[test]
    fn sink_errors_propagate() {
        let mut g = TripleGraph::new();
        let x = RdfNode::blank("x");
        g.insert(x.clone(), owl::ANNOTATED_SOURCE, ex("A"));
        g.insert(x.clone(), owl::ANNOTATED_PROPERTY, RdfNode::blank("p"));
        g.insert(x.clone(), owl::ANNOTATED_TARGET, ex("B"));

        let mut consumer = OntologyConsumer::new(&g, AnnotationPolicy::Lenient);
        let reification = resolve_reification(&g, &consumer, &x).unwrap();
        let err = commit_reification(&mut consumer, reification).unwrap_err();
        assert!(matches!(
            err,
            ReifyError::Ontology(OntologyError::NonIriPredicate(_))
        ));
        assert!(consumer.ontology().is_empty());
    }

    #[test]
    fn failed_commit_leaves_no_annotations_behind() {
        let mut g = TripleGraph::new();
        let x = RdfNode::blank("x");
        g.insert(x.clone(), owl::ANNOTATED_SOURCE, ex("A"));
        g.insert(x.clone(), owl::ANNOTATED_PROPERTY, RdfNode::blank("p"));
        g.insert(x.clone(), owl::ANNOTATED_TARGET, ex("B"));
        g.insert(x.clone(), rdfs::COMMENT, RdfLiteral::simple("hi"));

        let mut consumer = OntologyConsumer::new(&g, AnnotationPolicy::Lenient);
        let reification = resolve_reification(&g, &consumer, &x).unwrap();
        assert_eq!(reification.annotations.len(), 1);
        assert!(commit_reification(&mut consumer, reification).is_err());
        assert!(consumer.pending_annotations().is_empty());

        consumer
            .handle_triple(&ex("C"), rdfs::SUB_CLASS_OF, &RdfObject::Node(ex("D")))
            .unwrap();
        let axioms: Vec<&Axiom> = consumer.ontology().axioms().collect();
        assert_eq!(axioms.len(), 1);
        assert!(!axioms[0].is_annotated());
    }

    /// Commits through a real consumer but refuses every removal.
    struct RemovalRejected<'g> {
        inner: OntologyConsumer<'g>,
    }

    impl AxiomSink for RemovalRejected<'_> {
        fn set_pending_annotations(&mut self, annotations: AnnotationSet) {
            self.inner.set_pending_annotations(annotations);
        }

        fn handle_resource_triple(
            &mut self,
            subject: &RdfNode,
            predicate: &RdfNode,
            object: &RdfNode,
        ) -> Result<(), OntologyError> {
            self.inner.handle_resource_triple(subject, predicate, object)
        }

        fn handle_literal_triple(
            &mut self,
            subject: &RdfNode,
            predicate: &RdfNode,
            object: &RdfLiteral,
        ) -> Result<(), OntologyError> {
            self.inner.handle_literal_triple(subject, predicate, object)
        }

        fn last_added_axiom(&self) -> Option<&Axiom> {
            self.inner.last_added_axiom()
        }

        fn apply_removal(&mut self, axiom: Axiom) -> Result<ChangeOutcome, OntologyError> {
            let (subject, predicate, object) = axiom.statement.to_triple();
            Err(OntologyError::UnsupportedStatement {
                subject: subject.to_string(),
                predicate,
                object: object.to_string(),
                reason: "removal refused",
            })
        }
    }

    #[test]
    fn repair_failure_is_surfaced() {
        let (g, x) = scenario_graph();
        let mut sink = RemovalRejected {
            inner: OntologyConsumer::new(&g, AnnotationPolicy::Lenient),
        };
        let reification = resolve_reification(&g, &sink.inner, &x).unwrap();

        let err = commit_reification(&mut sink, reification).unwrap_err();
        assert!(matches!(
            err,
            ReifyError::Ontology(OntologyError::UnsupportedStatement {
                reason: "removal refused",
                ..
            })
        ));
    }
}
