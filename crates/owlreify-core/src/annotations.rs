//! Annotation extraction for a reification node.
//!
//! The reification predicates themselves are never annotations. The legacy
//! `rdf:subject` / `rdf:predicate` / `rdf:object` are excluded unconditionally, even
//! though an ontology could in principle use them as ordinary properties.

use owlreify_ontology::{AnnotationSet, AnnotationVocabulary};
use owlreify_rdf::vocab::{owl, rdf};
use owlreify_rdf::{RdfNode, TripleAccessor};
use std::collections::BTreeSet;

/// Predicates on a reification node that can never carry an annotation.
pub const EXCLUDED_PREDICATES: [&str; 7] = [
    owl::ANNOTATED_SOURCE,
    rdf::SUBJECT,
    owl::ANNOTATED_PROPERTY,
    rdf::PREDICATE,
    owl::ANNOTATED_TARGET,
    rdf::OBJECT,
    rdf::TYPE,
];

pub fn is_excluded_predicate(predicate: &str) -> bool {
    EXCLUDED_PREDICATES.contains(&predicate)
}

/// Predicates of `node` that may carry annotations.
pub fn candidate_predicates<S: TripleAccessor + ?Sized>(store: &S, node: &RdfNode) -> BTreeSet<String> {
    let mut predicates = store.predicates_of(node);
    predicates.retain(|p| !is_excluded_predicate(p));
    predicates
}

/// The annotations attached to `node`.
///
/// The translator is node-scoped, so it is called at most once: only if at least one
/// candidate predicate is classified as an annotation property. Entries keyed by an
/// excluded predicate are dropped from whatever it returns.
pub fn extract_annotations<S, V>(store: &S, vocabulary: &V, node: &RdfNode) -> AnnotationSet
where
    S: TripleAccessor + ?Sized,
    V: AnnotationVocabulary + ?Sized,
{
    let candidates = candidate_predicates(store, node);
    if !candidates
        .iter()
        .any(|p| vocabulary.is_annotation_property(p))
    {
        return AnnotationSet::new();
    }

    let mut annotations = vocabulary.translate_annotations(node);
    annotations.retain(|a| !is_excluded_predicate(&a.property));
    annotations
}
