//! Random-access triple graph.
//!
//! The graph is a set of triples (duplicates collapse) that remembers document
//! order. Lookups are by subject; when several objects match a predicate the first
//! one in document order is returned.

use crate::term::{RdfLiteral, RdfNode, RdfObject};
use crate::vocab;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdfStatement {
    /// Position in document order (after de-duplication).
    pub index: usize,
    pub subject: RdfNode,
    pub predicate_iri: String,
    pub object: RdfObject,
}

/// Read access to the triples asserted on a node.
///
/// This is all the reification resolver needs from a graph; anything that can answer
/// these three questions for a fully loaded document can back it.
pub trait TripleAccessor {
    /// Every predicate asserted with `node` as subject.
    fn predicates_of(&self, node: &RdfNode) -> BTreeSet<String>;

    /// The first IRI/blank-node object of `predicate` on `node`.
    fn resource_object_of(&self, node: &RdfNode, predicate: &str) -> Option<RdfNode>;

    /// The first literal object of `predicate` on `node`.
    fn literal_object_of(&self, node: &RdfNode, predicate: &str) -> Option<RdfLiteral>;
}

#[derive(Debug, Clone, Default)]
pub struct TripleGraph {
    statements: Vec<RdfStatement>,
    by_subject: HashMap<RdfNode, Vec<usize>>,
    seen: HashSet<(RdfNode, String, RdfObject)>,
}

impl TripleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple. Returns `false` if the graph already held it.
    pub fn insert(
        &mut self,
        subject: RdfNode,
        predicate_iri: impl Into<String>,
        object: impl Into<RdfObject>,
    ) -> bool {
        let predicate_iri = predicate_iri.into();
        let object = object.into();
        let key = (subject.clone(), predicate_iri.clone(), object.clone());
        if !self.seen.insert(key) {
            return false;
        }

        let index = self.statements.len();
        self.by_subject
            .entry(subject.clone())
            .or_default()
            .push(index);
        self.statements.push(RdfStatement {
            index,
            subject,
            predicate_iri,
            object,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[RdfStatement] {
        &self.statements
    }

    /// Statements with `node` as subject, in document order.
    pub fn statements_of<'a>(
        &'a self,
        node: &RdfNode,
    ) -> impl Iterator<Item = &'a RdfStatement> + 'a {
        self.by_subject
            .get(node)
            .map(|ids| ids.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.statements[i])
    }

    /// Objects of `predicate` on `node`, in document order.
    pub fn objects_of<'a>(
        &'a self,
        node: &RdfNode,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a RdfObject> + 'a {
        self.statements_of(node)
            .filter(move |stmt| stmt.predicate_iri == predicate)
            .map(|stmt| &stmt.object)
    }

    pub fn has_type(&self, node: &RdfNode, type_iri: &str) -> bool {
        self.objects_of(node, vocab::rdf::TYPE)
            .any(|obj| matches!(obj, RdfObject::Node(RdfNode::Iri(iri)) if iri == type_iri))
    }

    /// Subjects carrying `rdf:type <type_iri>`, sorted.
    pub fn subjects_of_type(&self, type_iri: &str) -> Vec<RdfNode> {
        let mut out: BTreeSet<RdfNode> = BTreeSet::new();
        for stmt in &self.statements {
            if stmt.predicate_iri != vocab::rdf::TYPE {
                continue;
            }
            if let RdfObject::Node(RdfNode::Iri(iri)) = &stmt.object {
                if iri == type_iri {
                    out.insert(stmt.subject.clone());
                }
            }
        }
        out.into_iter().collect()
    }
}

impl TripleAccessor for TripleGraph {
    fn predicates_of(&self, node: &RdfNode) -> BTreeSet<String> {
        self.statements_of(node)
            .map(|stmt| stmt.predicate_iri.clone())
            .collect()
    }

    fn resource_object_of(&self, node: &RdfNode, predicate: &str) -> Option<RdfNode> {
        self.objects_of(node, predicate)
            .find_map(|obj| obj.as_node().cloned())
    }

    fn literal_object_of(&self, node: &RdfNode, predicate: &str) -> Option<RdfLiteral> {
        self.objects_of(node, predicate)
            .find_map(|obj| obj.as_literal().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EX: &str = "http://example.org/";

    fn ex(local: &str) -> RdfNode {
        RdfNode::iri(format!("{EX}{local}"))
    }

    #[test]
    fn duplicate_triples_collapse() {
        let mut g = TripleGraph::new();
        assert!(g.insert(ex("A"), format!("{EX}p"), ex("B")));
        assert!(!g.insert(ex("A"), format!("{EX}p"), ex("B")));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn resource_and_literal_lookups_are_independent() {
        let mut g = TripleGraph::new();
        let p = format!("{EX}p");
        g.insert(ex("A"), p.as_str(), RdfLiteral::simple("text"));
        g.insert(ex("A"), p.as_str(), ex("B"));

        assert_eq!(g.resource_object_of(&ex("A"), &p), Some(ex("B")));
        assert_eq!(
            g.literal_object_of(&ex("A"), &p),
            Some(RdfLiteral::simple("text"))
        );
        assert_eq!(g.resource_object_of(&ex("B"), &p), None);
    }

    #[test]
    fn first_object_in_document_order_wins() {
        let mut g = TripleGraph::new();
        let p = format!("{EX}p");
        g.insert(ex("A"), p.as_str(), ex("Second"));
        g.insert(ex("A"), p.as_str(), ex("First"));
        assert_eq!(g.resource_object_of(&ex("A"), &p), Some(ex("Second")));
    }

    #[test]
    fn predicates_and_types_by_subject() {
        let mut g = TripleGraph::new();
        let x = RdfNode::blank("x");
        g.insert(x.clone(), vocab::rdf::TYPE, RdfNode::iri(vocab::owl::AXIOM));
        g.insert(x.clone(), vocab::owl::ANNOTATED_SOURCE, ex("A"));
        g.insert(ex("A"), vocab::rdf::TYPE, RdfNode::iri(vocab::owl::CLASS));

        let preds = g.predicates_of(&x);
        assert_eq!(preds.len(), 2);
        assert!(preds.contains(vocab::owl::ANNOTATED_SOURCE));
        assert!(g.has_type(&x, vocab::owl::AXIOM));
        assert!(!g.has_type(&ex("A"), vocab::owl::AXIOM));
        assert_eq!(g.subjects_of_type(vocab::owl::AXIOM), vec![x]);
    }

    #[test]
    fn unknown_subject_has_no_statements() {
        let g = TripleGraph::new();
        assert_eq!(g.statements_of(&ex("nobody")).count(), 0);
        assert!(g.predicates_of(&ex("nobody")).is_empty());
    }
}
