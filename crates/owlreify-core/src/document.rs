//! Whole-document translation.
//!
//! Runs after the document is fully parsed, in two passes:
//!
//! 1. every triple whose subject is not a reification node is committed as a plain
//!    (unannotated) axiom;
//! 2. every reification node is resolved and committed, in sorted node order.
//!
//! Pass 2 therefore always sees the bare axioms pass 1 produced, and the repair step
//! leaves one annotated axiom per reified statement.

use crate::config::{MalformedNodePolicy, ReifyConfig};
use crate::handler::{ReificationHandler, ReificationKind};
use crate::ReifyError;
use owlreify_ontology::{
    AnnotationVocabulary, AxiomSink, ChangeOutcome, Ontology, OntologyConsumer,
};
use owlreify_rdf::vocab::{owl, rdf};
use owlreify_rdf::{RdfNode, RdfObject, TripleGraph};
use serde::Serialize;
use std::collections::BTreeMap;

/// A node that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDiagnostic {
    pub node: RdfNode,
    /// `None` for ordinary triples that failed to translate.
    pub kind: Option<ReificationKind>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    pub ontology: Ontology,
    pub diagnostics: Vec<NodeDiagnostic>,
    /// Reification nodes committed.
    pub reified: usize,
    /// Bare duplicates actually removed.
    pub repaired: usize,
}

fn is_ontology_header(predicate: &str, object: &RdfObject) -> bool {
    predicate == rdf::TYPE
        && matches!(object, RdfObject::Node(RdfNode::Iri(iri)) if iri == owl::ONTOLOGY)
}

fn skip_or_abort(
    policy: MalformedNodePolicy,
    diagnostics: &mut Vec<NodeDiagnostic>,
    node: &RdfNode,
    kind: Option<ReificationKind>,
    err: ReifyError,
) -> Result<(), ReifyError> {
    match policy {
        MalformedNodePolicy::Abort => Err(err),
        MalformedNodePolicy::Skip => {
            if err.is_malformed_node() {
                tracing::warn!(node = %node, ?kind, error = %err, "skipping malformed node");
            } else {
                tracing::warn!(node = %node, ?kind, error = %err, "skipping rejected statement");
            }
            diagnostics.push(NodeDiagnostic {
                node: node.clone(),
                kind,
                message: err.to_string(),
            });
            Ok(())
        }
    }
}

/// Result of resolving the reification nodes of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePass {
    pub reified: usize,
    pub repaired: usize,
    pub diagnostics: Vec<NodeDiagnostic>,
}

/// Every reification node of an enabled kind, with the handler of the first kind
/// (in configured order) it carries.
fn reification_nodes(
    graph: &TripleGraph,
    config: &ReifyConfig,
) -> BTreeMap<RdfNode, ReificationHandler> {
    let mut nodes = BTreeMap::new();
    for handler in config.handlers() {
        for node in handler.nodes(graph) {
            nodes.entry(node).or_insert(handler);
        }
    }
    nodes
}

fn resolve_node_map<E>(
    graph: &TripleGraph,
    nodes: &BTreeMap<RdfNode, ReificationHandler>,
    policy: MalformedNodePolicy,
    engine: &mut E,
) -> Result<NodePass, ReifyError>
where
    E: AnnotationVocabulary + AxiomSink,
{
    let mut pass = NodePass::default();
    for (node, handler) in nodes {
        match handler.handle(graph, engine, node) {
            Ok(outcome) => {
                pass.reified += 1;
                if outcome.repaired == Some(ChangeOutcome::Applied) {
                    pass.repaired += 1;
                }
            }
            Err(err) => skip_or_abort(
                policy,
                &mut pass.diagnostics,
                node,
                Some(handler.kind()),
                err,
            )?,
        }
    }
    Ok(pass)
}

/// Resolve and commit every reification node of `graph` through `engine`, in sorted
/// node order. Ordinary triples are not touched.
pub fn resolve_nodes<E>(
    graph: &TripleGraph,
    config: &ReifyConfig,
    engine: &mut E,
) -> Result<NodePass, ReifyError>
where
    E: AnnotationVocabulary + AxiomSink,
{
    let nodes = reification_nodes(graph, config);
    resolve_node_map(graph, &nodes, config.malformed_nodes, engine)
}

pub fn translate_document(
    graph: &TripleGraph,
    config: &ReifyConfig,
) -> Result<Translation, ReifyError> {
    let reification_nodes = reification_nodes(graph, config);

    let mut consumer = OntologyConsumer::new(graph, config.annotation_policy);
    let mut diagnostics: Vec<NodeDiagnostic> = Vec::new();

    for stmt in graph.statements() {
        if reification_nodes.contains_key(&stmt.subject)
            || is_ontology_header(&stmt.predicate_iri, &stmt.object)
        {
            continue;
        }
        if let Err(err) = consumer.handle_triple(&stmt.subject, &stmt.predicate_iri, &stmt.object)
        {
            skip_or_abort(
                config.malformed_nodes,
                &mut diagnostics,
                &stmt.subject,
                None,
                err.into(),
            )?;
        }
    }

    let pass = resolve_node_map(
        graph,
        &reification_nodes,
        config.malformed_nodes,
        &mut consumer,
    )?;
    diagnostics.extend(pass.diagnostics);

    let ontology = consumer.into_ontology();
    tracing::info!(
        triples = graph.len(),
        axioms = ontology.len(),
        reification_nodes = reification_nodes.len(),
        reified = pass.reified,
        repaired = pass.repaired,
        skipped = diagnostics.len(),
        "translated document"
    );

    Ok(Translation {
        ontology,
        diagnostics,
        reified: pass.reified,
        repaired: pass.repaired,
    })
}
