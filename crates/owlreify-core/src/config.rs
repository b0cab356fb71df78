use crate::handler::{ReificationHandler, ReificationKind};
use owlreify_ontology::AnnotationPolicy;
use serde::{Deserialize, Serialize};

/// What a document translation does with a node it cannot translate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedNodePolicy {
    /// Record a diagnostic, log a warning, keep going.
    #[default]
    Skip,
    /// Stop the whole translation with the node's error.
    Abort,
}

/// Configuration for document translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReifyConfig {
    /// Reification types to resolve; nodes of other types are translated as
    /// ordinary triples.
    pub reification_kinds: Vec<ReificationKind>,
    /// Classification of undeclared annotation properties
    pub annotation_policy: AnnotationPolicy,
    pub malformed_nodes: MalformedNodePolicy,
}

impl Default for ReifyConfig {
    fn default() -> Self {
        Self {
            reification_kinds: ReificationKind::ALL.to_vec(),
            annotation_policy: AnnotationPolicy::Lenient,
            malformed_nodes: MalformedNodePolicy::Skip,
        }
    }
}

impl ReifyConfig {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// One handler per configured kind, first occurrence wins.
    pub fn handlers(&self) -> Vec<ReificationHandler> {
        let mut out: Vec<ReificationHandler> = Vec::new();
        for kind in &self.reification_kinds {
            if out.iter().all(|h| h.kind() != *kind) {
                out.push(ReificationHandler::new(*kind));
            }
        }
        out
    }
}
