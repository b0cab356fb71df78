use thiserror::Error;

#[derive(Debug, Error)]
pub enum OntologyError {
    #[error("cannot translate {subject} <{predicate}> {object} into an axiom: {reason}")]
    UnsupportedStatement {
        subject: String,
        predicate: String,
        object: String,
        reason: &'static str,
    },
    #[error("predicate must be an IRI, got {0}")]
    NonIriPredicate(String),
}
