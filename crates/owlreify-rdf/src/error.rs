use thiserror::Error;

#[derive(Debug, Error)]
pub enum RdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid RDF term: {0}")]
    InvalidTerm(String),
}
