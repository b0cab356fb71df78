//! Document parsing (Sophia).
//!
//! Every supported serialization is parsed to completion into a `TripleGraph`.
//! Triples whose predicate is not an IRI are dropped.

use crate::graph::TripleGraph;
use crate::term::{parse_node_term_display, parse_term_display, RdfNode};
use crate::RdfError;
use sophia::api::prelude::*;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    RdfXml,
}

impl RdfFormat {
    pub fn from_extension(ext: &str) -> Result<Self, RdfError> {
        match ext.to_lowercase().as_str() {
            "nt" | "ntriples" => Ok(Self::NTriples),
            "ttl" | "turtle" => Ok(Self::Turtle),
            "rdf" | "owl" | "xml" => Ok(Self::RdfXml),
            other => Err(RdfError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    pub fn from_name(name: &str) -> Result<Self, RdfError> {
        match name.to_lowercase().as_str() {
            "ntriples" | "n-triples" | "nt" => Ok(Self::NTriples),
            "turtle" | "ttl" => Ok(Self::Turtle),
            "rdfxml" | "rdf/xml" | "xml" | "owl" => Ok(Self::RdfXml),
            other => Err(RdfError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NTriples => "ntriples",
            Self::Turtle => "turtle",
            Self::RdfXml => "rdfxml",
        }
    }
}

fn push_display_triple(
    graph: &mut TripleGraph,
    subject: &str,
    predicate: &str,
    object: &str,
) -> Result<(), RdfError> {
    let subject = parse_node_term_display(subject)?;
    let RdfNode::Iri(predicate_iri) = parse_node_term_display(predicate)? else {
        return Ok(());
    };
    let object = parse_term_display(object)?;
    graph.insert(subject, predicate_iri, object);
    Ok(())
}

fn parse_error(format: RdfFormat, err: impl std::fmt::Display) -> RdfError {
    RdfError::Parse(format!("failed to parse {}: {err}", format.name()))
}

pub fn parse_graph(bytes: &[u8], format: RdfFormat) -> Result<TripleGraph, RdfError> {
    let cursor = std::io::Cursor::new(bytes);
    let reader = std::io::BufReader::new(cursor);
    let mut graph = TripleGraph::new();

    match format {
        RdfFormat::NTriples => {
            let mut parser = sophia::turtle::parser::nt::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| -> Result<(), RdfError> {
                    push_display_triple(
                        &mut graph,
                        &t.s().to_string(),
                        &t.p().to_string(),
                        &t.o().to_string(),
                    )
                })
                .map_err(|e| parse_error(format, e))?;
        }
        RdfFormat::Turtle => {
            let mut parser = sophia::turtle::parser::turtle::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| -> Result<(), RdfError> {
                    push_display_triple(
                        &mut graph,
                        &t.s().to_string(),
                        &t.p().to_string(),
                        &t.o().to_string(),
                    )
                })
                .map_err(|e| parse_error(format, e))?;
        }
        RdfFormat::RdfXml => {
            let mut parser = sophia::xml::parser::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| -> Result<(), RdfError> {
                    push_display_triple(
                        &mut graph,
                        &t.s().to_string(),
                        &t.p().to_string(),
                        &t.o().to_string(),
                    )
                })
                .map_err(|e| parse_error(format, e))?;
        }
    }

    Ok(graph)
}

/// Parse a file, picking the format from its extension unless one is given.
pub fn parse_graph_file(path: &Path, format: Option<RdfFormat>) -> Result<TripleGraph, RdfError> {
    let format = match format {
        Some(format) => format,
        None => {
            let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
            RdfFormat::from_extension(ext)?
        }
    };
    let bytes = std::fs::read(path)?;
    parse_graph(&bytes, format)
}
