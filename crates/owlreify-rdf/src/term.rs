//! RDF term model.
//!
//! Terms are kept as plain strings (IRIs always expanded, blank node labels without
//! the `_:` prefix). Ordering is derived so terms can live in `BTreeSet`s and give
//! deterministic output.

use crate::RdfError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject-position term: an IRI or a blank node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RdfNode {
    Iri(String),
    BlankNode(String),
}

impl RdfNode {
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Self::BlankNode(label.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::BlankNode(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }
}

impl fmt::Display for RdfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::BlankNode(label) => write!(f, "_:{label}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RdfLiteral {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl RdfLiteral {
    /// A plain literal with neither datatype nor language tag.
    pub fn simple(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }
}

impl fmt::Display for RdfLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_rdf_string(&self.lexical))?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{dt}>")
        } else {
            Ok(())
        }
    }
}

/// An object-position term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RdfObject {
    Node(RdfNode),
    Literal(RdfLiteral),
}

impl RdfObject {
    pub fn as_node(&self) -> Option<&RdfNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&RdfLiteral> {
        match self {
            Self::Node(_) => None,
            Self::Literal(lit) => Some(lit),
        }
    }
}

impl From<RdfNode> for RdfObject {
    fn from(node: RdfNode) -> Self {
        Self::Node(node)
    }
}

impl From<RdfLiteral> for RdfObject {
    fn from(lit: RdfLiteral) -> Self {
        Self::Literal(lit)
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => node.fmt(f),
            Self::Literal(lit) => lit.fmt(f),
        }
    }
}

// ============================================================================
// N-Triples display form
// ============================================================================

fn escape_rdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}

fn unescape_rdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Parse a term from its N-Triples display form (`<iri>`, `_:b0`, `"lex"@en`, ...).
pub fn parse_term_display(term: &str) -> Result<RdfObject, RdfError> {
    let s = term.trim();

    if let Some(rest) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(RdfObject::Node(RdfNode::Iri(rest.to_string())));
    }

    if let Some(rest) = s.strip_prefix("_:") {
        return Ok(RdfObject::Node(RdfNode::BlankNode(rest.to_string())));
    }

    if s.starts_with('"') {
        let mut end_quote = None;
        let mut escaped = false;
        for (i, ch) in s.char_indices().skip(1) {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '"' => {
                    end_quote = Some(i);
                    break;
                }
                _ => {}
            }
        }
        let Some(end) = end_quote else {
            return Err(RdfError::InvalidTerm(format!(
                "missing closing quote in literal: {s}"
            )));
        };

        let lexical = unescape_rdf_string(&s[1..end]);
        let rest = s[end + 1..].trim();

        let mut language = None;
        let mut datatype = None;
        if let Some(lang) = rest.strip_prefix('@') {
            language = Some(lang.to_string());
        } else if let Some(dt) = rest.strip_prefix("^^") {
            let dt = dt.trim();
            match dt.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
                Some(dt_iri) => datatype = Some(dt_iri.to_string()),
                None if !dt.is_empty() => datatype = Some(dt.to_string()),
                None => {}
            }
        }
        // `xsd:string` is the implicit datatype of a plain literal.
        if datatype.as_deref() == Some(XSD_STRING) {
            datatype = None;
        }

        return Ok(RdfObject::Literal(RdfLiteral {
            lexical,
            datatype,
            language,
        }));
    }

    Err(RdfError::InvalidTerm(format!("unsupported RDF term form: {s}")))
}

/// Like `parse_term_display`, but rejects literals.
pub fn parse_node_term_display(term: &str) -> Result<RdfNode, RdfError> {
    match parse_term_display(term)? {
        RdfObject::Node(node) => Ok(node),
        RdfObject::Literal(_) => Err(RdfError::InvalidTerm(format!(
            "expected IRI/blank node, got literal: {term}"
        ))),
    }
}
