//! owlreify CLI
//!
//! Translates an RDF document into an OWL ontology, resolving reified axioms
//! (`owl:Axiom`, `owl:Annotation`, `rdf:Statement` nodes) into annotated axioms.
//!
//! - `translate`: full translation, written as JSON.
//! - `nodes`: dry run listing every reification node and what it resolves to.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use owlreify_core::{
    translate_document, MalformedNodePolicy, NodeDiagnostic, ReificationKind, ReifyConfig,
};
use owlreify_ontology::{AnnotationPolicy, Axiom, OntologyConsumer};
use owlreify_rdf::{parse_graph_file, RdfFormat, TripleGraph};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "owlreify")]
#[command(author, version, about = "Resolve reified OWL axioms in RDF documents")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a document and write the ontology as JSON.
    Translate {
        /// Input RDF file (.ttl, .nt, .rdf, .owl)
        input: PathBuf,
        /// Input format (turtle, ntriples, rdfxml); inferred from the extension if omitted
        #[arg(long)]
        format: Option<String>,
        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Abort on the first malformed node instead of skipping it
        #[arg(long)]
        strict: bool,
        /// Only classify declared (and built-in) annotation properties
        #[arg(long)]
        declared_only: bool,
    },

    /// List reification nodes and what they resolve to, without committing anything.
    Nodes {
        /// Input RDF file
        input: PathBuf,
        #[arg(long)]
        format: Option<String>,
    },
}

#[derive(Serialize)]
struct TranslationReport<'a> {
    ontology_iri: Option<&'a str>,
    axioms: Vec<&'a Axiom>,
    diagnostics: &'a [NodeDiagnostic],
    reified: usize,
    repaired: usize,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Translate {
            input,
            format,
            config,
            out,
            strict,
            declared_only,
        } => {
            let mut config = load_config(config.as_deref())?;
            if strict {
                config.malformed_nodes = MalformedNodePolicy::Abort;
            }
            if declared_only {
                config.annotation_policy = AnnotationPolicy::Declared;
            }
            cmd_translate(&input, format.as_deref(), &config, out.as_deref())?;
        }
        Commands::Nodes { input, format } => {
            cmd_nodes(&input, format.as_deref())?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ReifyConfig> {
    let Some(path) = path else {
        return Ok(ReifyConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = ReifyConfig::from_json_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

fn load_graph(input: &Path, format: Option<&str>) -> Result<TripleGraph> {
    let format = format.map(RdfFormat::from_name).transpose()?;
    let graph = parse_graph_file(input, format)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    tracing::info!(input = %input.display(), triples = graph.len(), "parsed document");
    Ok(graph)
}

fn cmd_translate(
    input: &Path,
    format: Option<&str>,
    config: &ReifyConfig,
    out: Option<&Path>,
) -> Result<()> {
    eprintln!("{} {}", "Translating".green().bold(), input.display());

    let graph = load_graph(input, format)?;
    let translation = translate_document(&graph, config)
        .with_context(|| format!("translation of {} aborted", input.display()))?;

    let report = TranslationReport {
        ontology_iri: translation.ontology.iri.as_deref(),
        axioms: translation.ontology.axioms().collect(),
        diagnostics: &translation.diagnostics,
        reified: translation.reified,
        repaired: translation.repaired,
    };
    let json = serde_json::to_string_pretty(&report)?;

    match out {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(out = %path.display(), bytes = json.len(), "wrote translation");
            eprintln!("  {} {}", "→".cyan(), path.display());
        }
        None => println!("{json}"),
    }

    let skipped = translation.diagnostics.len();
    let skipped_label = if skipped == 0 {
        "0 skipped".normal()
    } else {
        format!("{skipped} skipped").yellow().bold()
    };
    eprintln!(
        "{} {} axioms, {} reified, {} repaired, {}",
        "ok".green().bold(),
        translation.ontology.len(),
        translation.reified,
        translation.repaired,
        skipped_label
    );
    Ok(())
}

fn cmd_nodes(input: &Path, format: Option<&str>) -> Result<()> {
    let graph = load_graph(input, format)?;
    let config = ReifyConfig::default();
    let vocabulary = OntologyConsumer::new(&graph, config.annotation_policy);

    let mut total = 0usize;
    for handler in config.handlers() {
        for node in handler.nodes(&graph) {
            total += 1;
            let kind = kind_label(handler.kind());
            match handler.resolve(&graph, &vocabulary, &node) {
                Ok(reification) => {
                    let triple = &reification.triple;
                    println!(
                        "{} {} {} {} {} ({} annotations)",
                        kind.cyan(),
                        node,
                        triple.subject,
                        triple.property,
                        triple.target,
                        reification.annotations.len()
                    );
                }
                Err(err) => {
                    println!("{} {} {} {}", kind.cyan(), node, "error:".red().bold(), err);
                }
            }
        }
    }

    eprintln!("{} {} reification nodes", "ok".green().bold(), total);
    Ok(())
}

fn kind_label(kind: ReificationKind) -> &'static str {
    match kind {
        ReificationKind::Axiom => "axiom",
        ReificationKind::Annotation => "annotation",
        ReificationKind::Statement => "statement",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TURTLE: &str = r#"
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex:   <http://example.org/> .

ex:A rdfs:subClassOf ex:B .
[] a owl:Axiom ;
   owl:annotatedSource ex:A ;
   owl:annotatedProperty rdfs:subClassOf ;
   owl:annotatedTarget ex:B ;
   rdfs:comment "asserted by curator" .
"#;

    fn write_temp(suffix: &str, text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), ReifyConfig::default());
    }

    #[test]
    fn config_file_is_parsed() {
        let file = write_temp(".json", r#"{ "malformed_nodes": "abort" }"#);
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.malformed_nodes, MalformedNodePolicy::Abort);
    }

    #[test]
    fn bad_config_names_the_file() {
        let file = write_temp(".json", "{ not json");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn translate_writes_a_report() {
        let input = write_temp(".ttl", TURTLE);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ontology.json");

        cmd_translate(input.path(), None, &ReifyConfig::default(), Some(&out)).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report["reified"], 1);
        assert_eq!(report["repaired"], 1);
        assert_eq!(report["axioms"].as_array().unwrap().len(), 1);
        assert!(report["diagnostics"].as_array().unwrap().is_empty());
    }

    #[test]
    fn unknown_format_name_is_an_error() {
        let input = write_temp(".ttl", TURTLE);
        assert!(load_graph(input.path(), Some("json-ld")).is_err());
    }
}
