//! Vocabulary IRIs.
//!
//! Constants are grouped by vocabulary; only the terms the OWL translation and the
//! reification resolver actually look at are listed.

/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#`
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// `http://www.w3.org/2000/01/rdf-schema#`
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// `http://www.w3.org/2002/07/owl#`
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:subject IRI (legacy reification: statement subject)
    pub const SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";

    /// rdf:predicate IRI (legacy reification: statement predicate)
    pub const PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";

    /// rdf:object IRI (legacy reification: statement object)
    pub const OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";

    /// rdf:Statement IRI
    pub const STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
}

/// RDFS vocabulary constants
pub mod rdfs {
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
    pub const IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";

    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
}

/// OWL vocabulary constants
pub mod owl {
    /// owl:Axiom IRI (type of a reified, annotated axiom)
    pub const AXIOM: &str = "http://www.w3.org/2002/07/owl#Axiom";

    /// owl:Annotation IRI (type of a reified, annotated annotation)
    pub const ANNOTATION: &str = "http://www.w3.org/2002/07/owl#Annotation";

    /// owl:annotatedSource IRI
    pub const ANNOTATED_SOURCE: &str = "http://www.w3.org/2002/07/owl#annotatedSource";

    /// owl:annotatedProperty IRI
    pub const ANNOTATED_PROPERTY: &str = "http://www.w3.org/2002/07/owl#annotatedProperty";

    /// owl:annotatedTarget IRI
    pub const ANNOTATED_TARGET: &str = "http://www.w3.org/2002/07/owl#annotatedTarget";

    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    pub const ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
    pub const NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";

    pub const EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
    pub const DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#disjointWith";
    pub const INVERSE_OF: &str = "http://www.w3.org/2002/07/owl#inverseOf";

    pub const VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";
    pub const DEPRECATED: &str = "http://www.w3.org/2002/07/owl#deprecated";
    pub const PRIOR_VERSION: &str = "http://www.w3.org/2002/07/owl#priorVersion";
    pub const BACKWARD_COMPATIBLE_WITH: &str =
        "http://www.w3.org/2002/07/owl#backwardCompatibleWith";
    pub const INCOMPATIBLE_WITH: &str = "http://www.w3.org/2002/07/owl#incompatibleWith";
}

/// Annotation properties every OWL ontology gets without declaring them.
pub const BUILT_IN_ANNOTATION_PROPERTIES: [&str; 9] = [
    rdfs::LABEL,
    rdfs::COMMENT,
    rdfs::SEE_ALSO,
    rdfs::IS_DEFINED_BY,
    owl::VERSION_INFO,
    owl::DEPRECATED,
    owl::PRIOR_VERSION,
    owl::BACKWARD_COMPATIBLE_WITH,
    owl::INCOMPATIBLE_WITH,
];

/// Types whose `rdf:type` triple declares an entity rather than asserting membership.
pub const DECLARATION_TYPES: [&str; 5] = [
    owl::CLASS,
    owl::OBJECT_PROPERTY,
    owl::DATATYPE_PROPERTY,
    owl::ANNOTATION_PROPERTY,
    owl::NAMED_INDIVIDUAL,
];

/// True for IRIs minted by the RDF, RDFS or OWL vocabularies themselves.
pub fn is_reserved_vocabulary(iri: &str) -> bool {
    iri.starts_with(RDF_NS) || iri.starts_with(RDFS_NS) || iri.starts_with(OWL_NS)
}
