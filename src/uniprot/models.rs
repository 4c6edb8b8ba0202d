//! Data models for UniProtKB entries
//!
//! These shapes mirror the archive's element structure one field per tag.
//! They carry no behavior beyond a few accessors; all decoding lives in the
//! streamer. Repeated children keep their source order.

use serde::{Deserialize, Serialize};

/// One fully-decoded protein record from the archive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Dataset the entry belongs to ("Swiss-Prot" or "TrEMBL")
    pub dataset: String,

    /// Creation date as written in the archive
    pub created: String,

    /// Last-modification date as written in the archive
    pub modified: String,

    /// Entry version number
    pub version: u32,

    /// Accession identifiers; non-empty on success, first is canonical
    pub accessions: Vec<String>,

    /// Entry-level names (mnemonic identifiers)
    pub names: Vec<Name>,

    /// Protein name section (recommended / alternative / submitted)
    pub protein: ProteinNames,

    /// Genes coding for the protein
    pub genes: Vec<Gene>,

    /// Source organism
    pub organism: Organism,

    /// Host organisms (for viral entries)
    pub organism_hosts: Vec<Organism>,

    /// Subcellular gene locations (plastid, mitochondrion, ...)
    pub gene_locations: Vec<GeneLocation>,

    /// Literature references with scoped applicability
    pub references: Vec<Reference>,

    /// Typed annotations (function, kinetics, pH dependence, ...)
    pub comments: Vec<Comment>,

    /// Cross-references to external databases
    pub db_references: Vec<DbReference>,

    /// Evidence level for the protein's existence
    pub protein_existence: ProteinExistence,

    /// Controlled-vocabulary keywords
    pub keywords: Vec<EvidencedString>,

    /// Positional sequence annotations
    pub features: Vec<Feature>,

    /// The sequence payload (exactly one per entry)
    pub sequence: Sequence,
}

impl Entry {
    /// The stable identifier referenced by external tooling: the first
    /// accession in source order, if any.
    pub fn canonical_accession(&self) -> Option<&str> {
        self.accessions.first().map(String::as_str)
    }

    /// The recommended full protein name, if the entry carries one
    pub fn primary_name(&self) -> Option<&str> {
        self.protein
            .recommended
            .as_ref()
            .map(|group| group.full_name.value.as_str())
    }
}

/// A typed name (`type` attribute plus text content)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Name {
    /// Name category, e.g. "scientific", "common", "primary"
    pub name_type: Option<String>,

    /// The name itself
    pub value: String,
}

/// A text value decorated with evidence annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidencedString {
    /// The text content
    pub value: String,

    /// Evidence supporting this value
    pub evidence: Vec<Evidence>,
}

/// A cross-cutting evidence annotation: a type code plus a reference key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Evidence type code (ECO term or legacy code)
    pub evidence_type: String,

    /// Key referencing the evidence definition within the entry
    pub key: Option<String>,
}

/// The polymorphic protein name section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProteinNames {
    /// The single recommended name, when curated
    pub recommended: Option<NameGroup>,

    /// Alternative names
    pub alternative: Vec<NameGroup>,

    /// Submitted names (uncurated entries)
    pub submitted: Vec<NameGroup>,
}

/// A full name with its abbreviations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameGroup {
    /// The full protein name
    pub full_name: EvidencedString,

    /// Short forms of the name
    pub short_names: Vec<EvidencedString>,
}

/// A gene coding for the protein
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    /// Gene names, typed "primary", "synonym", "ordered locus", ...
    pub names: Vec<Name>,
}

/// Source or host organism description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    /// Organism names, typed "scientific", "common", ...
    pub names: Vec<Name>,

    /// Taxonomy cross-references
    pub db_references: Vec<DbReference>,

    /// Taxonomic lineage from domain to genus
    pub lineage: Lineage,

    /// Free-form classification strings
    pub classification: Vec<String>,
}

/// Taxonomic lineage: an ordered list of taxa
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    /// Taxa in descending rank order
    pub taxa: Vec<EvidencedString>,
}

/// Subcellular location of the coding gene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneLocation {
    /// Gene attribute, when the location is gene-specific
    pub gene: Option<String>,

    /// Evidence supporting the location
    pub evidence: Vec<Evidence>,

    /// Location name
    pub name: Name,

    /// Chromosome designation
    pub chromosome: Option<String>,

    /// Map position on the chromosome
    pub map_position: Option<String>,
}

/// A cross-reference to an external database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbReference {
    /// Target database name
    pub db_type: String,

    /// Identifier within the target database
    pub id: String,

    /// Evidence supporting the cross-reference
    pub evidence: Vec<Evidence>,
}

/// A literature reference and the scope it applies to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Reference key, unique within the entry
    pub key: Option<String>,

    /// The citation itself
    pub citation: Citation,

    /// What the reference was used for ("SEQUENCE", "FUNCTION", ...)
    pub scope: Vec<String>,

    /// Sample source the work was performed on
    pub source: ReferenceSource,

    /// Protein names as used in the cited work
    pub protein_names: Vec<Name>,

    /// Gene names as used in the cited work
    pub gene_names: Vec<Name>,

    /// Organism names as used in the cited work
    pub organism_names: Vec<Name>,

    /// Cross-references attached to the reference
    pub db_references: Vec<DbReference>,
}

/// A citation: publication type, provenance, and authors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Publication type ("journal article", "submission", ...)
    pub citation_type: String,

    /// Publication date as written in the archive
    pub date: Option<String>,

    /// Publication title
    pub title: Option<String>,

    /// Journal name
    pub journal: Option<String>,

    /// Author names in publication order
    pub authors: Vec<String>,

    /// Cross-references (DOI, PubMed, ...)
    pub db_references: Vec<DbReference>,
}

/// The biological source sampled in a cited work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSource {
    /// Organism the sample came from
    pub organism: Option<Organism>,

    /// Cross-references for the source
    pub db_references: Vec<DbReference>,

    /// Strain designations
    pub strains: Vec<String>,
}

/// A typed annotation with heterogeneous optional sub-payloads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Annotation category ("function", "catalytic activity", ...)
    pub comment_type: String,

    /// Molecule (isoform) the annotation applies to
    pub molecule: Option<String>,

    /// Evidence supporting the annotation
    pub evidence: Vec<Evidence>,

    /// Free-text runs
    pub texts: Vec<EvidencedString>,

    /// Sequence location the annotation applies to
    pub location: Option<Location>,

    /// Catalyzed reaction (for catalytic-activity annotations)
    pub reaction: Option<Reaction>,

    /// Enzyme classification (for enzyme-regulation annotations)
    pub enzyme: Option<Enzyme>,

    /// pH dependence description
    pub ph: Option<String>,

    /// Temperature dependence description
    pub temperature: Option<String>,

    /// Kinetic parameters (for biophysicochemical annotations)
    pub kinetic_parameters: Option<KineticParameters>,
}

/// A catalyzed chemical reaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Reaction names
    pub names: Vec<String>,

    /// Cross-references (Rhea, ChEBI, ...)
    pub db_references: Vec<DbReference>,

    /// Enzyme Commission number
    pub ec: Option<String>,
}

/// Enzyme classification numbers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enzyme {
    /// EC numbers
    pub ec_numbers: Vec<String>,
}

/// Michaelis-Menten kinetic parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KineticParameters {
    /// KM measurements
    pub km: Vec<KineticValue>,

    /// Vmax measurements
    pub vmax: Vec<KineticValue>,
}

/// One kinetic measurement with its unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KineticValue {
    /// Measured value, kept verbatim (often a range or qualified number)
    pub value: String,

    /// Measurement unit
    pub unit: Option<String>,
}

/// Evidence level for the protein's existence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProteinExistence {
    /// Existence category ("evidence at protein level", "predicted", ...)
    pub existence_type: String,
}

/// A positional annotation anchored to the sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature category ("chain", "active site", "sequence variant", ...)
    pub feature_type: String,

    /// Stable feature identifier
    pub id: Option<String>,

    /// Human-readable description
    pub description: Option<String>,

    /// Key of the reference the feature derives from
    pub reference: Option<String>,

    /// Evidence supporting the feature
    pub evidence: Vec<Evidence>,

    /// Where on the sequence the feature applies
    pub location: Location,

    /// Original residues (for variants and conflicts)
    pub original: Option<String>,

    /// Replacement variations
    pub variations: Vec<Variation>,
}

/// A sequence variation observed at a feature location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    /// Original residues, when restated inside the variation
    pub original: Option<String>,

    /// Replacement residue string
    pub sequence: String,
}

/// Where a feature applies: a single position or a begin/end range.
///
/// The two representations are mutually exclusive in the source; whichever
/// is present is populated and the other fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Single-residue position
    pub position: Option<Position>,

    /// Range start
    pub begin: Option<Position>,

    /// Range end
    pub end: Option<Position>,
}

impl Location {
    /// True when the location is a begin/end range rather than a point
    pub fn is_range(&self) -> bool {
        self.begin.is_some() || self.end.is_some()
    }
}

/// One sequence coordinate with its certainty status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Certainty status ("certain", "uncertain", "less than", ...)
    pub status: Option<String>,

    /// 1-based residue coordinate; 0 when the source leaves it unknown
    pub value: u32,
}

/// The literal residue string plus its metadata.
///
/// The `length` attribute and the residue string are both preserved as
/// written; the decoder does not cross-validate them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    /// Declared sequence length in residues
    pub length: u32,

    /// Declared molecular mass in Daltons
    pub mass: u32,

    /// Sequence version number
    pub version: u32,

    /// Date the sequence last changed
    pub modified: Option<String>,

    /// CRC64 checksum as written in the archive
    pub checksum: Option<String>,

    /// The residue string
    pub value: String,
}

impl Sequence {
    /// Number of residues actually present in the decoded string
    pub fn residue_count(&self) -> usize {
        self.value.len()
    }
}
