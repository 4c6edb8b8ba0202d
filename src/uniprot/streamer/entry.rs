//! Depth-safe decoder for one complete `<entry>` subtree
//!
//! Each `decode_*` function consumes its element's events through the
//! matching end tag, so the caller's loop only ever sees direct children.
//! Unknown children are skipped, never rejected.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::UniProtError;
use super::helpers::{
    get_attribute, parse_attribute, parse_evidence, read_evidenced_text, read_text_content,
    skip_element, unexpected_eof, xml_err,
};
use crate::uniprot::models::*;

/// Decode the `<entry>` whose start tag is `start` into `entry`.
///
/// On failure the decode stops at the failing token and `entry` keeps
/// whatever was populated up to that point; the caller pairs it with the
/// error.
pub(super) fn decode_entry<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
    entry: &mut Entry,
) -> Result<(), UniProtError> {
    decode_entry_attributes(start, entry)?;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"accession" => entry
                    .accessions
                    .push(read_text_content(reader, b"accession")?),
                b"name" => {
                    let name_type = get_attribute(e, "type")?;
                    let value = read_text_content(reader, b"name")?;
                    entry.names.push(Name { name_type, value });
                }
                b"protein" => entry.protein = decode_protein(reader)?,
                b"gene" => entry.genes.push(Gene {
                    names: decode_name_list(reader, b"gene")?,
                }),
                b"organism" => entry.organism = decode_organism(reader, b"organism")?,
                b"organismHost" => entry
                    .organism_hosts
                    .push(decode_organism(reader, b"organismHost")?),
                b"geneLocation" => entry.gene_locations.push(decode_gene_location(reader, e)?),
                b"reference" => entry.references.push(decode_reference(reader, e)?),
                b"comment" => entry.comments.push(decode_comment(reader, e)?),
                b"dbReference" => entry
                    .db_references
                    .push(decode_db_reference(reader, e, false)?),
                b"proteinExistence" => {
                    entry.protein_existence = ProteinExistence {
                        existence_type: get_attribute(e, "type")?.unwrap_or_default(),
                    };
                    skip_element(reader, e)?;
                }
                b"keyword" => entry
                    .keywords
                    .push(read_evidenced_text(reader, b"keyword")?),
                b"feature" => entry.features.push(decode_feature(reader, e)?),
                b"sequence" => entry.sequence = decode_sequence(reader, e)?,
                _ => skip_element(reader, e)?,
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"dbReference" => entry
                    .db_references
                    .push(decode_db_reference(reader, e, true)?),
                b"proteinExistence" => {
                    entry.protein_existence = ProteinExistence {
                        existence_type: get_attribute(e, "type")?.unwrap_or_default(),
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"entry" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"entry")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

/// Decode the scalar attributes of an `<entry>` tag. Also used alone for
/// the degenerate self-closing form.
pub(super) fn decode_entry_attributes(
    start: &BytesStart,
    entry: &mut Entry,
) -> Result<(), UniProtError> {
    entry.dataset = get_attribute(start, "dataset")?.unwrap_or_default();
    entry.created = get_attribute(start, "created")?.unwrap_or_default();
    entry.modified = get_attribute(start, "modified")?.unwrap_or_default();
    entry.version = parse_attribute(start, "version")?.unwrap_or(0);
    Ok(())
}

/// Decode the `<protein>` name section
fn decode_protein<R: BufRead>(reader: &mut Reader<R>) -> Result<ProteinNames, UniProtError> {
    let mut protein = ProteinNames::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"recommendedName" => {
                    protein.recommended = Some(decode_name_group(reader, b"recommendedName")?)
                }
                b"alternativeName" => protein
                    .alternative
                    .push(decode_name_group(reader, b"alternativeName")?),
                b"submittedName" => protein
                    .submitted
                    .push(decode_name_group(reader, b"submittedName")?),
                _ => skip_element(reader, e)?,
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"protein" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"protein")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(protein)
}

/// Decode a fullName/shortName group ending at `</tag>`
fn decode_name_group<R: BufRead>(
    reader: &mut Reader<R>,
    tag: &[u8],
) -> Result<NameGroup, UniProtError> {
    let mut group = NameGroup::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"fullName" => group.full_name = read_evidenced_text(reader, b"fullName")?,
                b"shortName" => group
                    .short_names
                    .push(read_evidenced_text(reader, b"shortName")?),
                _ => skip_element(reader, e)?,
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == tag {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(tag)),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(group)
}

/// Collect `<name>` children until `</tag>`, skipping everything else
fn decode_name_list<R: BufRead>(
    reader: &mut Reader<R>,
    tag: &[u8],
) -> Result<Vec<Name>, UniProtError> {
    let mut names = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"name" {
                    let name_type = get_attribute(e, "type")?;
                    let value = read_text_content(reader, b"name")?;
                    names.push(Name { name_type, value });
                } else {
                    skip_element(reader, e)?;
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == tag {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(tag)),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(names)
}

/// Decode an organism description ending at `</tag>` (`organism` or
/// `organismHost` share the shape)
fn decode_organism<R: BufRead>(
    reader: &mut Reader<R>,
    tag: &[u8],
) -> Result<Organism, UniProtError> {
    let mut organism = Organism::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"name" => {
                    let name_type = get_attribute(e, "type")?;
                    let value = read_text_content(reader, b"name")?;
                    organism.names.push(Name { name_type, value });
                }
                b"dbReference" => organism
                    .db_references
                    .push(decode_db_reference(reader, e, false)?),
                b"lineage" => organism.lineage = decode_lineage(reader)?,
                b"classification" => organism
                    .classification
                    .push(read_text_content(reader, b"classification")?),
                _ => skip_element(reader, e)?,
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"dbReference" {
                    organism
                        .db_references
                        .push(decode_db_reference(reader, e, true)?);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == tag {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(tag)),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(organism)
}

/// Decode a `<lineage>` taxon list
fn decode_lineage<R: BufRead>(reader: &mut Reader<R>) -> Result<Lineage, UniProtError> {
    let mut lineage = Lineage::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"taxon" {
                    lineage.taxa.push(read_evidenced_text(reader, b"taxon")?);
                } else {
                    skip_element(reader, e)?;
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"lineage" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"lineage")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(lineage)
}

/// Decode a `<geneLocation>` element
fn decode_gene_location<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<GeneLocation, UniProtError> {
    let mut location = GeneLocation {
        gene: get_attribute(start, "gene")?,
        ..Default::default()
    };
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"name" => {
                    let name_type = get_attribute(e, "type")?;
                    let value = read_text_content(reader, b"name")?;
                    location.name = Name { name_type, value };
                }
                b"chromosome" => {
                    location.chromosome = Some(read_text_content(reader, b"chromosome")?)
                }
                b"mapPosition" => {
                    location.map_position = Some(read_text_content(reader, b"mapPosition")?)
                }
                b"evidence" => {
                    location.evidence.push(parse_evidence(e)?);
                    skip_element(reader, e)?;
                }
                _ => skip_element(reader, e)?,
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"evidence" {
                    location.evidence.push(parse_evidence(e)?);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"geneLocation" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"geneLocation")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(location)
}

/// Decode a `<reference>` element
fn decode_reference<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Reference, UniProtError> {
    let mut reference = Reference {
        key: get_attribute(start, "key")?,
        ..Default::default()
    };
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"citation" => reference.citation = decode_citation(reader, e)?,
                b"scope" => reference.scope.push(read_text_content(reader, b"scope")?),
                b"source" => reference.source = decode_source(reader)?,
                b"protein" => reference.protein_names = decode_name_list(reader, b"protein")?,
                b"gene" => reference.gene_names = decode_name_list(reader, b"gene")?,
                b"organism" => reference.organism_names = decode_name_list(reader, b"organism")?,
                b"dbReference" => reference
                    .db_references
                    .push(decode_db_reference(reader, e, false)?),
                _ => skip_element(reader, e)?,
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"dbReference" {
                    reference
                        .db_references
                        .push(decode_db_reference(reader, e, true)?);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"reference" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"reference")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(reference)
}

/// Decode a `<citation>` element
fn decode_citation<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Citation, UniProtError> {
    let mut citation = Citation {
        citation_type: get_attribute(start, "type")?.unwrap_or_default(),
        ..Default::default()
    };
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"title" => citation.title = Some(read_text_content(reader, b"title")?),
                b"date" => citation.date = Some(read_text_content(reader, b"date")?),
                b"journal" => citation.journal = Some(read_text_content(reader, b"journal")?),
                b"authorList" => citation.authors = decode_author_list(reader)?,
                b"dbReference" => citation
                    .db_references
                    .push(decode_db_reference(reader, e, false)?),
                _ => skip_element(reader, e)?,
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"dbReference" {
                    citation
                        .db_references
                        .push(decode_db_reference(reader, e, true)?);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"citation" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"citation")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(citation)
}

/// Decode an `<authorList>` into person names, publication order preserved
fn decode_author_list<R: BufRead>(reader: &mut Reader<R>) -> Result<Vec<String>, UniProtError> {
    let mut authors = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"person" {
                    authors.push(get_attribute(e, "name")?.unwrap_or_default());
                }
            }
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"person" {
                    authors.push(get_attribute(e, "name")?.unwrap_or_default());
                }
                skip_element(reader, e)?;
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"authorList" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"authorList")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(authors)
}

/// Decode a reference `<source>` element
fn decode_source<R: BufRead>(reader: &mut Reader<R>) -> Result<ReferenceSource, UniProtError> {
    let mut source = ReferenceSource::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"organism" => source.organism = Some(decode_organism(reader, b"organism")?),
                b"strain" => source.strains.push(read_text_content(reader, b"strain")?),
                b"dbReference" => source
                    .db_references
                    .push(decode_db_reference(reader, e, false)?),
                _ => skip_element(reader, e)?,
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"dbReference" {
                    source
                        .db_references
                        .push(decode_db_reference(reader, e, true)?);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"source" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"source")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(source)
}

/// Decode a `<comment>` element with its typed sub-payloads
fn decode_comment<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Comment, UniProtError> {
    let mut comment = Comment {
        comment_type: get_attribute(start, "type")?.unwrap_or_default(),
        molecule: get_attribute(start, "molecule")?,
        ..Default::default()
    };
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"text" => comment.texts.push(read_evidenced_text(reader, b"text")?),
                b"location" => comment.location = Some(decode_location(reader)?),
                b"reaction" => comment.reaction = Some(decode_reaction(reader)?),
                b"enzyme" => comment.enzyme = Some(decode_enzyme(reader)?),
                b"ph" => comment.ph = Some(read_text_content(reader, b"ph")?),
                b"temperature" => {
                    comment.temperature = Some(read_text_content(reader, b"temperature")?)
                }
                b"kineticParameters" => {
                    comment.kinetic_parameters = Some(decode_kinetic_parameters(reader)?)
                }
                b"evidence" => {
                    comment.evidence.push(parse_evidence(e)?);
                    skip_element(reader, e)?;
                }
                _ => skip_element(reader, e)?,
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"evidence" {
                    comment.evidence.push(parse_evidence(e)?);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"comment" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"comment")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(comment)
}

/// Decode a `<reaction>` element
fn decode_reaction<R: BufRead>(reader: &mut Reader<R>) -> Result<Reaction, UniProtError> {
    let mut reaction = Reaction::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"name" => reaction.names.push(read_text_content(reader, b"name")?),
                b"ec" => reaction.ec = Some(read_text_content(reader, b"ec")?),
                b"dbReference" => reaction
                    .db_references
                    .push(decode_db_reference(reader, e, false)?),
                _ => skip_element(reader, e)?,
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"dbReference" {
                    reaction
                        .db_references
                        .push(decode_db_reference(reader, e, true)?);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"reaction" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"reaction")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(reaction)
}

/// Decode an `<enzyme>` EC-number list
fn decode_enzyme<R: BufRead>(reader: &mut Reader<R>) -> Result<Enzyme, UniProtError> {
    let mut enzyme = Enzyme::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"ec" {
                    enzyme.ec_numbers.push(read_text_content(reader, b"ec")?);
                } else {
                    skip_element(reader, e)?;
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"enzyme" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"enzyme")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(enzyme)
}

/// Decode a `<kineticParameters>` element
fn decode_kinetic_parameters<R: BufRead>(
    reader: &mut Reader<R>,
) -> Result<KineticParameters, UniProtError> {
    let mut params = KineticParameters::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"km" => params.km.push(decode_kinetic_value(reader, e)?),
                b"vmax" => params.vmax.push(decode_kinetic_value(reader, e)?),
                _ => skip_element(reader, e)?,
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"kineticParameters" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"kineticParameters")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(params)
}

/// Decode one `<km>`/`<vmax>` measurement
fn decode_kinetic_value<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<KineticValue, UniProtError> {
    let unit = get_attribute(start, "unit")?;
    let tag = start.local_name().as_ref().to_vec();
    let text = read_evidenced_text(reader, &tag)?;
    Ok(KineticValue {
        value: text.value,
        unit,
    })
}

/// Decode a `<feature>` element
fn decode_feature<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Feature, UniProtError> {
    let mut feature = Feature {
        feature_type: get_attribute(start, "type")?.unwrap_or_default(),
        id: get_attribute(start, "id")?,
        description: get_attribute(start, "description")?,
        reference: get_attribute(start, "ref")?,
        ..Default::default()
    };
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"location" => feature.location = decode_location(reader)?,
                b"original" => feature.original = Some(read_text_content(reader, b"original")?),
                b"variation" => feature.variations.push(decode_variation(reader)?),
                b"evidence" => {
                    feature.evidence.push(parse_evidence(e)?);
                    skip_element(reader, e)?;
                }
                _ => skip_element(reader, e)?,
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"evidence" {
                    feature.evidence.push(parse_evidence(e)?);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"feature" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"feature")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(feature)
}

/// Decode a `<variation>` element (replacement residues, optionally
/// restating the originals)
fn decode_variation<R: BufRead>(reader: &mut Reader<R>) -> Result<Variation, UniProtError> {
    let mut variation = Variation::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => variation.sequence.push_str(&t.unescape()?),
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"original" {
                    variation.original = Some(read_text_content(reader, b"original")?);
                } else {
                    skip_element(reader, e)?;
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"variation" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"variation")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(variation)
}

/// Decode a `<location>`: a single position or a begin/end range.
///
/// Only the representation present in the source is populated.
fn decode_location<R: BufRead>(reader: &mut Reader<R>) -> Result<Location, UniProtError> {
    let mut location = Location::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"position" => location.position = Some(position_from_attributes(e)?),
                b"begin" => location.begin = Some(position_from_attributes(e)?),
                b"end" => location.end = Some(position_from_attributes(e)?),
                _ => {}
            },
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"position" => location.position = Some(decode_position(reader, e)?),
                b"begin" => location.begin = Some(decode_position(reader, e)?),
                b"end" => location.end = Some(decode_position(reader, e)?),
                _ => skip_element(reader, e)?,
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"location" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"location")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(location)
}

/// Build a position from an empty tag's attributes. A missing coordinate
/// (status-only endpoints such as "unknown") stays 0.
fn position_from_attributes(e: &BytesStart) -> Result<Position, UniProtError> {
    Ok(Position {
        status: get_attribute(e, "status")?,
        value: parse_attribute(e, "position")?.unwrap_or(0),
    })
}

/// Decode a non-empty position tag: the coordinate comes from the
/// `position` attribute when present, else from integer character data.
fn decode_position<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Position, UniProtError> {
    let status = get_attribute(start, "status")?;
    let attr_value: Option<u32> = parse_attribute(start, "position")?;
    let tag = start.local_name().as_ref().to_vec();
    let text = read_text_content(reader, &tag)?;
    let value = match attr_value {
        Some(v) => v,
        None => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0
            } else {
                trimmed
                    .parse::<u32>()
                    .map_err(|_| UniProtError::InvalidValue {
                        what: "position",
                        value: text.clone(),
                    })?
            }
        }
    };
    Ok(Position { status, value })
}

/// Decode the `<sequence>` payload. The `length` attribute and the residue
/// string are both kept as written; they are not cross-validated.
fn decode_sequence<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Sequence, UniProtError> {
    let mut sequence = Sequence {
        length: parse_attribute(start, "length")?.unwrap_or(0),
        mass: parse_attribute(start, "mass")?.unwrap_or(0),
        version: parse_attribute(start, "version")?.unwrap_or(0),
        modified: get_attribute(start, "modified")?,
        checksum: get_attribute(start, "checksum")?,
        value: String::new(),
    };
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => sequence.value.push_str(&t.unescape()?),
            Ok(Event::Start(ref e)) => skip_element(reader, e)?,
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"sequence" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"sequence")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(sequence)
}

/// Decode a `<dbReference>`; `is_empty` marks the self-closing form
fn decode_db_reference<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
    is_empty: bool,
) -> Result<DbReference, UniProtError> {
    let mut db_reference = DbReference {
        db_type: get_attribute(start, "type")?.unwrap_or_default(),
        id: get_attribute(start, "id")?.unwrap_or_default(),
        evidence: Vec::new(),
    };
    if is_empty {
        return Ok(db_reference);
    }
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"evidence" {
                    db_reference.evidence.push(parse_evidence(e)?);
                }
            }
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"evidence" {
                    db_reference.evidence.push(parse_evidence(e)?);
                }
                skip_element(reader, e)?;
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"dbReference" {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof(b"dbReference")),
            Err(e) => return Err(xml_err(reader, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(db_reference)
}
