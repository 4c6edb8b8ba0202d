use std::io::{BufReader, Cursor};

use super::*;

fn streamer_over(doc: &str) -> UniProtStreamer<BufReader<Cursor<Vec<u8>>>> {
    UniProtStreamer::new(BufReader::new(Cursor::new(doc.as_bytes().to_vec())))
}

const TWO_ENTRY_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<uniprot xmlns="http://uniprot.org/uniprot">
  <entry dataset="Swiss-Prot" created="2001-01-10" modified="2020-02-26" version="121">
    <accession>P12345</accession>
    <name>AATM_RABIT</name>
    <protein>
      <recommendedName>
        <fullName>Aspartate aminotransferase, mitochondrial</fullName>
        <shortName>mAspAT</shortName>
      </recommendedName>
    </protein>
    <gene>
      <name type="primary">GOT2</name>
    </gene>
    <organism>
      <name type="scientific">Oryctolagus cuniculus</name>
      <dbReference type="NCBI Taxonomy" id="9986"/>
      <lineage>
        <taxon>Eukaryota</taxon>
        <taxon>Metazoa</taxon>
      </lineage>
    </organism>
    <reference key="1">
      <citation type="journal article">
        <title>The complete amino acid sequence</title>
        <date>1985</date>
        <journal>J. Biol. Chem.</journal>
        <authorList>
          <person name="Kuramitsu S."/>
          <person name="Inoue K."/>
        </authorList>
      </citation>
      <scope>SEQUENCE</scope>
    </reference>
    <comment type="function">
      <text>Catalyzes the irreversible transamination.<evidence type="ECO:0000269" key="1"/></text>
    </comment>
    <dbReference type="EMBL" id="X12345"/>
    <proteinExistence type="evidence at protein level"/>
    <keyword>Aminotransferase</keyword>
    <feature type="chain" id="PRO_0000123" description="Mature chain">
      <location>
        <begin position="10"/>
        <end position="20"/>
      </location>
    </feature>
    <sequence length="10" mass="1100" version="2" checksum="9DF0142B">MKWVTFISLL</sequence>
  </entry>
  <entry dataset="TrEMBL" created="2010-05-05" modified="2021-01-01" version="7">
    <accession>Q99999</accession>
    <accession>Q88888</accession>
    <name>TEST2_HUMAN</name>
    <protein>
      <submittedName>
        <fullName>Uncharacterized protein</fullName>
      </submittedName>
    </protein>
    <organism>
      <name type="scientific">Homo sapiens</name>
    </organism>
    <sequence length="5" mass="600" version="1" checksum="1A2B3C4D">MKWVT</sequence>
  </entry>
</uniprot>"#;

#[test]
fn test_decodes_entries_in_source_order() {
    let mut streamer = streamer_over(TWO_ENTRY_DOC);

    let first = streamer.next_entry().unwrap().unwrap();
    assert_eq!(first.dataset, "Swiss-Prot");
    assert_eq!(first.version, 121);
    assert_eq!(first.accessions, vec!["P12345"]);
    assert_eq!(first.canonical_accession(), Some("P12345"));
    assert_eq!(
        first.primary_name(),
        Some("Aspartate aminotransferase, mitochondrial")
    );
    assert_eq!(first.genes.len(), 1);
    assert_eq!(first.genes[0].names[0].value, "GOT2");
    assert_eq!(first.organism.names[0].value, "Oryctolagus cuniculus");
    assert_eq!(first.organism.lineage.taxa.len(), 2);
    assert_eq!(first.organism.lineage.taxa[0].value, "Eukaryota");
    assert_eq!(first.organism.db_references[0].id, "9986");
    assert_eq!(first.references.len(), 1);
    assert_eq!(first.references[0].citation.journal.as_deref(), Some("J. Biol. Chem."));
    assert_eq!(first.references[0].citation.authors.len(), 2);
    assert_eq!(first.references[0].citation.authors[0], "Kuramitsu S.");
    assert_eq!(first.references[0].scope, vec!["SEQUENCE"]);
    assert_eq!(first.comments.len(), 1);
    assert_eq!(first.comments[0].comment_type, "function");
    assert_eq!(
        first.comments[0].texts[0].value,
        "Catalyzes the irreversible transamination."
    );
    assert_eq!(first.comments[0].texts[0].evidence[0].evidence_type, "ECO:0000269");
    assert_eq!(first.db_references[0].db_type, "EMBL");
    assert_eq!(
        first.protein_existence.existence_type,
        "evidence at protein level"
    );
    assert_eq!(first.keywords[0].value, "Aminotransferase");
    assert_eq!(first.features.len(), 1);
    assert_eq!(first.features[0].feature_type, "chain");
    assert_eq!(first.sequence.value, "MKWVTFISLL");
    assert_eq!(first.sequence.length, 10);
    assert_eq!(first.sequence.mass, 1100);
    assert_eq!(first.sequence.checksum.as_deref(), Some("9DF0142B"));

    let second = streamer.next_entry().unwrap().unwrap();
    assert_eq!(second.accessions, vec!["Q99999", "Q88888"]);
    assert_eq!(second.canonical_accession(), Some("Q99999"));
    assert!(second.features.is_empty());
    assert_eq!(second.protein.submitted.len(), 1);

    assert!(streamer.next_entry().unwrap().is_none());
    assert_eq!(streamer.entries_yielded(), 2);
}

#[test]
fn test_worked_example_feature_range() {
    let entries: Vec<_> = streamer_over(TWO_ENTRY_DOC)
        .entries()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(entries.len(), 2);
    let feature = &entries[0].features[0];
    assert_eq!(feature.location.begin.as_ref().map(|p| p.value), Some(10));
    assert_eq!(feature.location.end.as_ref().map(|p| p.value), Some(20));
    assert!(feature.location.position.is_none());
}

#[test]
fn test_non_entry_siblings_are_skipped() {
    let doc = r#"<uniprot>
  <metadata><release>2026_01</release></metadata>
  <entry><accession>P11111</accession></entry>
  <metadata><release>again</release></metadata>
  <entry><accession>P22222</accession></entry>
  <copyright>Distributed under CC BY 4.0</copyright>
</uniprot>"#;

    let entries: Vec<_> = streamer_over(doc)
        .entries()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].accessions, vec!["P11111"]);
    assert_eq!(entries[1].accessions, vec!["P22222"]);
}

#[test]
fn test_leading_junk_before_root_is_discarded() {
    let doc = r#"<?xml version="1.0"?>
<!-- release notes -->
<uniprot>
  <entry><accession>P33333</accession></entry>
</uniprot>"#;

    let entries: Vec<_> = streamer_over(doc)
        .entries()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_position_and_range_are_exclusive() {
    let doc = r#"<uniprot>
  <entry>
    <accession>P44444</accession>
    <feature type="active site">
      <location>
        <position position="42" status="uncertain"/>
      </location>
    </feature>
    <feature type="chain">
      <location>
        <begin>3</begin>
        <end>9</end>
      </location>
    </feature>
  </entry>
</uniprot>"#;

    let entries: Vec<_> = streamer_over(doc)
        .entries()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let point = &entries[0].features[0].location;
    assert_eq!(point.position.as_ref().map(|p| p.value), Some(42));
    assert_eq!(
        point.position.as_ref().and_then(|p| p.status.as_deref()),
        Some("uncertain")
    );
    assert!(point.begin.is_none());
    assert!(point.end.is_none());
    assert!(!point.is_range());

    let range = &entries[0].features[1].location;
    assert!(range.position.is_none());
    assert_eq!(range.begin.as_ref().map(|p| p.value), Some(3));
    assert_eq!(range.end.as_ref().map(|p| p.value), Some(9));
    assert!(range.is_range());
}

#[test]
fn test_length_attribute_is_not_cross_validated() {
    // The declared length and the residue string may disagree; both are
    // preserved as written.
    let doc = r#"<uniprot>
  <entry>
    <accession>P55555</accession>
    <sequence length="99" mass="1100" version="1">MKWVTFISLL</sequence>
  </entry>
</uniprot>"#;

    let entries: Vec<_> = streamer_over(doc)
        .entries()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(entries[0].sequence.length, 99);
    assert_eq!(entries[0].sequence.residue_count(), 10);
}

#[test]
fn test_malformed_stream_yields_error_then_ends() {
    // A sibling element that never closes: the skip runs into EOF.
    let doc = r#"<uniprot>
  <entry><accession>P66666</accession></entry>
  <metadata><unclosed>
"#;

    let mut iter = streamer_over(doc).entries();

    let first = iter.next().expect("first step").expect("first entry");
    assert_eq!(first.accessions, vec!["P66666"]);

    let err = iter.next().expect("error step").unwrap_err();
    assert!(matches!(err, UniProtError::MalformedXml { .. }), "{err}");

    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn test_shape_error_carries_partial_entry() {
    let doc = r#"<uniprot>
  <entry>
    <accession>P77777</accession>
    <sequence length="abc" mass="1" version="1">MK</sequence>
  </entry>
  <entry><accession>P88888</accession></entry>
</uniprot>"#;

    let mut streamer = streamer_over(doc);
    let err = streamer.next_entry().unwrap_err();

    assert!(err.is_recoverable());
    let partial = err.partial_entry().expect("partial entry attached");
    assert_eq!(partial.accessions, vec!["P77777"]);
    match &err {
        UniProtError::EntryDecode { source, .. } => {
            assert!(matches!(**source, UniProtError::InvalidValue { .. }))
        }
        other => panic!("unexpected error: {other}"),
    }

    // Default policy: the sequence halts after the failing step.
    assert!(streamer.next_entry().unwrap().is_none());
}

#[test]
fn test_skip_invalid_continues_past_bad_entry() {
    let doc = r#"<uniprot>
  <entry><accession>P00001</accession></entry>
  <entry>
    <accession>BAD001</accession>
    <sequence length="abc" mass="1" version="1">MK</sequence>
  </entry>
  <entry><accession>P00002</accession></entry>
</uniprot>"#;

    let entries: Vec<_> = streamer_over(doc)
        .skip_invalid(true)
        .entries()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].accessions, vec!["P00001"]);
    assert_eq!(entries[1].accessions, vec!["P00002"]);
}

#[test]
fn test_empty_root_yields_nothing() {
    let mut streamer = streamer_over("<uniprot></uniprot>");
    assert!(streamer.next_entry().unwrap().is_none());
    assert!(streamer.next_entry().unwrap().is_none());
    assert_eq!(streamer.entries_yielded(), 0);
}

#[test]
fn test_comment_sub_payloads() {
    let doc = r#"<uniprot>
  <entry>
    <accession>P99999</accession>
    <comment type="biophysicochemical properties">
      <kineticParameters>
        <km unit="uM">2.9</km>
        <vmax unit="umol/min/mg">0.36</vmax>
      </kineticParameters>
      <ph>7.0-7.5</ph>
      <temperature>37 degrees Celsius</temperature>
    </comment>
    <comment type="catalytic activity">
      <reaction>
        <name>L-aspartate + 2-oxoglutarate = oxaloacetate + L-glutamate</name>
        <dbReference type="Rhea" id="RHEA:21824"/>
        <ec>2.6.1.1</ec>
      </reaction>
    </comment>
  </entry>
</uniprot>"#;

    let entries: Vec<_> = streamer_over(doc)
        .entries()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let kinetics = &entries[0].comments[0];
    let params = kinetics.kinetic_parameters.as_ref().expect("kinetics");
    assert_eq!(params.km[0].value, "2.9");
    assert_eq!(params.km[0].unit.as_deref(), Some("uM"));
    assert_eq!(params.vmax[0].value, "0.36");
    assert_eq!(kinetics.ph.as_deref(), Some("7.0-7.5"));
    assert_eq!(kinetics.temperature.as_deref(), Some("37 degrees Celsius"));

    let catalytic = &entries[0].comments[1];
    let reaction = catalytic.reaction.as_ref().expect("reaction");
    assert_eq!(reaction.names.len(), 1);
    assert_eq!(reaction.ec.as_deref(), Some("2.6.1.1"));
    assert_eq!(reaction.db_references[0].db_type, "Rhea");
}
