//! Integration tests for uniprot-stream
//!
//! These tests exercise the full pipeline: gzip transport, incremental XML
//! tokenization, and typed entry decoding, including the teardown and
//! pre-iteration failure contracts.

use std::fs;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use flate2::write::GzEncoder;
use flate2::Compression;
use proptest::prelude::*;
use tempfile::tempdir;

use uniprot_stream::uniprot::{UniProtError, UniProtStreamer};

const TWO_ENTRY_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<uniprot xmlns="http://uniprot.org/uniprot">
  <entry dataset="Swiss-Prot" created="2001-01-10" modified="2020-02-26" version="121">
    <accession>P12345</accession>
    <name>AATM_RABIT</name>
    <feature type="chain">
      <location>
        <begin position="10"/>
        <end position="20"/>
      </location>
    </feature>
    <sequence length="10" mass="1100" version="2" checksum="9DF0142B">MKWVTFISLL</sequence>
  </entry>
  <entry dataset="Swiss-Prot" created="2010-05-05" modified="2021-01-01" version="7">
    <accession>Q99999</accession>
    <accession>Q88888</accession>
    <sequence length="5" mass="600" version="1" checksum="1A2B3C4D">MKWVT</sequence>
  </entry>
</uniprot>"#;

/// Write a gzip-compressed archive into `dir` and return its path
fn write_archive(dir: &tempfile::TempDir, name: &str, xml: &str) -> PathBuf {
    let path = dir.path().join(name);
    let file = fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(xml.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

#[test]
fn test_scans_gzipped_archive_end_to_end() {
    let dir = tempdir().unwrap();
    let path = write_archive(&dir, "two_entries.xml.gz", TWO_ENTRY_DOC);

    let streamer = UniProtStreamer::open(&path).unwrap();
    let entries: Vec<_> = streamer.entries().collect::<Result<Vec<_>, _>>().unwrap();

    assert_eq!(entries.len(), 2);

    // The worked example: feature range on the first entry, accession
    // order on the second.
    assert_eq!(entries[0].accessions, vec!["P12345"]);
    assert_eq!(entries[0].features.len(), 1);
    let location = &entries[0].features[0].location;
    assert_eq!(location.begin.as_ref().map(|p| p.value), Some(10));
    assert_eq!(location.end.as_ref().map(|p| p.value), Some(20));
    assert!(location.position.is_none());

    assert_eq!(entries[1].accessions, vec!["Q99999", "Q88888"]);
    assert_eq!(entries[1].canonical_accession(), Some("Q99999"));
    assert!(entries[1].features.is_empty());
}

#[test]
fn test_open_missing_file_fails_before_iteration() {
    let err = UniProtStreamer::open("/no/such/archive.xml.gz").unwrap_err();
    assert!(matches!(err, UniProtError::Open { .. }), "{err}");
}

#[test]
fn test_open_non_gzip_fails_before_iteration() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.xml.gz");
    fs::write(&path, "<uniprot></uniprot>").unwrap();

    let err = UniProtStreamer::open(&path).unwrap_err();
    assert!(matches!(err, UniProtError::InvalidGzip { .. }), "{err}");
}

#[test]
fn test_open_empty_file_fails_before_iteration() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.xml.gz");
    fs::write(&path, "").unwrap();

    let err = UniProtStreamer::open(&path).unwrap_err();
    assert!(matches!(err, UniProtError::InvalidGzip { .. }), "{err}");
}

#[test]
fn test_gzip_with_malformed_xml_tail() {
    let dir = tempdir().unwrap();
    let truncated = r#"<uniprot>
  <entry><accession>P66666</accession></entry>
  <metadata><unclosed>
"#;
    let path = write_archive(&dir, "truncated.xml.gz", truncated);

    let mut iter = UniProtStreamer::open(&path).unwrap().entries();

    let first = iter.next().expect("first step").expect("first entry");
    assert_eq!(first.accessions, vec!["P66666"]);

    let err = iter.next().expect("error step").unwrap_err();
    assert!(matches!(err, UniProtError::MalformedXml { .. }), "{err}");

    assert!(iter.next().is_none());
}

/// Byte source that flags its own teardown
struct DropProbe<R> {
    inner: R,
    dropped: Arc<AtomicBool>,
}

impl<R> Drop for DropProbe<R> {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

impl<R: Read> Read for DropProbe<R> {
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(out)
    }
}

#[test]
fn test_early_stop_releases_the_source() {
    let dropped = Arc::new(AtomicBool::new(false));
    let probe = DropProbe {
        inner: Cursor::new(TWO_ENTRY_DOC.as_bytes().to_vec()),
        dropped: Arc::clone(&dropped),
    };

    let mut iter = UniProtStreamer::new(BufReader::new(probe)).entries();

    // Stop after the first of two entries.
    let first = iter.next().expect("first step").expect("first entry");
    assert_eq!(first.accessions, vec!["P12345"]);
    assert!(!dropped.load(Ordering::SeqCst));

    drop(iter);
    assert!(dropped.load(Ordering::SeqCst));
}

#[test]
fn test_exhaustion_releases_the_source() {
    let dropped = Arc::new(AtomicBool::new(false));
    let probe = DropProbe {
        inner: Cursor::new(TWO_ENTRY_DOC.as_bytes().to_vec()),
        dropped: Arc::clone(&dropped),
    };

    {
        let iter = UniProtStreamer::new(BufReader::new(probe)).entries();
        assert_eq!(iter.count(), 2);
    }
    assert!(dropped.load(Ordering::SeqCst));
}

/// Render an archive with one entry per accession list
fn build_archive(accession_lists: &[Vec<String>]) -> String {
    let mut doc = String::from("<?xml version=\"1.0\"?>\n<uniprot>\n");
    for accessions in accession_lists {
        doc.push_str("<entry dataset=\"Swiss-Prot\" version=\"1\">");
        for accession in accessions {
            doc.push_str("<accession>");
            doc.push_str(accession);
            doc.push_str("</accession>");
        }
        doc.push_str("<sequence length=\"4\" mass=\"400\" version=\"1\">MKWV</sequence></entry>\n");
    }
    doc.push_str("</uniprot>\n");
    doc
}

proptest! {
    /// Every archive with N entries yields exactly N steps, in source
    /// order, with non-empty accession lists.
    #[test]
    fn prop_yields_every_entry_in_order(
        accession_lists in prop::collection::vec(
            prop::collection::vec("[A-Z][0-9][A-Z0-9]{4}", 1..4),
            0..16,
        )
    ) {
        let doc = build_archive(&accession_lists);
        let streamer = UniProtStreamer::new(BufReader::new(Cursor::new(doc.into_bytes())));
        let entries: Vec<_> = streamer
            .entries()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        prop_assert_eq!(entries.len(), accession_lists.len());
        for (entry, accessions) in entries.iter().zip(&accession_lists) {
            prop_assert!(!entry.accessions.is_empty());
            prop_assert_eq!(&entry.accessions, accessions);
        }
    }
}
