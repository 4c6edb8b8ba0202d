//! Streaming UniProt archive parser using quick-xml
//!
//! This module provides a pull-based streaming parser for gzip-compressed
//! UniProtKB XML archives, designed to handle arbitrarily large dumps with
//! memory bounded by a single entry.
//!
//! The streamer owns the whole transport stack (file handle, gzip
//! decompression state, XML reader). Dropping it - after exhaustion, after
//! an error, or mid-iteration - tears the stack down exactly once, inner
//! decompression state before the file handle.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::warn;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::uniprot::models::Entry;

pub use error::UniProtError;
pub use iterators::EntryIterator;

mod entry;
mod error;
mod helpers;
mod iterators;

#[cfg(test)]
mod tests;

/// Local name of the archive's root container element
const ROOT_TAG: &[u8] = b"uniprot";

/// Local name of one record element
const ENTRY_TAG: &[u8] = b"entry";

/// Leading bytes of every gzip member
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Buffered reader stack over a gzip-compressed archive file
pub type GzXmlReader = BufReader<MultiGzDecoder<BufReader<File>>>;

/// Where the scan currently is in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the root container has been seen
    Searching,
    /// Inside the root container, between entries
    InRoot,
    /// Stream exhausted or root closed; nothing more to yield
    Done,
    /// A terminal error was yielded; nothing more to yield
    Failed,
}

/// Streaming parser for UniProtKB XML archives
#[derive(Debug)]
pub struct UniProtStreamer<R: BufRead> {
    reader: Reader<R>,
    state: ScanState,
    skip_invalid: bool,
    entries_yielded: u64,
}

impl UniProtStreamer<GzXmlReader> {
    /// Open a gzip-compressed archive file for streaming.
    ///
    /// Fails before any entry is produced when the file cannot be opened
    /// ([`UniProtError::Open`]) or does not start with a gzip member
    /// ([`UniProtError::InvalidGzip`]).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, UniProtError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| UniProtError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut raw = BufReader::with_capacity(64 * 1024, file);
        let head = raw.fill_buf().map_err(|source| UniProtError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        if head.len() < GZIP_MAGIC.len() || head[..GZIP_MAGIC.len()] != GZIP_MAGIC {
            return Err(UniProtError::InvalidGzip {
                path: path.to_path_buf(),
            });
        }
        let decoder = MultiGzDecoder::new(raw);
        Ok(Self::new(BufReader::with_capacity(64 * 1024, decoder)))
    }
}

impl<R: BufRead> UniProtStreamer<R> {
    /// Create a streamer over an already-decompressed XML byte source
    pub fn new(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Self {
            reader: xml_reader,
            state: ScanState::Searching,
            skip_invalid: false,
            entries_yielded: 0,
        }
    }

    /// Opt into skipping entries whose content cannot be decoded, instead
    /// of halting at the first one. Malformed XML and I/O failures remain
    /// terminal either way. Off by default.
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    /// Number of entries yielded so far
    pub fn entries_yielded(&self) -> u64 {
        self.entries_yielded
    }

    /// Iterate over all entries, consuming the streamer
    pub fn entries(self) -> EntryIterator<R> {
        EntryIterator { streamer: self }
    }

    /// Pull the next entry from the stream.
    ///
    /// Performs exactly the work needed for one step: scans to the next
    /// `<entry>` start, decodes its whole subtree, and suspends. Returns
    /// `Ok(None)` once the root closes or the stream ends, and keeps
    /// returning `Ok(None)` after a terminal error has been yielded.
    pub fn next_entry(&mut self) -> Result<Option<Entry>, UniProtError> {
        let mut buf = Vec::new();
        loop {
            if matches!(self.state, ScanState::Done | ScanState::Failed) {
                return Ok(None);
            }

            buf.clear();
            let event = match self.reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(e) => {
                    self.state = ScanState::Failed;
                    return Err(helpers::xml_err(&self.reader, e));
                }
            };

            match self.state {
                ScanState::Searching => match event {
                    Event::Start(ref e) if e.local_name().as_ref() == ROOT_TAG => {
                        self.state = ScanState::InRoot;
                    }
                    Event::Eof => {
                        self.state = ScanState::Done;
                        return Ok(None);
                    }
                    // Leading declarations, processing instructions and
                    // whitespace are discarded.
                    _ => {}
                },
                ScanState::InRoot => match event {
                    Event::Start(ref e) => {
                        if e.local_name().as_ref() == ENTRY_TAG {
                            let mut entry = Entry::default();
                            match entry::decode_entry(&mut self.reader, e, &mut entry) {
                                Ok(()) => {
                                    self.entries_yielded += 1;
                                    return Ok(Some(entry));
                                }
                                Err(source) => {
                                    let wrapped = UniProtError::EntryDecode {
                                        partial: Box::new(entry),
                                        source: Box::new(source),
                                    };
                                    if self.skip_invalid && wrapped.is_recoverable() {
                                        warn!("skipping undecodable entry: {wrapped}");
                                        self.drain_entry()?;
                                        continue;
                                    }
                                    self.state = ScanState::Failed;
                                    return Err(wrapped);
                                }
                            }
                        } else {
                            // Sibling metadata at the root level: drained
                            // without typed decoding.
                            if let Err(e) = helpers::skip_element(&mut self.reader, e) {
                                self.state = ScanState::Failed;
                                return Err(e);
                            }
                        }
                    }
                    Event::Empty(ref e) if e.local_name().as_ref() == ENTRY_TAG => {
                        // Degenerate self-closing entry: still one record.
                        let mut entry = Entry::default();
                        match entry::decode_entry_attributes(e, &mut entry) {
                            Ok(()) => {
                                self.entries_yielded += 1;
                                return Ok(Some(entry));
                            }
                            Err(source) => {
                                let wrapped = UniProtError::EntryDecode {
                                    partial: Box::new(entry),
                                    source: Box::new(source),
                                };
                                if self.skip_invalid && wrapped.is_recoverable() {
                                    warn!("skipping undecodable entry: {wrapped}");
                                    continue;
                                }
                                self.state = ScanState::Failed;
                                return Err(wrapped);
                            }
                        }
                    }
                    Event::End(ref e) if e.local_name().as_ref() == ROOT_TAG => {
                        self.state = ScanState::Done;
                        return Ok(None);
                    }
                    Event::Eof => {
                        self.state = ScanState::Done;
                        return Ok(None);
                    }
                    _ => {}
                },
                ScanState::Done | ScanState::Failed => return Ok(None),
            }
        }
    }

    /// Consume the remainder of a failed entry's subtree so scanning can
    /// resume at its sibling. Entry elements never nest, but depth is
    /// tracked regardless.
    fn drain_entry(&mut self) -> Result<(), UniProtError> {
        let mut buf = Vec::new();
        match self
            .reader
            .read_to_end_into(QName(ENTRY_TAG), &mut buf)
        {
            Ok(_) => Ok(()),
            Err(e) => {
                self.state = ScanState::Failed;
                Err(helpers::xml_err(&self.reader, e))
            }
        }
    }
}
