use std::io;
use std::path::PathBuf;

use crate::uniprot::models::Entry;

/// Errors that can occur while opening or streaming a UniProt archive
#[derive(Debug, thiserror::Error)]
pub enum UniProtError {
    /// The archive file could not be opened; fatal, before any entry
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Path that was passed to `open`
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The byte stream does not begin with a gzip member; fatal, before
    /// any entry
    #[error("{} is not valid gzip data", path.display())]
    InvalidGzip {
        /// Path that was passed to `open`
        path: PathBuf,
    },

    /// The XML stream violates well-formedness; terminal for the stream
    #[error("malformed XML at byte {position}: {source}")]
    MalformedXml {
        /// Byte offset into the decompressed stream
        position: u64,
        /// Underlying parser failure
        #[source]
        source: quick_xml::Error,
    },

    /// Attribute- or escape-level XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error while reading the decompressed stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// UTF-8 encoding error in text content
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The document structure is not what a UniProt archive requires
    #[error("invalid archive structure: {0}")]
    InvalidStructure(String),

    /// A scalar field's content is not parseable as its declared type
    #[error("invalid value for {what}: {value:?}")]
    InvalidValue {
        /// Field or attribute the value was destined for
        what: &'static str,
        /// The offending source text
        value: String,
    },

    /// An entry subtree could not be fully decoded
    #[error("entry could not be fully decoded: {source}")]
    EntryDecode {
        /// Best-effort partially-populated entry
        partial: Box<Entry>,
        /// The failure that interrupted the decode
        #[source]
        source: Box<UniProtError>,
    },
}

impl UniProtError {
    /// True when the failure is confined to one entry's content and the
    /// stream itself remains well-formed, so a skip policy may continue
    /// with the next entry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            UniProtError::EntryDecode { source, .. } => source.is_recoverable(),
            UniProtError::InvalidValue { .. } => true,
            _ => false,
        }
    }

    /// The best-effort partial entry attached to a per-entry decode
    /// failure, if this is one.
    pub fn partial_entry(&self) -> Option<&Entry> {
        match self {
            UniProtError::EntryDecode { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
