//! # uniprot-stream - Streaming UniProtKB Archive Reader
//!
//! `uniprot-stream` reads gzip-compressed UniProtKB XML archives and yields
//! one fully-typed [`uniprot::Entry`] per `<entry>` element, without ever
//! holding the whole archive or the whole decompressed byte stream in
//! memory.
//!
//! ## Key Properties
//!
//! - **Streaming**: decompression and XML tokenization are incremental;
//!   memory use is bounded by a single entry regardless of archive size.
//! - **Pull-based**: the consumer drives progress one entry at a time and
//!   may stop at any step; dropping the iterator releases the decompression
//!   state and the file handle deterministically.
//! - **Forward-tolerant**: unknown attributes and child elements inside an
//!   entry are skipped, never treated as errors.
//! - **Errors as data**: a mid-stream decode failure is yielded as the
//!   error for that step, paired with the best-effort partial entry, rather
//!   than thrown across the iteration boundary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use uniprot_stream::prelude::*;
//!
//! let streamer = UniProtStreamer::open("uniprot_sprot.xml.gz")?;
//! for entry in streamer.entries().take(10) {
//!     let entry = entry?;
//!     println!(
//!         "{}\t{} aa",
//!         entry.canonical_accession().unwrap_or("?"),
//!         entry.sequence.length
//!     );
//! }
//! # Ok::<(), uniprot_stream::uniprot::UniProtError>(())
//! ```
//!
//! Archives are not restartable: exhausting or cancelling the iterator
//! discards all producer state, and re-iterating requires re-opening the
//! source.
//!
//! ## Architecture
//!
//! Three layers, each pulling from the one below:
//!
//! - **Transport**: file handle wrapped in streaming gzip decompression
//!   (`flate2::read::MultiGzDecoder`); owned by the streamer for the whole
//!   iteration.
//! - **Tokens**: incremental XML events from `quick-xml`, buffered only up
//!   to the current partially-parsed element.
//! - **Records**: boundary detection for the `<uniprot>` root and its
//!   `<entry>` children, plus a depth-safe subtree decoder that maps one
//!   complete entry element onto [`uniprot::Entry`].

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod uniprot;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::uniprot::{
        Comment, DbReference, Entry, EntryIterator, Evidence, Feature, Location, Organism,
        Position, Reference, Sequence, UniProtError, UniProtStreamer,
    };
}
