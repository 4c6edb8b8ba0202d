//! # UniProtKB Archive Parser Module
//!
//! This module provides streaming parsing of UniProtKB XML archives, the
//! XML dump format published by the UniProt consortium for protein
//! knowledgebase releases.
//!
//! ## Design Goals
//!
//! - **Streaming**: process arbitrarily large archives without loading them
//!   into memory
//! - **Lazy**: decode exactly one entry per consumer pull, no readahead
//! - **Tolerant**: ignore unknown attributes and elements instead of
//!   rejecting newer schema revisions
//! - **Deterministic teardown**: the compressed source is released exactly
//!   once, whether iteration exhausts, fails, or is cancelled early
//!
//! ## Archive Structure
//!
//! ```text
//! uniprot (root container)
//! └── entry* (one per protein record)
//!     ├── accession+ (first is canonical)
//!     ├── name*
//!     ├── protein (recommended/alternative/submitted names)
//!     ├── gene*
//!     ├── organism
//!     │   └── lineage
//!     │       └── taxon*
//!     ├── reference*
//!     │   └── citation (authorList, journal, ...)
//!     ├── comment* (typed: function, catalytic activity, kinetics, ...)
//!     ├── dbReference*
//!     ├── keyword*
//!     ├── feature*
//!     │   └── location (position | begin/end)
//!     └── sequence (residues + length/mass/checksum)
//! ```

mod models;
mod streamer;

pub use models::*;
pub use streamer::{EntryIterator, GzXmlReader, UniProtError, UniProtStreamer};
