use std::io::BufRead;

use super::{UniProtError, UniProtStreamer};
use crate::uniprot::models::Entry;

/// Iterator over entries in a UniProt archive.
///
/// Owns the streamer and with it the whole transport stack; dropping the
/// iterator - whether it was exhausted or abandoned after any step - is the
/// single teardown path for the decompression state and file handle. The
/// sequence is finite and not restartable: re-iterating requires
/// re-opening the source.
///
/// After a terminal error has been yielded the iterator is fused and
/// returns `None`.
pub struct EntryIterator<R: BufRead> {
    pub(super) streamer: UniProtStreamer<R>,
}

impl<R: BufRead> Iterator for EntryIterator<R> {
    type Item = Result<Entry, UniProtError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.streamer.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
