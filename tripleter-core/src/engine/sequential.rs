//! Single-threaded strategies.

use std::path::Path;
use std::sync::atomic::Ordering;

use tracing::debug;
use tripleter_types::{Result, TripletFilter};

use crate::analyzer::triplet::extract_triplets;
use crate::chunk::ChunkReader;
use crate::engine::api::require_text;
use crate::engine::types::Tripleter;
use crate::frequency::FrequencyTable;

impl Tripleter {
    /// Counts alphabetic triplets over the whole text in one pass.
    ///
    /// The text is not split into words: windows run across separators and
    /// are then dropped by the alphabetic filter, which gives the same result
    /// as counting word by word. Always filtered, whatever `config.filter`.
    ///
    /// # Errors
    ///
    /// Returns `TripletError::InvalidArgument` if `text` is empty.
    pub fn count_sequential(&self, text: &str) -> Result<FrequencyTable> {
        require_text(text)?;
        debug!(bytes = text.len(), "sequential count started");

        let text = self.prepare(text);
        let table: FrequencyTable = extract_triplets(&text, TripletFilter::Alphabetic).collect();

        Ok(self.finish_run("sequential", table))
    }

    /// Counts alphabetic triplets in a file, chunk by chunk, on the calling
    /// thread.
    ///
    /// Produces the same table as [`Tripleter::count_file`].
    ///
    /// # Errors
    ///
    /// Returns `TripletError::NotFound` if `path` is not an existing file,
    /// `TripletError::InvalidArgument` for a zero chunk length and
    /// `TripletError::Io` if reading fails.
    pub fn count_file_sequential(&self, path: impl AsRef<Path>) -> Result<FrequencyTable> {
        let chunks = ChunkReader::open(path, self.config.chunk_length)?
            .carry_boundary(self.config.carry_chunk_boundary);
        debug!("sequential file count started");

        let mut table = FrequencyTable::new();
        for chunk in chunks {
            let chunk = chunk?;
            let text = self.prepare(chunk.text());
            table.extend(extract_triplets(&text, TripletFilter::Alphabetic));
            self.chunks_processed.fetch_add(1, Ordering::Relaxed);
        }

        Ok(self.finish_run("file-sequential", table))
    }
}
