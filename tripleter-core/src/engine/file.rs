//! Chunk-partitioned parallel strategy for large files.

use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::Ordering;

use rayon::prelude::*;
use tracing::debug;
use tripleter_types::{AggregationMode, Result, TripletFilter};

use crate::analyzer::triplet::extract_triplets;
use crate::chunk::{Chunk, ChunkReader};
use crate::engine::types::Tripleter;
use crate::frequency::{FrequencyTable, SharedFrequencyTable};

impl Tripleter {
    /// Counts alphabetic triplets in a file on a bounded rayon pool.
    ///
    /// Chunks of `config.chunk_length` lines are read on one thread and
    /// bridged into the pool as they arrive, so memory stays proportional
    /// to the chunks in flight rather than the file size. The first read
    /// error aborts the whole count.
    ///
    /// # Errors
    ///
    /// Returns `TripletError::NotFound` if `path` is not an existing file
    /// (checked before any worker starts), `TripletError::InvalidArgument`
    /// for a zero chunk length, `TripletError::Io` if reading fails and
    /// `TripletError::ThreadPool` if the pool cannot be built.
    pub fn count_file(&self, path: impl AsRef<Path>) -> Result<FrequencyTable> {
        let chunks = ChunkReader::open(path, self.config.chunk_length)?
            .carry_boundary(self.config.carry_chunk_boundary);
        self.count_chunks(chunks)
    }

    /// Counts the chunks of any reader on the pool; the body of
    /// [`Tripleter::count_file`].
    pub(crate) fn count_chunks<R>(&self, chunks: ChunkReader<R>) -> Result<FrequencyTable>
    where
        R: BufRead + Send,
    {
        debug!(
            chunk_length = self.config.chunk_length,
            workers = self.config.workers,
            aggregation = ?self.config.aggregation,
            "parallel file count started"
        );

        let table = self.with_pool(|| -> Result<FrequencyTable> {
            match self.config.aggregation {
                AggregationMode::Partitioned => chunks
                    .par_bridge()
                    .try_fold(
                        FrequencyTable::new,
                        |mut table, chunk: Result<Chunk>| -> Result<FrequencyTable> {
                            self.count_chunk(chunk?, |text| {
                                table.extend(extract_triplets(text, TripletFilter::Alphabetic))
                            });
                            Ok(table)
                        },
                    )
                    .try_reduce(FrequencyTable::new, |a, b| Ok(a.merge(b))),
                AggregationMode::Shared => {
                    let shared = SharedFrequencyTable::new();
                    chunks
                        .par_bridge()
                        .try_for_each(|chunk: Result<Chunk>| -> Result<()> {
                            self.count_chunk(chunk?, |text| {
                                shared.extend(extract_triplets(text, TripletFilter::Alphabetic))
                            });
                            Ok(())
                        })?;
                    Ok(shared.into_table())
                }
            }
        })??;

        Ok(self.finish_run("file-parallel", table))
    }

    fn count_chunk(&self, chunk: Chunk, mut sink: impl FnMut(&str)) {
        let text = self.prepare(chunk.text());
        sink(&text);
        self.chunks_processed.fetch_add(1, Ordering::Relaxed);
    }
}
