//! Public entry points: dispatch, ranking helpers and shared plumbing.

use std::path::Path;
use std::sync::atomic::Ordering;

use tracing::info;
use tripleter_types::{RankedTriplet, Result, TripletError};

use crate::engine::types::{Strategy, Tripleter};
use crate::frequency::FrequencyTable;

/// Rejects empty text before any work is dispatched.
pub(crate) fn require_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(TripletError::InvalidArgument("text must not be empty"));
    }
    Ok(())
}

impl Tripleter {
    /// Counts triplets in `text` with the given strategy.
    ///
    /// # Errors
    ///
    /// Returns `TripletError::InvalidArgument` if `text` is empty. The
    /// parallel strategies may also fail with `ThreadPool` or
    /// `WorkerPanicked`.
    pub fn count(&self, text: &str, strategy: Strategy) -> Result<FrequencyTable> {
        match strategy {
            Strategy::Sequential => self.count_sequential(text),
            Strategy::WordsParallel => self.count_words_parallel(text),
            Strategy::WordsQueued => self.count_words_queued(text),
        }
    }

    /// Counts triplets in `text` and returns the `config.top_k` most frequent.
    pub fn top(&self, text: &str, strategy: Strategy) -> Result<Vec<RankedTriplet>> {
        Ok(self.count(text, strategy)?.top_k(self.config.top_k))
    }

    /// Counts triplets in the file at `path` with the chunked parallel
    /// strategy and returns the `config.top_k` most frequent.
    pub fn top_file(&self, path: impl AsRef<Path>) -> Result<Vec<RankedTriplet>> {
        Ok(self.count_file(path)?.top_k(self.config.top_k))
    }

    /// Runs `op` on a pool bounded by `config.workers`, or on the global
    /// rayon pool when no bound is configured.
    pub(crate) fn with_pool<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        if self.config.workers == 0 {
            return Ok(op());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("tripleter-{i}"))
            .build()
            .map_err(|e| TripletError::ThreadPool(e.to_string()))?;
        Ok(pool.install(op))
    }

    /// Number of threads the queued strategy starts.
    pub(crate) fn worker_count(&self) -> usize {
        match self.config.workers {
            0 => rayon::current_num_threads().max(1),
            n => n,
        }
    }

    /// Records a finished run in the metrics and the log.
    pub(crate) fn finish_run(&self, strategy: &'static str, table: FrequencyTable) -> FrequencyTable {
        let stats = table.stats();
        self.runs.fetch_add(1, Ordering::Relaxed);
        self.triplets_counted
            .fetch_add(stats.total, Ordering::Relaxed);
        info!(
            strategy,
            distinct = stats.distinct,
            total = stats.total,
            "triplet count finished"
        );
        table
    }
}
