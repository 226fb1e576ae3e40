//! Word-partitioned parallel strategies.
//!
//! Both strategies split the text into words first, then differ in how the
//! words reach the workers:
//!
//! - `count_words_parallel`: rayon splits the word list across the pool
//! - `count_words_queued`: words go on a lock-free queue that a fixed number
//!   of scoped threads drain
//!
//! In both, the result is only read after every worker has finished.

use std::sync::atomic::Ordering;

use crossbeam::queue::SegQueue;
use rayon::prelude::*;
use tracing::debug;
use tripleter_types::{AggregationMode, Result, TripletError};

use crate::analyzer::triplet::extract_triplets;
use crate::engine::api::require_text;
use crate::engine::types::Tripleter;
use crate::frequency::{FrequencyTable, SharedFrequencyTable};

impl Tripleter {
    /// Counts triplets word by word on a bounded rayon pool.
    ///
    /// Uses `config.filter` for extraction and `config.aggregation` to
    /// combine the workers' counts.
    ///
    /// # Errors
    ///
    /// Returns `TripletError::InvalidArgument` if `text` is empty and
    /// `TripletError::ThreadPool` if the pool cannot be built.
    pub fn count_words_parallel(&self, text: &str) -> Result<FrequencyTable> {
        require_text(text)?;

        let text = self.prepare(text);
        let words: Vec<&str> = self.tokenizer.words(&text).collect();
        let filter = self.config.filter;
        debug!(
            words = words.len(),
            workers = self.config.workers,
            aggregation = ?self.config.aggregation,
            "parallel word count started"
        );

        let table = self.with_pool(|| match self.config.aggregation {
            AggregationMode::Partitioned => words
                .par_iter()
                .fold(FrequencyTable::new, |mut table, word| {
                    table.extend(extract_triplets(word, filter));
                    table
                })
                .reduce(FrequencyTable::new, FrequencyTable::merge),
            AggregationMode::Shared => {
                let shared = SharedFrequencyTable::new();
                words
                    .par_iter()
                    .for_each(|word| shared.extend(extract_triplets(word, filter)));
                shared.into_table()
            }
        })?;

        self.words_processed
            .fetch_add(words.len() as u64, Ordering::Relaxed);
        Ok(self.finish_run("words-parallel", table))
    }

    /// Counts triplets word by word with queue dispatch.
    ///
    /// Every word is pushed on a queue; `config.workers` scoped threads (one
    /// per rayon thread when unset) pop words until it is empty. The scope
    /// joins every worker before the partitions are merged.
    ///
    /// # Errors
    ///
    /// Returns `TripletError::InvalidArgument` if `text` is empty and
    /// `TripletError::WorkerPanicked` if a worker thread panicked.
    pub fn count_words_queued(&self, text: &str) -> Result<FrequencyTable> {
        require_text(text)?;

        let text = self.prepare(text);
        let queue = SegQueue::new();
        for word in self.tokenizer.words(&text) {
            queue.push(word);
        }
        let word_count = queue.len();
        let workers = self.worker_count();
        let filter = self.config.filter;
        debug!(
            words = word_count,
            workers,
            aggregation = ?self.config.aggregation,
            "queued word count started"
        );

        let queue = &queue;
        let table = match self.config.aggregation {
            AggregationMode::Partitioned => {
                let partitions = crossbeam::thread::scope(|s| {
                    let handles: Vec<_> = (0..workers)
                        .map(|_| {
                            s.spawn(move |_| {
                                let mut table = FrequencyTable::new();
                                while let Some(word) = queue.pop() {
                                    table.extend(extract_triplets(word, filter));
                                }
                                table
                            })
                        })
                        .collect();

                    handles
                        .into_iter()
                        .map(|handle| handle.join())
                        .collect::<std::thread::Result<Vec<FrequencyTable>>>()
                })
                .map_err(|_| TripletError::WorkerPanicked)?
                .map_err(|_| TripletError::WorkerPanicked)?;

                partitions
                    .into_iter()
                    .fold(FrequencyTable::new(), FrequencyTable::merge)
            }
            AggregationMode::Shared => {
                let shared = SharedFrequencyTable::new();
                let target = &shared;
                crossbeam::thread::scope(|s| {
                    for _ in 0..workers {
                        s.spawn(move |_| {
                            while let Some(word) = queue.pop() {
                                target.extend(extract_triplets(word, filter));
                            }
                        });
                    }
                })
                .map_err(|_| TripletError::WorkerPanicked)?;
                shared.into_table()
            }
        };

        self.words_processed
            .fetch_add(word_count as u64, Ordering::Relaxed);
        Ok(self.finish_run("words-queued", table))
    }
}
