//! Engine type, strategies and run metrics.

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::analyzer::normalizer::TextNormalizer;
use crate::analyzer::tokenizer::Tokenizer;
use tripleter_types::TripletConfig;

/// Orchestration mode for in-memory text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One pass over the whole text on the calling thread.
    #[default]
    Sequential,
    /// Words split up front and counted on a rayon pool.
    WordsParallel,
    /// Words pushed on a queue and drained by a fixed set of worker threads.
    WordsQueued,
}

impl Strategy {
    /// Every text strategy, in a stable order.
    pub const ALL: [Strategy; 3] = [
        Strategy::Sequential,
        Strategy::WordsParallel,
        Strategy::WordsQueued,
    ];

    /// Short human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::WordsParallel => "words-parallel",
            Strategy::WordsQueued => "words-queued",
        }
    }
}

/// Triplet frequency engine.
///
/// Holds the configuration and the analysis components; every counting
/// method takes `&self`, so one engine can be shared between threads.
#[derive(Debug)]
pub struct Tripleter {
    pub(crate) normalizer: TextNormalizer,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) config: TripletConfig,
    pub(crate) runs: AtomicU64,
    pub(crate) words_processed: AtomicU64,
    pub(crate) chunks_processed: AtomicU64,
    pub(crate) triplets_counted: AtomicU64,
}

impl Default for Tripleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Tripleter {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TripletConfig::default())
    }

    /// Creates an engine with a custom configuration.
    pub fn with_config(config: TripletConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            tokenizer: Tokenizer::new(),
            config,
            runs: AtomicU64::new(0),
            words_processed: AtomicU64::new(0),
            chunks_processed: AtomicU64::new(0),
            triplets_counted: AtomicU64::new(0),
        }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &TripletConfig {
        &self.config
    }

    /// Lowercases `text` unless the engine is case sensitive.
    pub(crate) fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.config.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(self.normalizer.lowercase(text))
        }
    }

    /// Returns counters accumulated over every run of this engine.
    #[must_use]
    pub fn metrics(&self) -> EngineMetrics {
        EngineMetrics {
            runs: self.runs.load(Ordering::Relaxed),
            words_processed: self.words_processed.load(Ordering::Relaxed),
            chunks_processed: self.chunks_processed.load(Ordering::Relaxed),
            triplets_counted: self.triplets_counted.load(Ordering::Relaxed),
        }
    }

    /// Resets all metrics to zero.
    pub fn reset_metrics(&self) {
        self.runs.store(0, Ordering::Relaxed);
        self.words_processed.store(0, Ordering::Relaxed);
        self.chunks_processed.store(0, Ordering::Relaxed);
        self.triplets_counted.store(0, Ordering::Relaxed);
    }
}

/// Basic operational metrics for the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Number of successful counting runs.
    pub runs: u64,
    /// Words handed to workers by the word strategies.
    pub words_processed: u64,
    /// Chunks handed to workers by the file strategies.
    pub chunks_processed: u64,
    /// Triplet occurrences counted across all runs.
    pub triplets_counted: u64,
}
