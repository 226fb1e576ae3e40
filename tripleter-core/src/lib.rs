//! Parallel triplet frequency analysis.
//!
//! Counts how often each 3-character window (a *triplet*) occurs in text or
//! in a large file and reports the most frequent ones.
//!
//! ```
//! use tripleter_core::{Strategy, Tripleter};
//!
//! let engine = Tripleter::new();
//! let top = engine.top("ababab abc", Strategy::WordsParallel).unwrap();
//! assert_eq!(top[0].to_string(), "aba: 2");
//! ```
//!
//! Layout:
//! - [`analyzer`]: lowercasing, word splitting and triplet extraction
//! - [`frequency`]: frequency tables, merging and ranking
//! - [`chunk`]: streaming a file as fixed-size groups of lines
//! - [`engine`]: the [`Tripleter`] and its execution strategies

#![warn(missing_docs)]

pub mod analyzer;
pub mod chunk;
pub mod engine;
pub mod frequency;

pub use engine::{EngineMetrics, Strategy, Tripleter};
pub use frequency::{FrequencyTable, SharedFrequencyTable, TableStats};
pub use tripleter_types::{
    AggregationMode, RankedTriplet, Result, Triplet, TripletConfig, TripletError, TripletFilter,
};
