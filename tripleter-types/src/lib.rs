//! Core types shared across the Tripleter workspace.
//!
//! This crate holds the value types that both the engine and its callers
//! need to agree on. Keeping them separate means:
//!
//! - **Small, `Copy` keys**: a [`Triplet`] is three `char`s, cheap to hash and compare
//! - **One error vocabulary**: every entry point reports [`TripletError`]
//! - **Plain configuration**: [`TripletConfig`] is a struct with public fields

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;
use std::path::PathBuf;

/// Width of the sliding window, in characters.
pub const TRIPLET_LENGTH: usize = 3;

/// Default number of file lines grouped into one chunk.
pub const CHUNK_LENGTH: usize = 1000;

/// Default number of entries returned by ranking helpers.
pub const DEFAULT_TOP_K: usize = 10;

/// Convenience alias used by every fallible Tripleter operation.
pub type Result<T> = core::result::Result<T, TripletError>;

/// A triplet: exactly three consecutive characters.
///
/// Stored as `[char; 3]` so it works as a hash map key without allocation.
/// The derived ordering compares code points left to right, which is the
/// same order as comparing the UTF-8 strings byte by byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Triplet(pub [char; TRIPLET_LENGTH]);

impl Triplet {
    /// Creates a triplet from three characters.
    #[inline(always)]
    pub const fn new(a: char, b: char, c: char) -> Self {
        Self([a, b, c])
    }

    /// Returns the three characters of this triplet.
    #[inline(always)]
    pub const fn chars(self) -> [char; TRIPLET_LENGTH] {
        self.0
    }

    /// Returns `true` when all three characters are letters.
    ///
    /// Uses the Unicode `Alphabetic` property, so Cyrillic, Greek or CJK
    /// letters qualify just like ASCII ones.
    #[inline(always)]
    pub fn is_alphabetic(self) -> bool {
        self.0.iter().all(|c| c.is_alphabetic())
    }

    /// Parses a string of exactly three characters.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let triplet = Self::new(chars.next()?, chars.next()?, chars.next()?);
        chars.next().is_none().then_some(triplet)
    }
}

impl FromStr for Triplet {
    type Err = TripletError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or(TripletError::InvalidArgument(
            "a triplet must be exactly 3 characters",
        ))
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}{b}{c}")
    }
}

impl From<[char; TRIPLET_LENGTH]> for Triplet {
    #[inline(always)]
    fn from(chars: [char; TRIPLET_LENGTH]) -> Self {
        Self(chars)
    }
}

/// One row of a ranked result: a triplet and how often it occurred.
///
/// The ordering is the ranking order: higher counts come first, and equal
/// counts fall back to ascending triplet order so that ranking is
/// reproducible. Sorting a slice of these ascending yields the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankedTriplet {
    /// The triplet
    pub triplet: Triplet,
    /// Number of occurrences
    pub count: u64,
}

impl RankedTriplet {
    /// Creates a new ranked entry.
    #[inline(always)]
    pub const fn new(triplet: Triplet, count: u64) -> Self {
        Self { triplet, count }
    }
}

impl PartialOrd for RankedTriplet {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedTriplet {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        // Primary: count, descending
        // Secondary: triplet, ascending
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.triplet.cmp(&other.triplet))
    }
}

impl fmt::Display for RankedTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.triplet, self.count)
    }
}

/// Which sliding windows are kept during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TripletFilter {
    /// Keep a window only if all three characters are letters.
    #[default]
    Alphabetic = 0,
    /// Keep every window regardless of character class.
    All = 1,
}

impl TripletFilter {
    /// Returns `true` if `triplet` passes this filter.
    #[inline(always)]
    pub fn accepts(self, triplet: Triplet) -> bool {
        match self {
            TripletFilter::Alphabetic => triplet.is_alphabetic(),
            TripletFilter::All => true,
        }
    }
}

impl From<bool> for TripletFilter {
    /// `true` selects [`TripletFilter::Alphabetic`].
    #[inline(always)]
    fn from(filter_alphabetic: bool) -> Self {
        if filter_alphabetic {
            TripletFilter::Alphabetic
        } else {
            TripletFilter::All
        }
    }
}

/// How concurrent workers combine their counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationMode {
    /// Every worker counts into a private table; tables are merged after
    /// all workers finished.
    #[default]
    Partitioned,
    /// Every worker increments one concurrent table with per-key locking.
    Shared,
}

/// Errors reported by Tripleter operations.
#[derive(Debug, thiserror::Error)]
pub enum TripletError {
    /// An argument was rejected before any work started (empty text,
    /// zero chunk length, malformed triplet).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The given path does not name an existing file.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// A worker thread panicked before finishing its share.
    #[error("a worker thread panicked")]
    WorkerPanicked,
}

/// Engine configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripletConfig {
    /// When `false`, text is lowercased before tokenization and extraction.
    /// Default: false
    pub case_sensitive: bool,
    /// Extraction policy for the word strategies. The sequential and file
    /// strategies always keep alphabetic triplets only.
    /// Default: [`TripletFilter::Alphabetic`]
    pub filter: TripletFilter,
    /// Lines per chunk for the file strategies.
    /// Default: [`CHUNK_LENGTH`]
    pub chunk_length: usize,
    /// Prefix each chunk with the last two characters of the previous one,
    /// so triplets spanning a chunk boundary are counted.
    /// Default: false
    pub carry_chunk_boundary: bool,
    /// Worker count for the parallel strategies (0 = one per available core).
    pub workers: usize,
    /// Number of entries returned by the `top*` helpers.
    /// Default: [`DEFAULT_TOP_K`]
    pub top_k: usize,
    /// How parallel workers combine their counts.
    pub aggregation: AggregationMode,
}

impl Default for TripletConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            filter: TripletFilter::Alphabetic,
            chunk_length: CHUNK_LENGTH,
            carry_chunk_boundary: false,
            workers: 0,
            top_k: DEFAULT_TOP_K,
            aggregation: AggregationMode::Partitioned,
        }
    }
}

impl TripletConfig {
    /// Default configuration, but distinguishing upper and lower case.
    pub const fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
            filter: TripletFilter::Alphabetic,
            chunk_length: CHUNK_LENGTH,
            carry_chunk_boundary: false,
            workers: 0,
            top_k: DEFAULT_TOP_K,
            aggregation: AggregationMode::Partitioned,
        }
    }

    /// Default configuration, but keeping every window in the word strategies.
    pub const fn unfiltered() -> Self {
        Self {
            case_sensitive: false,
            filter: TripletFilter::All,
            chunk_length: CHUNK_LENGTH,
            carry_chunk_boundary: false,
            workers: 0,
            top_k: DEFAULT_TOP_K,
            aggregation: AggregationMode::Partitioned,
        }
    }

    /// Checks option values that would make an operation meaningless.
    ///
    /// # Errors
    /// Returns `TripletError::InvalidArgument` if `chunk_length` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_length == 0 {
            return Err(TripletError::InvalidArgument(
                "chunk length must be at least 1 line",
            ));
        }
        Ok(())
    }
}
