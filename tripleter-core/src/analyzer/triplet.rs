//! Triplet extraction module.
//!
//! Slides a 3-character window over text, one character at a time. Windows
//! are measured in `char`s, not bytes, so "café" has two triplets.

use core::iter::FusedIterator;
use core::str::Chars;

use tripleter_types::{Triplet, TripletFilter, TRIPLET_LENGTH};

/// Extracts triplets from text using a sliding window.
///
/// For text shorter than 3 characters, nothing is yielded. For text of N
/// characters, at most N-2 triplets are yielded; exactly N-2 with
/// [`TripletFilter::All`].
///
/// The returned iterator is lazy and cheap to clone, so the same input can
/// be walked again from the start.
///
/// # Example
///
/// ```
/// use tripleter_core::analyzer::triplet::extract_triplets;
/// use tripleter_types::TripletFilter;
///
/// let all: Vec<String> = extract_triplets("he said", TripletFilter::All)
///     .map(|t| t.to_string())
///     .collect();
/// assert_eq!(all, ["he ", "e s", " sa", "sai", "aid"]);
///
/// let letters = extract_triplets("he said", TripletFilter::Alphabetic).count();
/// assert_eq!(letters, 2); // "sai", "aid"
/// ```
#[inline]
pub fn extract_triplets(text: &str, filter: TripletFilter) -> Triplets<'_> {
    Triplets::new(text, filter)
}

/// Number of windows in `text`, before filtering.
///
/// Returns 0 for text shorter than 3 characters.
#[inline]
pub fn count_triplets(text: &str) -> usize {
    text.chars().count().saturating_sub(TRIPLET_LENGTH - 1)
}

/// Iterator returned by [`extract_triplets`].
#[derive(Clone)]
pub struct Triplets<'a> {
    chars: Chars<'a>,
    /// The two characters preceding the next window's last one.
    window: Option<(char, char)>,
    filter: TripletFilter,
}

impl<'a> Triplets<'a> {
    fn new(text: &'a str, filter: TripletFilter) -> Self {
        let mut chars = text.chars();
        let window = match (chars.next(), chars.next()) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        };
        Self {
            chars,
            window,
            filter,
        }
    }
}

impl Iterator for Triplets<'_> {
    type Item = Triplet;

    #[inline]
    fn next(&mut self) -> Option<Triplet> {
        loop {
            let (a, b) = self.window?;
            let Some(c) = self.chars.next() else {
                self.window = None;
                return None;
            };
            self.window = Some((b, c));

            let triplet = Triplet::new(a, b, c);
            if self.filter.accepts(triplet) {
                return Some(triplet);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.window.is_none() {
            return (0, Some(0));
        }
        let (lo, hi) = self.chars.size_hint();
        match self.filter {
            TripletFilter::All => (lo, hi),
            TripletFilter::Alphabetic => (0, hi),
        }
    }
}

impl FusedIterator for Triplets<'_> {}
