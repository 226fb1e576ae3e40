//! Private, mergeable frequency table.

use rustc_hash::FxHashMap;
use tripleter_types::Triplet;

/// Triplet → occurrence count.
///
/// A table is owned by exactly one writer. Parallel strategies give each
/// worker its own table and combine them with [`FrequencyTable::merge`]
/// once every worker is done, so no table is ever written concurrently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    pub(crate) counts: FxHashMap<Triplet, u64>,
}

impl FrequencyTable {
    /// Creates an empty table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `triplet`.
    #[inline(always)]
    pub fn increment(&mut self, triplet: Triplet) {
        *self.counts.entry(triplet).or_insert(0) += 1;
    }

    /// Counts `n` occurrences of `triplet`.
    ///
    /// Adding zero still inserts the key, with a count of 0.
    #[inline(always)]
    pub fn add(&mut self, triplet: Triplet, n: u64) {
        *self.counts.entry(triplet).or_insert(0) += n;
    }

    /// Combines two tables by summing counts per triplet.
    ///
    /// Commutative and associative. The smaller table is folded into the
    /// larger one, so merging many partitions stays linear in their size.
    #[must_use]
    pub fn merge(mut self, mut other: Self) -> Self {
        if self.counts.len() < other.counts.len() {
            core::mem::swap(&mut self, &mut other);
        }
        self.merge_from(other);
        self
    }

    /// Adds every count of `other` into this table.
    pub fn merge_from(&mut self, other: Self) {
        self.counts.reserve(other.counts.len());
        for (triplet, n) in other.counts {
            self.add(triplet, n);
        }
    }

    /// Count for `triplet`, or 0 if it never occurred.
    #[inline]
    pub fn get(&self, triplet: &Triplet) -> u64 {
        self.counts.get(triplet).copied().unwrap_or(0)
    }

    /// Count for the triplet spelled by `s`, or 0 if `s` is not exactly
    /// three characters or never occurred.
    pub fn get_str(&self, s: &str) -> u64 {
        Triplet::parse(s).map_or(0, |t| self.get(&t))
    }

    /// Number of distinct triplets.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing was counted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates `(triplet, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Triplet, u64)> + '_ {
        self.counts.iter().map(|(&t, &n)| (t, n))
    }
}

impl Extend<Triplet> for FrequencyTable {
    fn extend<I: IntoIterator<Item = Triplet>>(&mut self, iter: I) {
        for triplet in iter {
            self.increment(triplet);
        }
    }
}

impl FromIterator<Triplet> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = Triplet>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl FromIterator<(Triplet, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Triplet, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (triplet, n) in iter {
            table.add(triplet, n);
        }
        table
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (Triplet, u64);
    type IntoIter = std::collections::hash_map::IntoIter<Triplet, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
