//! Concurrent frequency table for the shared aggregation mode.

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use tripleter_types::Triplet;

use crate::frequency::FrequencyTable;

/// Triplet → count map that many workers may increment at once.
///
/// Keys are spread over internally locked shards, so an increment is
/// atomic per key and no update is lost. Drain it into a
/// [`FrequencyTable`] once all writers are done.
#[derive(Debug, Default)]
pub struct SharedFrequencyTable {
    counts: DashMap<Triplet, u64, FxBuildHasher>,
}

impl SharedFrequencyTable {
    /// Creates an empty shared table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `triplet`.
    #[inline]
    pub fn increment(&self, triplet: Triplet) {
        *self.counts.entry(triplet).or_insert(0) += 1;
    }

    /// Counts one occurrence of every triplet in `triplets`.
    pub fn extend<I: IntoIterator<Item = Triplet>>(&self, triplets: I) {
        for triplet in triplets {
            self.increment(triplet);
        }
    }

    /// Count for `triplet`, or 0 if it never occurred.
    pub fn get(&self, triplet: &Triplet) -> u64 {
        self.counts.get(triplet).map_or(0, |n| *n)
    }

    /// Number of distinct triplets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Consumes the shared table, producing a private one.
    pub fn into_table(self) -> FrequencyTable {
        self.counts.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Triplet {
        Triplet::parse(s).unwrap()
    }

    #[test]
    fn increment_and_drain() {
        let shared = SharedFrequencyTable::new();
        assert!(shared.is_empty());

        shared.increment(t("abc"));
        shared.increment(t("abc"));
        shared.extend([t("xyz")]);

        assert_eq!(shared.get(&t("abc")), 2);
        assert_eq!(shared.get(&t("nop")), 0);
        assert_eq!(shared.len(), 2);

        let table = shared.into_table();
        assert_eq!(table.get_str("abc"), 2);
        assert_eq!(table.get_str("xyz"), 1);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        const THREADS: usize = 8;
        const PER_THREAD: u64 = 10_000;

        let shared = SharedFrequencyTable::new();
        crossbeam::thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|_| {
                    for _ in 0..PER_THREAD {
                        shared.increment(t("abc"));
                    }
                });
            }
        })
        .unwrap();

        assert_eq!(shared.get(&t("abc")), THREADS as u64 * PER_THREAD);
    }
}
