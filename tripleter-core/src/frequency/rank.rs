//! Ranking: most frequent triplets first.

use tripleter_types::RankedTriplet;

use crate::frequency::FrequencyTable;

impl FrequencyTable {
    /// Returns the `k` most frequent triplets.
    ///
    /// Ordered by count descending; equal counts are ordered by ascending
    /// triplet, so the result does not depend on hash iteration order. If
    /// `k` exceeds the number of distinct triplets, all are returned.
    pub fn top_k(&self, k: usize) -> Vec<RankedTriplet> {
        if k == 0 || self.is_empty() {
            return Vec::new();
        }

        let mut rows: Vec<RankedTriplet> = self
            .iter()
            .map(|(triplet, count)| RankedTriplet::new(triplet, count))
            .collect();

        if k < rows.len() {
            rows.select_nth_unstable(k - 1);
            rows.truncate(k);
        }
        rows.sort_unstable();
        rows
    }

    /// Returns every triplet in ranking order.
    pub fn ranked(&self) -> Vec<RankedTriplet> {
        self.top_k(self.len())
    }
}
