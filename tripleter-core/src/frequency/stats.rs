//! Table statistics.

use crate::frequency::FrequencyTable;

/// A snapshot of frequency table statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Number of distinct triplets.
    pub distinct: usize,
    /// Sum of all counts.
    pub total: u64,
    /// Highest single count, 0 for an empty table.
    pub max_count: u64,
}

impl FrequencyTable {
    /// Returns table statistics.
    pub fn stats(&self) -> TableStats {
        TableStats::from_table(self)
    }
}

impl TableStats {
    /// Computes stats for `table`.
    pub fn from_table(table: &FrequencyTable) -> Self {
        let (total, max_count) = table
            .counts
            .values()
            .fold((0u64, 0u64), |(total, max), &n| (total + n, max.max(n)));

        Self {
            distinct: table.len(),
            total,
            max_count,
        }
    }

    /// Approximate memory held by the table's entries, in bytes.
    pub fn memory_usage_bytes(&self) -> usize {
        self.distinct * (size_of::<tripleter_types::Triplet>() + size_of::<u64>())
    }
}

impl core::fmt::Display for TableStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} distinct triplets, {} occurrences",
            self.distinct, self.total
        )?;

        if self.distinct > 0 {
            write!(f, ", max count {}", self.max_count)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripleter_types::Triplet;

    #[test]
    fn stats_of_empty_table() {
        let stats = FrequencyTable::new().stats();
        assert_eq!(stats.distinct, 0);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.max_count, 0);
        assert_eq!(stats.memory_usage_bytes(), 0);
        assert_eq!(stats.to_string(), "0 distinct triplets, 0 occurrences");
    }

    #[test]
    fn stats_of_counts() {
        let table: FrequencyTable = ["abc", "abc", "abc", "xyz"]
            .iter()
            .map(|s| Triplet::parse(s).unwrap())
            .collect();
        let stats = table.stats();

        assert_eq!(stats.distinct, 2);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.max_count, 3);
        assert_eq!(stats.memory_usage_bytes(), 2 * (12 + 8));
        assert!(format!("{stats}").contains("max count 3"));
    }
}
