//! Frequency aggregation: counting triplets and combining partial counts.
//!
//! Two ways to aggregate across workers:
//! - [`FrequencyTable`]: single-writer table; workers each own one and the
//!   partitions are merged after they all finish
//! - [`SharedFrequencyTable`]: one concurrent table with atomic per-key
//!   increments, drained into a [`FrequencyTable`] at the end

mod rank;
mod shared;
mod stats;
mod table;

pub use shared::SharedFrequencyTable;
pub use stats::TableStats;
pub use table::FrequencyTable;
