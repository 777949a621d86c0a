//! Stable hybrid sort for keyed records.
//!
//! The slice is split into fixed size runs, every run is insertion sorted, and then neighboring
//! runs are merged bottom-up with a merge width that doubles each pass until a single sorted run
//! remains.

use std::cmp::Ordering;

/// Implementation seam shared by the tests and benchmarks, so the same checks can be run against
/// several run sizes and against the standard library.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;
}

pub mod config;
pub mod direction;
pub mod error;
pub mod hybrid;

// Collaborators that consume the engine, or live next to it.
pub mod inventory;
pub mod search;

pub mod patterns;

pub use config::{SortConfig, DEFAULT_RUN_SIZE};
pub use direction::Direction;
pub use error::{ConfigError, SortError};
pub use hybrid::insertion::insertion_sort_range;
pub use hybrid::merge::merge_runs;
pub use hybrid::partition::{Run, RunPartitioner};
pub use hybrid::{sort_by_key, try_sort_by_key, FixedRunSize, HybridSort, Phase, SortStats};
