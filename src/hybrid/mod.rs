//! Run + merge hybrid sort.
//!
//! The slice is partitioned into runs of `run_size` elements, each run is insertion sorted, and
//! then adjacent runs are merged bottom-up. Every merge pass doubles the merge width until it
//! covers the whole slice.

use std::cmp::{self, Ordering};
use std::convert::Infallible;
use std::error::Error;
use std::num::NonZeroUsize;

use crate::config::SortConfig;
use crate::direction::Direction;
use crate::error::SortError;
use crate::Sort;

pub mod insertion;
pub mod merge;
pub mod partition;

use insertion::insertion_sort;
use merge::merge;
use partition::RunPartitioner;

/// Sorts `v` in place and stably by the keys `key` derives.
///
/// `run_size` of one degenerates to a bottom-up merge sort, a `run_size` of at least `v.len()`
/// to a plain insertion sort.
pub fn sort_by_key<T, K, F>(v: &mut [T], key: F, direction: Direction, run_size: NonZeroUsize)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let config = SortConfig::from_run_size(run_size).with_direction(direction);
    HybridSort::new(config).sort_by_key(v, key);
}

/// Like [`sort_by_key`], but with a fallible key extractor.
///
/// The first extractor error aborts the sort. `v` then still holds every one of its elements
/// exactly once, in unspecified order.
pub fn try_sort_by_key<T, K, E, F>(
    v: &mut [T],
    key: F,
    direction: Direction,
    run_size: NonZeroUsize,
) -> Result<(), SortError<E>>
where
    K: Ord,
    E: Error + 'static,
    F: FnMut(&T) -> Result<K, E>,
{
    HybridSort::new(SortConfig::from_run_size(run_size).with_direction(direction))
        .try_sort_by_key(v, key)
        .map(|_| ())
}

/// States of one sort call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Partitioned,
    RunSorted,
    Merging { width: usize },
    Done,
}

/// What a sort call did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Number of runs that were insertion sorted.
    pub runs: usize,
    /// Number of completed merge passes.
    pub merge_passes: usize,
    /// Number of pairs of runs merged over all passes.
    pub merges: usize,
}

/// Sort engine with a fixed [`SortConfig`].
#[derive(Copy, Clone, Debug, Default)]
pub struct HybridSort {
    config: SortConfig,
}

impl HybridSort {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SortConfig {
        self.config
    }

    pub fn sort<T: Ord>(&self, v: &mut [T]) -> SortStats {
        self.sort_by(v, T::cmp)
    }

    /// Sorts by `compare`, which is interpreted as an ascending order and flipped for
    /// [`Direction::Descending`].
    pub fn sort_by<T, F>(&self, v: &mut [T], mut compare: F) -> SortStats
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let direction = self.config.direction();
        let mut is_less = |a: &T, b: &T| -> Result<bool, Infallible> {
            Ok(direction.apply(compare(a, b)) == Ordering::Less)
        };

        into_ok(self.run(v, &mut is_less))
    }

    pub fn sort_by_key<T, K, F>(&self, v: &mut [T], mut key: F) -> SortStats
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let direction = self.config.direction();
        let mut is_less = |a: &T, b: &T| -> Result<bool, Infallible> {
            Ok(direction.precedes(&key(a), &key(b)))
        };

        into_ok(self.run(v, &mut is_less))
    }

    pub fn try_sort_by_key<T, K, E, F>(
        &self,
        v: &mut [T],
        mut key: F,
    ) -> Result<SortStats, SortError<E>>
    where
        K: Ord,
        E: Error + 'static,
        F: FnMut(&T) -> Result<K, E>,
    {
        let len = v.len();
        let direction = self.config.direction();
        let mut is_less =
            |a: &T, b: &T| -> Result<bool, E> { Ok(direction.precedes(&key(a)?, &key(b)?)) };

        self.run(v, &mut is_less).map_err(|err| {
            log::debug!("sort of {len} records aborted, key extraction failed");
            SortError::KeyExtraction(err)
        })
    }

    fn run<T, E, F>(&self, v: &mut [T], is_less: &mut F) -> Result<SortStats, E>
    where
        F: FnMut(&T, &T) -> Result<bool, E>,
    {
        let len = v.len();
        let run_size = self.config.run_size();
        let mut stats = SortStats::default();

        if len < 2 {
            // These inputs are always sorted.
            return Ok(stats);
        }

        log::debug!(
            "sorting {len} records, run size {run_size}, {:?}",
            self.config.direction()
        );

        let mut scratch = Vec::new();
        let mut phase = Phase::Partitioned;

        loop {
            phase = match phase {
                Phase::Partitioned => {
                    for run in RunPartitioner::new(len, run_size) {
                        insertion_sort(&mut v[run.range()], is_less)?;
                        stats.runs += 1;
                    }
                    Phase::RunSorted
                }
                Phase::RunSorted => Phase::Merging {
                    width: run_size.get(),
                },
                Phase::Merging { width } if width >= len => Phase::Done,
                Phase::Merging { width } => {
                    let merges = merge_pass(v, width, &mut scratch, is_less)?;
                    log::trace!("merge pass with width {width}: {merges} merges");

                    stats.merges += merges;
                    stats.merge_passes += 1;
                    Phase::Merging {
                        width: width.saturating_mul(2),
                    }
                }
                Phase::Done => break,
            };
        }

        log::debug!("sorted {len} records: {stats:?}");

        Ok(stats)
    }
}

// Merges each pair of neighboring runs of `width` elements, and returns the number of merges.
// A trailing run without a partner is carried over to the next pass unchanged.
fn merge_pass<T, E, F>(
    v: &mut [T],
    width: usize,
    scratch: &mut Vec<T>,
    is_less: &mut F,
) -> Result<usize, E>
where
    F: FnMut(&T, &T) -> Result<bool, E>,
{
    let len = v.len();
    let mut merges = 0;
    let mut left = 0;

    while len - left > width {
        let right = cmp::min(left.saturating_add(width.saturating_mul(2)), len);
        merge(&mut v[left..right], width, scratch, is_less)?;

        merges += 1;
        left = right;
    }

    Ok(merges)
}

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(val) => val,
        Err(never) => match never {},
    }
}

/// [`HybridSort`] with a run size fixed at compile time, ascending.
pub struct FixedRunSize<const RUN_SIZE: usize>;

impl<const RUN_SIZE: usize> FixedRunSize<RUN_SIZE> {
    const NON_ZERO: NonZeroUsize = match NonZeroUsize::new(RUN_SIZE) {
        Some(run_size) => run_size,
        None => panic!("run size must be at least 1"),
    };

    pub fn engine() -> HybridSort {
        HybridSort::new(SortConfig::from_run_size(Self::NON_ZERO))
    }
}

impl<const RUN_SIZE: usize> Sort for FixedRunSize<RUN_SIZE> {
    fn name() -> String {
        format!("hybrid_run{RUN_SIZE}_stable")
    }

    #[inline]
    fn sort<T>(arr: &mut [T])
    where
        T: Ord,
    {
        Self::engine().sort(arr);
    }

    #[inline]
    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        Self::engine().sort_by(arr, compare);
    }
}
