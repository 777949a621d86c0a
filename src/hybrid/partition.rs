use std::iter::FusedIterator;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Contiguous index range `[start, start + len)` of a slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub len: usize,
}

impl Run {
    /// Inclusive last index, the `right` bound of a run. Runs are never empty.
    pub fn last(&self) -> usize {
        self.start + self.len - 1
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Splits `0..len` into consecutive runs of `run_size` elements, the last run may be shorter.
#[derive(Clone, Debug)]
pub struct RunPartitioner {
    next: usize,
    len: usize,
    run_size: usize,
}

impl RunPartitioner {
    pub fn new(len: usize, run_size: NonZeroUsize) -> Self {
        Self {
            next: 0,
            len,
            run_size: run_size.get(),
        }
    }
}

impl Iterator for RunPartitioner {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        if self.next >= self.len {
            return None;
        }

        let start = self.next;
        let len = self.run_size.min(self.len - start);
        self.next = start + len;

        Some(Run { start, len })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.next.min(self.len)).div_ceil(self.run_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RunPartitioner {}
impl FusedIterator for RunPartitioner {}
