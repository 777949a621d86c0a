use std::error::Error;
use std::ptr;

use crate::direction::Direction;
use crate::error::SortError;

/// Merges the sorted runs `v[..mid]` and `v[mid..]` into `v`, using `scratch` as temporary
/// storage for the left run.
///
/// On ties the element of the left run is written first, so the merge is stable. If `is_less`
/// fails or panics, every element is still in `v` exactly once when this returns.
///
/// `scratch` must be empty, it is grown to hold `mid` elements and is empty again afterwards.
pub(crate) fn merge<T, E, F>(
    v: &mut [T],
    mid: usize,
    scratch: &mut Vec<T>,
    is_less: &mut F,
) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<bool, E>,
{
    let len = v.len();
    assert!(mid > 0 && mid < len);
    debug_assert!(scratch.is_empty());

    scratch.reserve(mid);

    let v_ptr = v.as_mut_ptr();
    let buf_ptr = scratch.as_mut_ptr();

    // The left run is moved into the buffer, which leaves a gap of `mid` slots at the front of
    // `v`. The fronts of the buffered left run and of the right run, still in place, are then
    // compared and the one coming first is moved to the front of the gap.
    //
    // Intermediate state is tracked by `hole`. The gap always starts at `hole.dest` and is
    // exactly as long as the unconsumed part of the buffer, so dropping `hole` closes it. That
    // happens when the loop is done, and also when `is_less` returns an error or panics.
    //
    // SAFETY: `scratch` has capacity for `mid` elements and does not overlap `v`. Its length
    // stays zero, so the copies in it are never dropped by `scratch` itself.
    unsafe {
        ptr::copy_nonoverlapping(v_ptr, buf_ptr, mid);
    }

    let mut hole = MergeHole {
        buf: buf_ptr,
        start: 0,
        end: mid,
        dest: v_ptr,
    };
    let mut right = mid;

    while hole.start < hole.end && right < len {
        // SAFETY: `hole.start < mid`, so the buffer slot is initialized. `right < len` and the
        // gap ends at `right`, so `v[right]` is an unconsumed element of the right run and
        // `hole.dest` points into the gap, distinct from both sources.
        unsafe {
            let left_elem = buf_ptr.add(hole.start);
            let right_elem = v_ptr.add(right);

            // Only take the right element if it strictly comes first.
            if is_less(&*right_elem, &*left_elem)? {
                ptr::copy_nonoverlapping(right_elem, hole.dest, 1);
                right += 1;
            } else {
                ptr::copy_nonoverlapping(left_elem, hole.dest, 1);
                hole.start += 1;
            }

            hole.dest = hole.dest.add(1);
        }
    }

    // If the right run was consumed first, dropping `hole` moves the rest of the left run to
    // the end of `v`. Otherwise the rest of the right run is already in place.
    drop(hole);

    Ok(())
}

// When dropped, moves `buf[start..end]` to `dest`.
struct MergeHole<T> {
    buf: *mut T,
    start: usize,
    end: usize,
    dest: *mut T,
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        // SAFETY: `buf[start..end]` holds initialized elements that are not part of `v` right
        // now, and `dest` is the start of a gap in `v` of exactly `end - start` slots.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.add(self.start), self.dest, self.end - self.start);
        }
    }
}

/// Merges the sorted inclusive ranges `v[l..=m]` and `v[m + 1..=r]` into a sorted `v[l..=r]`,
/// by the keys `key` derives, in `direction`.
///
/// The temporary buffer only lives for the duration of the call.
pub fn merge_runs<T, K, E, F>(
    v: &mut [T],
    l: usize,
    m: usize,
    r: usize,
    direction: Direction,
    mut key: F,
) -> Result<(), SortError<E>>
where
    K: Ord,
    E: Error + 'static,
    F: FnMut(&T) -> Result<K, E>,
{
    if l > r || r >= v.len() {
        return Err(SortError::InvalidRange {
            left: l,
            right: r,
            len: v.len(),
        });
    }

    if m < l || m >= r {
        return Err(SortError::InvalidMergePoint {
            left: l,
            mid: m,
            right: r,
        });
    }

    let mid = m - l + 1;
    let mut scratch = Vec::with_capacity(mid);
    let mut is_less =
        |a: &T, b: &T| -> Result<bool, E> { Ok(direction.precedes(&key(a)?, &key(b)?)) };

    merge(&mut v[l..=r], mid, &mut scratch, &mut is_less).map_err(SortError::KeyExtraction)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::fmt;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    use super::*;

    fn ident(x: &i32) -> Result<i32, Infallible> {
        Ok(*x)
    }

    #[derive(Debug)]
    struct Unkeyed(i32);

    impl fmt::Display for Unkeyed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "record {} has no key", self.0)
        }
    }

    impl Error for Unkeyed {}

    #[test]
    fn merges_interleaved_runs() {
        let mut v = [1, 3, 5, 2, 4, 6];
        merge_runs(&mut v, 0, 2, 5, Direction::Ascending, ident).unwrap();
        assert_eq!(v, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn merges_inside_a_larger_slice() {
        let mut v = [100, 7, 9, 1, 8, -100];
        merge_runs(&mut v, 1, 2, 4, Direction::Ascending, ident).unwrap();
        assert_eq!(v, [100, 1, 7, 8, 9, -100]);
    }

    #[test]
    fn merges_descending_runs() {
        let mut v = [9, 4, 1, 8, 7, 2, 0];
        merge_runs(&mut v, 0, 2, 6, Direction::Descending, ident).unwrap();
        assert_eq!(v, [9, 8, 7, 4, 2, 1, 0]);
    }

    #[test]
    fn uneven_run_lengths() {
        let mut v = [2, 3, 4, 5, 1];
        merge_runs(&mut v, 0, 3, 4, Direction::Ascending, ident).unwrap();
        assert_eq!(v, [1, 2, 3, 4, 5]);

        let mut v = [6, 1, 2, 3, 4];
        merge_runs(&mut v, 0, 0, 4, Direction::Ascending, ident).unwrap();
        assert_eq!(v, [1, 2, 3, 4, 6]);
    }

    #[test]
    fn ties_prefer_left_run() {
        let key = |x: &(i32, char)| Ok::<_, Infallible>(x.0);

        let mut v = [(1, 'a'), (2, 'b'), (1, 'c'), (2, 'd')];
        merge_runs(&mut v, 0, 1, 3, Direction::Ascending, key).unwrap();
        assert_eq!(v, [(1, 'a'), (1, 'c'), (2, 'b'), (2, 'd')]);

        let mut v = [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        merge_runs(&mut v, 0, 1, 3, Direction::Descending, key).unwrap();
        assert_eq!(v, [(2, 'a'), (2, 'c'), (1, 'b'), (1, 'd')]);
    }

    #[test]
    fn invalid_bounds() {
        let mut v = [1, 2, 3];

        assert!(matches!(
            merge_runs(&mut v, 0, 1, 3, Direction::Ascending, ident),
            Err(SortError::InvalidRange { right: 3, len: 3, .. })
        ));
        assert!(matches!(
            merge_runs(&mut v, 2, 2, 1, Direction::Ascending, ident),
            Err(SortError::InvalidRange { .. })
        ));
        assert!(matches!(
            merge_runs(&mut v, 0, 2, 2, Direction::Ascending, ident),
            Err(SortError::InvalidMergePoint { mid: 2, .. })
        ));
        assert!(matches!(
            merge_runs(&mut v, 1, 0, 2, Direction::Ascending, ident),
            Err(SortError::InvalidMergePoint { .. })
        ));
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn key_failure_keeps_permutation() {
        let mut v = [1, 4, 7, 2, 3, -5, 9];
        let result = merge_runs(&mut v, 0, 2, 6, Direction::Ascending, |x: &i32| {
            if *x < 0 {
                Err(Unkeyed(*x))
            } else {
                Ok(*x)
            }
        });

        assert!(matches!(result, Err(SortError::KeyExtraction(Unkeyed(-5)))));
        // 1, 2, 3 were merged before -5 was compared, 4 and 7 are put back in front of it.
        assert_eq!(v, [1, 2, 3, 4, 7, -5, 9]);
    }

    #[test]
    fn panic_keeps_every_element_once() {
        // Non trivial drop, a duplicate or lost element would show up in the counts.
        let drops = Rc::new(Cell::new(0));

        struct Tracked {
            val: i32,
            drops: Rc<Cell<usize>>,
        }

        impl Drop for Tracked {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
            }
        }

        let mut v = [0, 2, 4, 6, 1, 3, 5, 7]
            .into_iter()
            .map(|val| Tracked {
                val,
                drops: drops.clone(),
            })
            .collect::<Vec<_>>();

        let mut scratch = Vec::new();
        let mut comparisons = 0;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            merge(&mut v, 4, &mut scratch, &mut |a: &Tracked, b: &Tracked| {
                comparisons += 1;
                if comparisons == 4 {
                    panic!("comparison failed");
                }
                Ok::<_, Infallible>(a.val < b.val)
            })
        }));

        assert!(result.is_err());
        assert!(scratch.is_empty());
        assert_eq!(drops.get(), 0);

        let mut vals = v.iter().map(|t| t.val).collect::<Vec<_>>();
        vals.sort_unstable();
        assert_eq!(vals, (0..8).collect::<Vec<_>>());

        drop(v);
        assert_eq!(drops.get(), 8);
    }

    #[test]
    fn zero_sized_elements() {
        let mut v = [(); 9];
        let mut scratch = Vec::new();
        merge(&mut v, 4, &mut scratch, &mut |_: &(), _: &()| {
            Ok::<_, Infallible>(false)
        })
        .unwrap();
        assert_eq!(v.len(), 9);
    }
}
