use std::error::Error;

use crate::direction::Direction;
use crate::error::SortError;

/// Sorts `v` by insertion, moving each element left past every predecessor it strictly
/// precedes. Equal elements never pass each other, so the sort is stable.
///
/// If `is_less` fails the error is returned right away. Elements are only moved by a rotation
/// after the insertion point was found, so `v` is always left as a permutation of its input.
pub(crate) fn insertion_sort<T, E, F>(v: &mut [T], is_less: &mut F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<bool, E>,
{
    for i in 1..v.len() {
        let mut dest = i;
        while dest > 0 && is_less(&v[i], &v[dest - 1])? {
            dest -= 1;
        }

        // Shifts v[dest..i] one slot right and drops the candidate into the vacated slot.
        v[dest..=i].rotate_right(1);
    }

    Ok(())
}

/// Insertion sorts the inclusive range `v[left..=right]` by the keys `key` derives, in
/// `direction`. Elements outside the range are not touched.
pub fn insertion_sort_range<T, K, E, F>(
    v: &mut [T],
    left: usize,
    right: usize,
    direction: Direction,
    mut key: F,
) -> Result<(), SortError<E>>
where
    K: Ord,
    E: Error + 'static,
    F: FnMut(&T) -> Result<K, E>,
{
    if left > right || right >= v.len() {
        return Err(SortError::InvalidRange {
            left,
            right,
            len: v.len(),
        });
    }

    let mut is_less =
        |a: &T, b: &T| -> Result<bool, E> { Ok(direction.precedes(&key(a)?, &key(b)?)) };

    insertion_sort(&mut v[left..=right], &mut is_less).map_err(SortError::KeyExtraction)
}
