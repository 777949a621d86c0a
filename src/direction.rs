use std::cmp::Ordering;

/// Sort direction, fixed for the duration of one sort call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Returns `true` if a record keyed `a` must be placed strictly before one keyed `b`.
    ///
    /// Equal keys never precede each other, which is what keeps the insertion and merge steps
    /// stable.
    #[inline]
    pub fn precedes<K: Ord + ?Sized>(self, a: &K, b: &K) -> bool {
        match self {
            Direction::Ascending => a < b,
            Direction::Descending => a > b,
        }
    }

    /// Maps an ascending comparison result into this direction.
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }

    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// Checks that `keys` is monotonic in this direction.
    pub fn is_sorted<K: Ord>(self, keys: &[K]) -> bool {
        keys.windows(2).all(|w| !self.precedes(&w[1], &w[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedes_is_strict() {
        assert!(Direction::Ascending.precedes(&1, &2));
        assert!(!Direction::Ascending.precedes(&2, &2));
        assert!(!Direction::Ascending.precedes(&3, &2));

        assert!(Direction::Descending.precedes(&3, &2));
        assert!(!Direction::Descending.precedes(&2, &2));
        assert!(!Direction::Descending.precedes(&1, &2));
    }

    #[test]
    fn apply_and_reverse() {
        assert_eq!(Direction::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Descending.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Direction::Ascending.reverse(), Direction::Descending);
        assert_eq!(Direction::default(), Direction::Ascending);
    }

    #[test]
    fn is_sorted_allows_ties() {
        assert!(Direction::Ascending.is_sorted(&[1, 1, 2, 5, 5]));
        assert!(!Direction::Ascending.is_sorted(&[1, 3, 2]));
        assert!(Direction::Descending.is_sorted(&["z", "m", "m", "a"]));
        assert!(Direction::Descending.is_sorted::<i32>(&[]));
    }
}
