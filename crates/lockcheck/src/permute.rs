//! Lazy enumeration of thread orderings.
//!
//! Produces orderings in the same sequence as the classic swap-based
//! recursion: fix position `l`, swap each of `l..n` into it in turn, permute
//! the suffix, then swap back. For `n > 2` this is not lexicographic order.
//! The recursion is unrolled into an explicit per-level cursor so the
//! sequence is produced on demand, one owned ordering at a time.

/// Iterator over all `n!` orderings of a set of items.
#[derive(Clone, Debug)]
pub struct Permutations<T> {
    /// Working arrangement; matches the recursion's array at the leaf.
    items: Vec<T>,
    /// `cursor[l]` is the index currently swapped into position `l`.
    cursor: Vec<usize>,
    started: bool,
    done: bool,
}

impl<T: Clone> Permutations<T> {
    pub fn new(items: Vec<T>) -> Self {
        let cursor = (0..items.len()).collect();
        Self {
            items,
            cursor,
            started: false,
            done: false,
        }
    }

    /// Number of orderings in the full sequence, or `None` when `n!` does
    /// not fit in a `u128` (35 or more items).
    pub fn total(&self) -> Option<u128> {
        (1..=self.items.len() as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
    }

    /// Move the working arrangement to the next leaf. Returns false once
    /// every level is exhausted.
    fn advance(&mut self) -> bool {
        let n = self.items.len();
        if n < 2 {
            return false;
        }
        // The last position has a single choice; start one level up.
        let mut level = n - 2;
        loop {
            // Undo this level's swap; deeper levels are already undone.
            self.items.swap(level, self.cursor[level]);
            self.cursor[level] += 1;
            if self.cursor[level] < n {
                self.items.swap(level, self.cursor[level]);
                for deeper in level + 1..n {
                    self.cursor[deeper] = deeper;
                }
                return true;
            }
            if level == 0 {
                return false;
            }
            level -= 1;
        }
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.started && !self.advance() {
            self.done = true;
            return None;
        }
        self.started = true;
        Some(self.items.clone())
    }
}

/// All orderings of `items`, lazily, in swap-recursion order.
pub fn permutations<T: Clone>(items: &[T]) -> Permutations<T> {
    Permutations::new(items.to_vec())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    /// Reference recursion the iterator must agree with.
    fn swap_recursive(items: &mut Vec<u8>, l: usize, out: &mut Vec<Vec<u8>>) {
        if l + 1 >= items.len() {
            out.push(items.clone());
            return;
        }
        for i in l..items.len() {
            items.swap(l, i);
            swap_recursive(items, l + 1, out);
            items.swap(l, i);
        }
    }

    #[test]
    fn test_three_items_swap_order() {
        let got: Vec<Vec<char>> = permutations(&['a', 'b', 'c']).collect();
        let expected = vec![
            vec!['a', 'b', 'c'],
            vec!['a', 'c', 'b'],
            vec!['b', 'a', 'c'],
            vec!['b', 'c', 'a'],
            vec!['c', 'b', 'a'],
            vec!['c', 'a', 'b'],
        ];
        assert_eq!(got, expected);
    }

    #[test]
    fn test_two_items() {
        let got: Vec<Vec<u8>> = permutations(&[1, 2]).collect();
        assert_eq!(got, vec![vec![1, 2], vec![2, 1]]);
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(permutations(&[7]).collect::<Vec<_>>(), vec![vec![7]]);
        assert_eq!(
            permutations::<u8>(&[]).collect::<Vec<_>>(),
            vec![Vec::<u8>::new()]
        );
    }

    #[test]
    fn test_iterator_is_fused_after_exhaustion() {
        let mut perms = permutations(&[1, 2]);
        assert!(perms.next().is_some());
        assert!(perms.next().is_some());
        assert!(perms.next().is_none());
        assert!(perms.next().is_none());
    }

    #[test]
    fn test_clone_restarts_independently() {
        let fresh = permutations(&[1, 2, 3]);
        let mut consumed = fresh.clone();
        consumed.next();
        assert_eq!(fresh.count(), 6);
        assert_eq!(consumed.count(), 5);
    }

    #[test]
    fn test_total() {
        assert_eq!(permutations(&[0u8; 5]).total(), Some(120));
        assert_eq!(permutations::<u8>(&[]).total(), Some(1));
    }

    #[test]
    fn test_total_overflow_is_none() {
        assert!(permutations(&[0u8; 34]).total().is_some());
        assert_eq!(permutations(&[0u8; 35]).total(), None);
        assert_eq!(permutations(&[0u8; 200]).total(), None);
    }

    #[test]
    fn test_huge_set_still_yields_first_ordering() {
        let items: Vec<u16> = (0..40).collect();
        let mut perms = permutations(&items);
        assert_eq!(perms.next(), Some(items.clone()));
        assert!(perms.next().is_some());
    }

    proptest! {
        #[test]
        fn prop_matches_swap_recursion(n in 0usize..7) {
            let items: Vec<u8> = (0..n as u8).collect();
            let mut reference = Vec::new();
            swap_recursive(&mut items.clone(), 0, &mut reference);
            let got: Vec<Vec<u8>> = permutations(&items).collect();
            prop_assert_eq!(got, reference);
        }

        #[test]
        fn prop_yields_n_factorial_distinct_orderings(n in 0usize..7) {
            let items: Vec<u8> = (0..n as u8).collect();
            let all: Vec<Vec<u8>> = permutations(&items).collect();
            let expected: usize = (1..=n).product();
            prop_assert_eq!(all.len(), expected);

            let distinct: HashSet<&Vec<u8>> = all.iter().collect();
            prop_assert_eq!(distinct.len(), expected);

            for ordering in &all {
                let mut sorted = ordering.clone();
                sorted.sort_unstable();
                prop_assert_eq!(&sorted, &items);
            }
        }
    }
}
