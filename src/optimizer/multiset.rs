//! Multisets of a fixed size drawn with repetition from an alphabet.
//!
//! The iterator keeps one count per alphabet position and steps them like an odometer.
//! The order matches the recursive definition: for the first element `x`, every
//! multiset using `x` zero times comes first, then once, and so on up to `size`, with
//! the remaining elements enumerated the same way inside each block.
//!
//! Positions are enumerated independently, so an alphabet containing the same value
//! twice yields the same multiset more than once. Callers deduplicate first; see
//! [crate::data::Inventory::distinct].

/// Lazy multiset generator over a borrowed alphabet.
#[derive(Debug, Clone)]
pub struct Multisets<'a, T> {
    alphabet: &'a [T],
    size: usize,
    counts: Vec<usize>,
    done: bool,
}

impl<'a, T: Clone> Multisets<'a, T> {
    pub fn new(alphabet: &'a [T], size: usize) -> Self {
        let mut counts = vec![0; alphabet.len()];
        // Leading counts start at zero, so the last position holds everything.
        if let Some(last) = counts.last_mut() {
            *last = size;
        }
        Self {
            alphabet,
            size,
            counts,
            // Nothing to draw from, unless nothing needs drawing.
            done: alphabet.is_empty() && size > 0,
        }
    }

    /// Per-position counts of the multiset the next call to `next` will yield.
    pub fn peek_counts(&self) -> Option<&[usize]> {
        (!self.done).then_some(self.counts.as_slice())
    }

    /// Yields the current counts and advances.
    pub fn next_counts(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.counts.clone();
        self.advance();
        Some(current)
    }

    fn advance(&mut self) {
        let Some(last) = self.counts.len().checked_sub(1) else {
            // Empty alphabet with size zero: the single empty multiset was yielded.
            self.done = true;
            return;
        };

        // Rightmost free position whose prefix sum still leaves room to grow.
        let mut prefix: usize = self.counts[..last].iter().sum();
        for index in (0..last).rev() {
            if prefix < self.size {
                self.counts[index] += 1;
                for count in &mut self.counts[index + 1..last] {
                    *count = 0;
                }
                let used: usize = self.counts[..last].iter().sum();
                self.counts[last] = self.size - used;
                return;
            }
            prefix -= self.counts[index];
        }
        self.done = true;
    }

    fn expand(&self, counts: &[usize]) -> Vec<T> {
        let mut out = Vec::with_capacity(self.size);
        for (value, &count) in self.alphabet.iter().zip(counts) {
            out.extend(std::iter::repeat(value).take(count).cloned());
        }
        out
    }
}

impl<T: Clone> Iterator for Multisets<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let counts = self.next_counts()?;
        Some(self.expand(&counts))
    }
}

/// All multisets of `size` elements over `alphabet`.
///
/// # Example
/// ```
/// # use squad_rating::optimizer::multiset::multisets;
/// let all: Vec<Vec<u32>> = multisets(&[1, 2], 2).collect();
/// assert_eq!(all, vec![vec![2, 2], vec![1, 2], vec![1, 1]]);
/// ```
pub fn multisets<T: Clone>(alphabet: &[T], size: usize) -> Multisets<'_, T> {
    Multisets::new(alphabet, size)
}

/// Number of multisets of `size` over `distinct` values: C(distinct + size - 1, size).
/// Saturates at `u128::MAX`.
pub fn multiset_count(distinct: usize, size: usize) -> u128 {
    if size == 0 {
        return 1;
    }
    if distinct == 0 {
        return 0;
    }
    let n = (distinct + size - 1) as u128;
    let k = size.min(distinct - 1) as u128;
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) / (i + 1) stays integral at every step
        acc = match acc.checked_mul(n - i) {
            Some(value) => value / (i + 1),
            None => return u128::MAX,
        };
    }
    acc
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn size_zero_yields_one_empty_multiset() {
        let all: Vec<Vec<u32>> = multisets(&[1, 2, 3], 0).collect();
        assert_eq!(all, vec![Vec::<u32>::new()]);

        let from_nothing: Vec<Vec<u32>> = multisets(&[], 0).collect();
        assert_eq!(from_nothing, vec![Vec::<u32>::new()]);
    }

    #[test]
    fn empty_alphabet_yields_nothing() {
        assert_eq!(multisets::<u32>(&[], 3).count(), 0);
    }

    #[test]
    fn single_value_alphabet_yields_one() {
        let all: Vec<Vec<u32>> = multisets(&[7], 3).collect();
        assert_eq!(all, vec![vec![7, 7, 7]]);
    }

    #[test]
    fn order_follows_recursive_definition() {
        let all: Vec<Vec<u32>> = multisets(&[1, 2, 3], 2).collect();
        assert_eq!(
            all,
            vec![
                vec![3, 3],
                vec![2, 3],
                vec![2, 2],
                vec![1, 3],
                vec![1, 2],
                vec![1, 1],
            ]
        );
    }

    #[test]
    fn count_matches_stars_and_bars_without_duplicates() {
        for distinct in 1..=6_u32 {
            let alphabet: Vec<u32> = (0..distinct).collect();
            for size in 0..=5 {
                let all: Vec<Vec<u32>> = multisets(&alphabet, size).collect();
                assert_eq!(all.len() as u128, multiset_count(distinct as usize, size));
                assert!(all.iter().all(|m| m.len() == size));
                let unique: HashSet<&Vec<u32>> = all.iter().collect();
                assert_eq!(unique.len(), all.len(), "duplicate for d={distinct} k={size}");
            }
        }
    }

    #[test]
    fn restarting_reproduces_the_sequence() {
        let alphabet = [80, 81, 82, 83];
        let first: Vec<Vec<u32>> = multisets(&alphabet, 3).collect();
        let second: Vec<Vec<u32>> = multisets(&alphabet, 3).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_alphabet_values_repeat_multisets() {
        let all: Vec<Vec<u32>> = multisets(&[5, 5], 1).collect();
        assert_eq!(all, vec![vec![5], vec![5]]);
    }

    #[test]
    fn counts_view_matches_expanded_output() {
        let mut iter = multisets(&[1, 2], 2);
        assert_eq!(iter.peek_counts(), Some([0, 2].as_slice()));
        assert_eq!(iter.next_counts(), Some(vec![0, 2]));
        assert_eq!(iter.next(), Some(vec![1, 2]));
        assert_eq!(iter.next(), Some(vec![1, 1]));
        assert_eq!(iter.peek_counts(), None);
    }

    #[test]
    fn multiset_count_known_values() {
        assert_eq!(multiset_count(4, 11), 364);
        assert_eq!(multiset_count(55, 11), 895_068_996_640);
        assert_eq!(multiset_count(0, 0), 1);
        assert_eq!(multiset_count(0, 2), 0);
    }
}
