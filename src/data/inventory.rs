//! Available ratings grouped by value.

use std::collections::BTreeMap;

use crate::rating::Rating;

/// Read-only count of how many members of each rating can be drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: BTreeMap<Rating, usize>,
}

impl Inventory {
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        Self {
            counts: count_ratings(ratings),
        }
    }

    /// Copies of `rating` on hand; unknown ratings count zero.
    pub fn count(&self, rating: Rating) -> usize {
        self.counts.get(&rating).copied().unwrap_or(0)
    }

    /// Distinct ratings on hand, ascending.
    pub fn distinct(&self) -> Vec<Rating> {
        self.counts.keys().copied().collect()
    }

    /// Total number of members on hand.
    pub fn len(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// True when every `(rating, needed)` group can be drawn at once.
    pub fn can_supply<'a, I>(&self, groups: I) -> bool
    where
        I: IntoIterator<Item = &'a (Rating, usize)>,
    {
        groups
            .into_iter()
            .all(|&(rating, needed)| self.count(rating) >= needed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rating, usize)> + '_ {
        self.counts.iter().map(|(&rating, &count)| (rating, count))
    }
}

pub fn count_ratings(ratings: &[Rating]) -> BTreeMap<Rating, usize> {
    let mut counts = BTreeMap::new();
    for &rating in ratings {
        *counts.entry(rating).or_insert(0) += 1;
    }
    counts
}

/// Distinct ratings, ascending.
pub fn get_unique_ratings(ratings: &[Rating]) -> Vec<Rating> {
    count_ratings(ratings).into_keys().collect()
}
