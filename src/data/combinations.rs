//! Precomputed fills for the common target range.
//!
//! The authored table lives in `data/combinations.yaml` and is compiled into the
//! binary. It is parsed once, on first use, and never changes afterwards.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::data::inventory::Inventory;
use crate::rating::{Rating, SQUAD_CAPACITY};

/// Targets the precomputed table covers.
pub const TABLE_TARGETS: RangeInclusive<u32> = 80..=92;

const EMBEDDED_TABLE: &str = include_str!("../../data/combinations.yaml");

static TABLE: OnceLock<CombinationTable> = OnceLock::new();

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to parse combination table: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("target {target}: combination {index} has {size} members, expected {}", SQUAD_CAPACITY)]
    WrongSize {
        target: u32,
        index: usize,
        size: usize,
    },
    #[error("target {target}: combinations are not ascending by total rating points")]
    Unsorted { target: u32 },
    #[error("target {0} is listed more than once")]
    DuplicateTarget(u32),
}

/// One authored fill, as rating -> count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PrecomputedCombination {
    groups: BTreeMap<Rating, usize>,
}

impl PrecomputedCombination {
    pub fn from_groups(groups: impl IntoIterator<Item = (Rating, usize)>) -> Self {
        let mut merged = BTreeMap::new();
        for (rating, count) in groups {
            *merged.entry(rating).or_insert(0) += count;
        }
        Self { groups: merged }
    }

    /// `(rating, count)` groups, ascending by rating.
    pub fn groups(&self) -> impl Iterator<Item = (Rating, usize)> + '_ {
        self.groups.iter().map(|(&rating, &count)| (rating, count))
    }

    /// True when the inventory holds enough copies of every rating.
    pub fn feasible(&self, inventory: &Inventory) -> bool {
        self.groups()
            .all(|(rating, needed)| inventory.count(rating) >= needed)
    }

    /// Flat list with `count` copies of each rating.
    pub fn to_multiset(&self) -> Vec<Rating> {
        self.groups()
            .flat_map(|(rating, count)| std::iter::repeat(rating).take(count))
            .collect()
    }

    pub fn total_points(&self) -> u32 {
        self.groups()
            .map(|(rating, count)| rating * count as u32)
            .sum()
    }

    pub fn size(&self) -> usize {
        self.groups.values().sum()
    }
}

#[derive(Debug, Deserialize)]
struct TableFile {
    targets: Vec<TargetEntry>,
}

#[derive(Debug, Deserialize)]
struct TargetEntry {
    target: u32,
    combinations: Vec<PrecomputedCombination>,
}

#[derive(Debug, Clone, Default)]
pub struct CombinationTable {
    by_target: BTreeMap<u32, Vec<PrecomputedCombination>>,
}

impl CombinationTable {
    /// Parses an authored table and checks that every fill is a full squad and that
    /// each target's fills ascend by total rating points.
    pub fn from_yaml(raw: &str) -> Result<Self, TableError> {
        let parsed: TableFile = serde_yaml::from_str(raw)?;
        let mut by_target = BTreeMap::new();

        for entry in parsed.targets {
            for (index, combination) in entry.combinations.iter().enumerate() {
                let size = combination.size();
                if size != SQUAD_CAPACITY {
                    return Err(TableError::WrongSize {
                        target: entry.target,
                        index,
                        size,
                    });
                }
            }
            let ascending = entry
                .combinations
                .windows(2)
                .all(|pair| pair[0].total_points() <= pair[1].total_points());
            if !ascending {
                return Err(TableError::Unsorted {
                    target: entry.target,
                });
            }
            if by_target.insert(entry.target, entry.combinations).is_some() {
                return Err(TableError::DuplicateTarget(entry.target));
            }
        }

        Ok(Self { by_target })
    }

    /// Authored fills for `target`, cheapest first. Empty outside [TABLE_TARGETS].
    pub fn lookup(&self, target: u32) -> &[PrecomputedCombination] {
        if !TABLE_TARGETS.contains(&target) {
            return &[];
        }
        self.by_target
            .get(&target)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn targets(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_target.keys().copied()
    }
}

/// Process-wide table parsed from the embedded document.
///
/// A document that fails to parse is logged and behaves as an empty table, which sends
/// every search down the exhaustive path.
pub fn combination_table() -> &'static CombinationTable {
    TABLE.get_or_init(|| match CombinationTable::from_yaml(EMBEDDED_TABLE) {
        Ok(table) => table,
        Err(err) => {
            tracing::error!(error = %err, "combination table unavailable");
            CombinationTable::default()
        }
    })
}
