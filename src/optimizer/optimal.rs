//! Precomputed path: authored fills filtered by what the inventory can supply.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{combination_table, Inventory};
use crate::error::SolveError;
use crate::optimizer::ranking::{efficiency, RatingGroup, Solution};
use crate::optimizer::{price_of, PriceTable, SolutionSet, SolveReport, NO_SOLUTIONS_REQUESTED};
use crate::rating::{aggregate_rating, Rating};

pub const DEFAULT_OPTIMAL_SOLUTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalSearch {
    pub target_rating: u32,
    #[serde(default)]
    pub available_ratings: Vec<Rating>,
    #[serde(default)]
    pub price_by_rating: PriceTable,
    #[serde(default = "default_optimal_solutions")]
    pub max_solutions: usize,
}

fn default_optimal_solutions() -> usize {
    DEFAULT_OPTIMAL_SOLUTIONS
}

impl OptimalSearch {
    pub fn new(target_rating: u32) -> Self {
        Self {
            target_rating,
            available_ratings: Vec::new(),
            price_by_rating: PriceTable::new(),
            max_solutions: DEFAULT_OPTIMAL_SOLUTIONS,
        }
    }
}

/// Authored fills for the target that the inventory can supply, in table order, up to
/// `max_solutions` of them.
///
/// Infeasible fills are skipped before the limit applies: the limit counts kept fills,
/// not table rows visited.
pub fn try_find_optimal_solutions(search: &OptimalSearch) -> Result<SolutionSet, SolveError> {
    let target = search.target_rating;
    let fills = combination_table().lookup(target);
    if fills.is_empty() {
        return Ok(SolutionSet::empty_with_message(format!(
            "No precomputed combinations for target rating {target}; use the exhaustive search instead"
        )));
    }

    if search.max_solutions == 0 {
        return Ok(SolutionSet::empty_with_message(NO_SOLUTIONS_REQUESTED));
    }

    let inventory = Inventory::from_ratings(&search.available_ratings);
    let mut solutions = Vec::new();
    for fill in fills {
        if solutions.len() >= search.max_solutions {
            break;
        }
        if !fill.feasible(&inventory) {
            continue;
        }
        let squad = fill.to_multiset();
        let total_rating_points = fill.total_points();
        solutions.push(Solution {
            price: price_of(&squad, &search.price_by_rating)?,
            squad: fill
                .groups()
                .map(|(rating, count)| RatingGroup { rating, count })
                .collect(),
            actual_rating: aggregate_rating(&squad),
            total_rating_points,
            efficiency: efficiency(total_rating_points, target),
            is_optimal: true,
        });
    }
    // Filtering keeps table order, so this only guards hand-edited data.
    solutions.sort_by_key(|solution| solution.total_rating_points);

    debug!(
        target_rating = target,
        authored = fills.len(),
        feasible = solutions.len(),
        "precomputed lookup"
    );

    if solutions.is_empty() {
        return Ok(SolutionSet::empty_with_message(format!(
            "No precomputed combination for target rating {target} can be filled from the available ratings"
        )));
    }
    Ok(SolutionSet {
        solutions,
        message: None,
    })
}

pub fn find_optimal_solutions(search: &OptimalSearch) -> SolveReport {
    try_find_optimal_solutions(search).into()
}
