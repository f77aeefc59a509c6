//! Squad completion search.
//!
//! Two strategies share one result shape. The precomputed path looks up authored fills
//! for common targets and keeps the ones the inventory can supply. The exhaustive path
//! enumerates every fill of the open slots over the distinct available ratings and
//! scores each one. A search with no existing members, a common target and a large
//! inventory tries the precomputed path first.

pub mod exhaustive;
pub mod multiset;
pub mod optimal;
pub mod ranking;
pub mod sweep;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::data::{validate_input, Inventory, InputCheck, TABLE_TARGETS};
use crate::error::SolveError;
use crate::rating::{Rating, SQUAD_CAPACITY};

pub use multiset::{multiset_count, multisets, Multisets};
pub use optimal::{find_optimal_solutions, try_find_optimal_solutions, OptimalSearch};
pub use ranking::{rank_solutions, RatingGroup, Solution};
pub use sweep::{sweep_targets, TargetSweep};

/// Inventories larger than this try the precomputed path first.
pub const PRECOMPUTED_INVENTORY_THRESHOLD: usize = 50;
pub const DEFAULT_MAX_SOLUTIONS: usize = 50;

pub(crate) const NO_SOLUTIONS_REQUESTED: &str = "No solutions requested (max_solutions is 0)";

/// Price per rating; ratings without a price cost nothing.
pub type PriceTable = BTreeMap<Rating, u64>;

/// Options for completing a squad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadSearch {
    pub target_rating: u32,
    #[serde(default)]
    pub existing_ratings: Vec<Rating>,
    #[serde(default)]
    pub available_ratings: Vec<Rating>,
    #[serde(default)]
    pub price_by_rating: PriceTable,
    #[serde(default = "default_squad_size")]
    pub squad_size: usize,
    #[serde(default = "default_max_solutions")]
    pub max_solutions: usize,
    #[serde(default = "default_true")]
    pub sort_by_price: bool,
    #[serde(default = "default_true")]
    pub use_optimal_combinations: bool,
}

fn default_squad_size() -> usize {
    SQUAD_CAPACITY
}

fn default_max_solutions() -> usize {
    DEFAULT_MAX_SOLUTIONS
}

fn default_true() -> bool {
    true
}

impl SquadSearch {
    pub fn new(target_rating: u32) -> Self {
        Self {
            target_rating,
            existing_ratings: Vec::new(),
            available_ratings: Vec::new(),
            price_by_rating: PriceTable::new(),
            squad_size: SQUAD_CAPACITY,
            max_solutions: DEFAULT_MAX_SOLUTIONS,
            sort_by_price: true,
            use_optimal_combinations: true,
        }
    }

    pub fn remaining_slots(&self) -> usize {
        self.squad_size.saturating_sub(self.existing_ratings.len())
    }

    fn input_check(&self) -> InputCheck<'_> {
        InputCheck {
            target_rating: self.target_rating,
            existing_ratings: &self.existing_ratings,
            available_ratings: &self.available_ratings,
            squad_size: self.squad_size,
        }
    }

    /// The precomputed table holds full 11-member fills, so it only applies to an empty
    /// standard squad.
    fn wants_precomputed(&self) -> bool {
        self.use_optimal_combinations
            && self.existing_ratings.is_empty()
            && self.squad_size == SQUAD_CAPACITY
            && TABLE_TARGETS.contains(&self.target_rating)
            && self.available_ratings.len() > PRECOMPUTED_INVENTORY_THRESHOLD
    }
}

/// Solutions found by a successful search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionSet {
    pub solutions: Vec<Solution>,
    pub message: Option<String>,
}

impl SolutionSet {
    pub fn solutions_found(&self) -> usize {
        self.solutions.len()
    }

    pub(crate) fn empty_with_message(message: impl Into<String>) -> Self {
        Self {
            solutions: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// Outcome of a search in the shape callers consume: either solutions or an error
/// message, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolveReport {
    pub solutions_found: usize,
    pub solutions: Vec<Solution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<SolutionSet, SolveError>> for SolveReport {
    fn from(result: Result<SolutionSet, SolveError>) -> Self {
        match result {
            Ok(set) => Self {
                solutions_found: set.solutions_found(),
                solutions: set.solutions,
                message: set.message,
                error: None,
            },
            Err(err) => Self {
                error: Some(err.to_string()),
                ..Self::default()
            },
        }
    }
}

/// Size of the exhaustive search a request would run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchEstimate {
    pub remaining_slots: usize,
    pub distinct_ratings: usize,
    /// Candidate fills the exhaustive path visits: C(distinct + slots - 1, slots).
    pub candidates: u128,
    /// Whether the precomputed table is consulted first.
    pub uses_precomputed: bool,
}

pub fn estimate_search(search: &SquadSearch) -> SearchEstimate {
    let remaining_slots = search.remaining_slots();
    let distinct_ratings = Inventory::from_ratings(&search.available_ratings)
        .distinct()
        .len();
    let candidates = if remaining_slots == 0 {
        0
    } else {
        multiset_count(distinct_ratings, remaining_slots)
    };
    SearchEstimate {
        remaining_slots,
        distinct_ratings,
        candidates,
        uses_precomputed: search.wants_precomputed(),
    }
}

/// Completes a squad, returning validation or runtime failures as [SolveError].
pub fn try_find_squad_solutions(search: &SquadSearch) -> Result<SolutionSet, SolveError> {
    let report = validate_input(&search.input_check());
    if !report.valid {
        warn!(
            target_rating = search.target_rating,
            errors = report.errors.len(),
            "rejected squad search"
        );
        return Err(SolveError::Validation(report.errors));
    }

    info!(
        event = "solve_start",
        target_rating = search.target_rating,
        existing = search.existing_ratings.len(),
        available = search.available_ratings.len(),
        squad_size = search.squad_size
    );

    if search.max_solutions == 0 {
        info!(event = "solve_end", path = "none", found = 0);
        return Ok(SolutionSet::empty_with_message(NO_SOLUTIONS_REQUESTED));
    }

    if search.wants_precomputed() {
        let precomputed = try_find_optimal_solutions(&OptimalSearch {
            target_rating: search.target_rating,
            available_ratings: search.available_ratings.clone(),
            price_by_rating: search.price_by_rating.clone(),
            max_solutions: search.max_solutions,
        })?;
        if precomputed.solutions_found() > 0 {
            info!(
                event = "solve_end",
                path = "precomputed",
                found = precomputed.solutions_found()
            );
            return Ok(precomputed);
        }
    }

    let result = exhaustive::search(search)?;
    info!(
        event = "solve_end",
        path = "exhaustive",
        found = result.solutions_found()
    );
    Ok(result)
}

/// Completes a squad, cheapest solutions first unless `sort_by_price` is off.
pub fn find_squad_solutions(search: &SquadSearch) -> SolveReport {
    try_find_squad_solutions(search).into()
}

/// Same search as [find_squad_solutions], ranked by fewest total rating points.
pub fn find_most_efficient_solutions(search: &SquadSearch) -> SolveReport {
    let search = SquadSearch {
        sort_by_price: false,
        ..search.clone()
    };
    find_squad_solutions(&search)
}

pub(crate) fn price_of(fill: &[Rating], prices: &PriceTable) -> Result<u64, SolveError> {
    fill.iter().try_fold(0_u64, |total, rating| {
        let price = prices.get(rating).copied().unwrap_or(0);
        total.checked_add(price).ok_or(SolveError::PriceOverflow)
    })
}
