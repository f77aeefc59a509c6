//! Exhaustive path: every fill of the open slots over the distinct available ratings.

use tracing::debug;

use crate::data::Inventory;
use crate::error::SolveError;
use crate::optimizer::multiset::{multiset_count, Multisets};
use crate::optimizer::ranking::{efficiency, rank_solutions, RatingGroup, Solution};
use crate::optimizer::{price_of, SolutionSet, SquadSearch};
use crate::rating::{aggregate_rating, total_rating_points, Rating};

pub(crate) fn search(search: &SquadSearch) -> Result<SolutionSet, SolveError> {
    let target = search.target_rating;
    let slots = search.remaining_slots();

    if slots == 0 {
        return Ok(complete_squad(search));
    }

    let inventory = Inventory::from_ratings(&search.available_ratings);
    let alphabet = inventory.distinct();
    let stock: Vec<usize> = alphabet.iter().map(|&r| inventory.count(r)).collect();
    debug!(
        target_rating = target,
        slots,
        distinct = alphabet.len(),
        candidates = %multiset_count(alphabet.len(), slots),
        "exhaustive search"
    );

    let mut squad = Vec::with_capacity(search.existing_ratings.len() + slots);
    let mut solutions = Vec::new();
    let mut fills = Multisets::new(&alphabet, slots);

    while let Some(counts) = fills.next_counts() {
        if counts.iter().zip(&stock).any(|(needed, held)| needed > held) {
            continue;
        }

        squad.clear();
        squad.extend_from_slice(&search.existing_ratings);
        for (&rating, &count) in alphabet.iter().zip(&counts) {
            squad.extend(std::iter::repeat(rating).take(count));
        }

        let actual_rating = aggregate_rating(&squad);
        if actual_rating < target {
            continue;
        }

        let fill = &squad[search.existing_ratings.len()..];
        let total = squad_points(&squad);
        solutions.push(Solution {
            price: price_of(fill, &search.price_by_rating)?,
            squad: alphabet
                .iter()
                .zip(&counts)
                .filter(|&(_, &count)| count > 0)
                .map(|(&rating, &count)| RatingGroup { rating, count })
                .collect(),
            actual_rating,
            total_rating_points: total,
            efficiency: efficiency(total, actual_rating),
            is_optimal: false,
        });
    }

    rank_solutions(&mut solutions, search.sort_by_price);
    solutions.truncate(search.max_solutions);

    if solutions.is_empty() {
        return Ok(SolutionSet::empty_with_message(format!(
            "No combination of the available ratings reaches target rating {target}"
        )));
    }
    Ok(SolutionSet {
        solutions,
        message: None,
    })
}

/// Validated squads hold at most 23 members rated 99 or less, so the total fits.
fn squad_points(ratings: &[Rating]) -> u32 {
    u32::try_from(total_rating_points(ratings)).unwrap_or(u32::MAX)
}

/// No open slots: the existing squad either meets the target as it stands or not.
fn complete_squad(search: &SquadSearch) -> SolutionSet {
    let existing = &search.existing_ratings;
    let actual_rating = aggregate_rating(existing);
    if actual_rating < search.target_rating {
        return SolutionSet::empty_with_message(format!(
            "Existing squad rates {actual_rating}, below target rating {}",
            search.target_rating
        ));
    }

    let total = squad_points(existing);
    SolutionSet {
        solutions: vec![Solution {
            price: 0,
            squad: Vec::new(),
            actual_rating,
            total_rating_points: total,
            efficiency: efficiency(total, actual_rating),
            is_optimal: false,
        }],
        message: None,
    }
}
