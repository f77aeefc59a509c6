//! Runs one independent search per target rating across the rayon pool.

use std::ops::RangeInclusive;

use rayon::prelude::*;
use serde::Serialize;

use crate::optimizer::{find_squad_solutions, SolveReport, SquadSearch};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSweep {
    pub target_rating: u32,
    pub report: SolveReport,
}

/// Searches every target in `targets` with the rest of `base` unchanged. Results come
/// back in target order.
pub fn sweep_targets(base: &SquadSearch, targets: RangeInclusive<u32>) -> Vec<TargetSweep> {
    targets
        .into_par_iter()
        .map(|target_rating| {
            let search = SquadSearch {
                target_rating,
                ..base.clone()
            };
            TargetSweep {
                target_rating,
                report: find_squad_solutions(&search),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_matches_individual_searches() {
        let base = SquadSearch {
            existing_ratings: vec![84; 9],
            available_ratings: vec![80, 82, 84, 86, 88],
            max_solutions: 3,
            ..SquadSearch::new(80)
        };
        let swept = sweep_targets(&base, 83..=86);
        assert_eq!(
            swept.iter().map(|s| s.target_rating).collect::<Vec<_>>(),
            vec![83, 84, 85, 86]
        );
        for entry in &swept {
            let single = find_squad_solutions(&SquadSearch {
                target_rating: entry.target_rating,
                ..base.clone()
            });
            assert_eq!(entry.report, single);
        }
    }
}
