use serde::Serialize;

use crate::rating::Rating;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingGroup {
    pub rating: Rating,
    pub count: usize,
}

/// One way to complete a squad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// Cost of the fill only; existing members are free.
    pub price: u64,
    /// The fill, grouped by rating ascending.
    pub squad: Vec<RatingGroup>,
    pub actual_rating: u32,
    /// Sum of every member rating in the completed squad.
    pub total_rating_points: u32,
    /// Rating points spent per point of achieved rating; lower is better.
    pub efficiency: f64,
    pub is_optimal: bool,
}

/// Orders solutions in place.
///
/// By price: cheapest first, fewer total rating points breaking ties. Otherwise the
/// two keys swap roles.
pub fn rank_solutions(solutions: &mut [Solution], sort_by_price: bool) {
    if sort_by_price {
        solutions.sort_by(|left, right| {
            left.price
                .cmp(&right.price)
                .then_with(|| left.total_rating_points.cmp(&right.total_rating_points))
        });
    } else {
        solutions.sort_by(|left, right| {
            left.total_rating_points
                .cmp(&right.total_rating_points)
                .then_with(|| left.price.cmp(&right.price))
        });
    }
}

pub(crate) fn efficiency(total_rating_points: u32, actual_rating: u32) -> f64 {
    f64::from(total_rating_points) / f64::from(actual_rating.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(price: u64, total_rating_points: u32) -> Solution {
        Solution {
            price,
            squad: Vec::new(),
            actual_rating: 84,
            total_rating_points,
            efficiency: efficiency(total_rating_points, 84),
            is_optimal: false,
        }
    }

    fn keys(solutions: &[Solution]) -> Vec<(u64, u32)> {
        solutions
            .iter()
            .map(|s| (s.price, s.total_rating_points))
            .collect()
    }

    #[test]
    fn price_first_breaks_ties_on_points() {
        let mut solutions = vec![solution(900, 920), solution(500, 930), solution(500, 925)];
        rank_solutions(&mut solutions, true);
        assert_eq!(keys(&solutions), vec![(500, 925), (500, 930), (900, 920)]);
    }

    #[test]
    fn points_first_breaks_ties_on_price() {
        let mut solutions = vec![solution(900, 920), solution(500, 930), solution(400, 920)];
        rank_solutions(&mut solutions, false);
        assert_eq!(keys(&solutions), vec![(400, 920), (900, 920), (500, 930)]);
    }

    #[test]
    fn efficiency_guards_zero_rating() {
        assert_eq!(efficiency(0, 0), 0.0);
        assert_eq!(efficiency(924, 84), 11.0);
    }
}
