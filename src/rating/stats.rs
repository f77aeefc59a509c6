use serde::Serialize;

use crate::rating::Rating;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingStatistics {
    pub min: Rating,
    pub max: Rating,
    pub average: f64,
    pub median: f64,
    pub count: usize,
}

/// Descriptive statistics over a rating list. Every field is zero for an empty list.
pub fn get_rating_statistics(ratings: &[Rating]) -> RatingStatistics {
    if ratings.is_empty() {
        return RatingStatistics::default();
    }

    let mut sorted = ratings.to_vec();
    sorted.sort_unstable();

    let count = sorted.len();
    let total: u64 = sorted.iter().map(|&r| u64::from(r)).sum();
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    } else {
        f64::from(sorted[mid])
    };

    RatingStatistics {
        min: sorted[0],
        max: sorted[count - 1],
        average: total as f64 / count as f64,
        median,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(get_rating_statistics(&[]), RatingStatistics::default());
    }

    #[test]
    fn odd_length_median_is_middle_value() {
        let stats = get_rating_statistics(&[90, 82, 85]);
        assert_eq!(stats.min, 82);
        assert_eq!(stats.max, 90);
        assert_eq!(stats.median, 85.0);
        assert_eq!(stats.count, 3);
        assert!((stats.average - 85.666_666).abs() < 1e-4);
    }

    #[test]
    fn even_length_median_averages_middle_pair() {
        let stats = get_rating_statistics(&[84, 85, 86, 87]);
        assert_eq!(stats.median, 85.5);
        assert_eq!(stats.average, 85.5);
    }
}
